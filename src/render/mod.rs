pub mod encoding;

use std::path::Path;

use indicatif::ProgressBar;
use quick_xml::escape::escape;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::ucd::category::Category;
use crate::ucd::{Block, CharRecord, CodePointRef, Database};

/// Subdirectory of the documents dir holding generated pages.
pub const GENERATED_DIR: &str = "c";

const OVERVIEW_PLACEHOLDER: &str = "<small>?</small>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Element,
    Section,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Element => "Element",
            EntryKind::Section => "Section",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Relative to the documents dir.
    pub path: String,
}

pub struct Document {
    pub file_name: String,
    pub html: String,
}

pub fn char_file_name(c: &CharRecord) -> String {
    format!("{}.html", c.cp_hex)
}

pub fn block_file_name(b: &Block) -> String {
    format!("b{}.html", b.first_hex)
}

/// Renders pages and collects the search entries pointing at them.
pub struct Renderer<'a> {
    db: &'a Database,
    entries: Vec<SearchEntry>,
}

impl<'a> Renderer<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            entries: Vec::with_capacity(db.characters.len() + db.blocks.len()),
        }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SearchEntry> {
        self.entries
    }

    pub fn render_character(&mut self, c: &CharRecord) -> Result<Document> {
        let title = c.title();
        let file_name = char_file_name(c);
        let props = self.character_properties(c)?;

        let html = format!(
            "<head><link rel=\"stylesheet\" href=\"../c.css\"><title>{title}</title></head>\
             <body class='c'><h1>{name} <small>U+{cp}</small></h1>\
             <figure>{entity}</figure><table><tbody>{props}</tbody></table></body>",
            title = escape(&title),
            name = escape(c.display_name()),
            cp = c.cp_hex,
            entity = encoding::numeric_reference(c.cp),
            props = props
                .iter()
                .map(|(k, v)| format!("<tr><th>{}</th><td>{}</td></tr>", k, v))
                .collect::<String>(),
        );

        self.entries.push(SearchEntry {
            name: title,
            kind: EntryKind::Element,
            path: format!("{}/{}", GENERATED_DIR, file_name),
        });
        Ok(Document { file_name, html })
    }

    /// Key/value rows in their fixed display order. Values are HTML.
    fn character_properties(&self, c: &CharRecord) -> Result<Vec<(&'static str, String)>> {
        let block_idx = self.db.block_index_of(c.cp).ok_or_else(|| {
            Error::DataConsistency(format!("U+{} is not inside any block", c.cp_hex))
        })?;
        let block = &self.db.blocks[block_idx];
        let category = Category::from_code(&c.category).ok_or_else(|| Error::UnknownCategory {
            code: c.category.clone(),
            cp: c.cp_hex.clone(),
        })?;

        let mut props = vec![
            (
                "Block",
                format!("<a href='{}'>{}</a>", block_file_name(block), escape(&block.name)),
            ),
            ("Category", category.label().to_string()),
        ];

        if let Some(dm) = &c.decomposition {
            props.push(("Decomposition", self.decomposition(c, dm)));
        }
        for (label, mapping) in [
            ("Upper case", &c.uppercase),
            ("Title case", &c.titlecase),
            ("Lower case", &c.lowercase),
        ] {
            if let Some(cps) = mapping {
                props.push((label, self.case_links(c, label, cps)?));
            }
        }

        let ch = encoding::scalar(c.cp)?;
        props.extend([
            ("Added", escape(c.age.as_deref().unwrap_or("")).into_owned()),
            ("UTF-8", encoding::utf8(ch)),
            ("UTF-16", encoding::utf16(ch)),
            ("UTF-32", encoding::utf32(ch)),
            ("HTML", escape(&encoding::numeric_reference(c.cp)).into_owned()),
            ("Python", format!("<code>{}</code>", encoding::escape_snippet(c.cp))),
        ]);
        Ok(props)
    }

    /// All targets resolve: links titled with each target's full title.
    /// Any target missing: the whole field drops to plain `U+XXXX` text.
    fn decomposition(&self, c: &CharRecord, dm: &[CodePointRef]) -> String {
        let targets: Option<Vec<&CharRecord>> =
            dm.iter().map(|r| self.db.characters.get(&r.cp)).collect();

        match targets {
            Some(targets) => targets
                .iter()
                .map(|t| format!("<a href='{}'>{}</a>", char_file_name(t), escape(&t.title())))
                .collect::<Vec<_>>()
                .join(" "),
            None => {
                debug!("U+{}: unresolved decomposition {:?}, rendering as text", c.cp_hex, dm);
                dm.iter()
                    .map(|r| format!("U+{}", r.hex))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }

    /// Case mappings must resolve; there is no text fallback here.
    fn case_links(&self, c: &CharRecord, label: &str, cps: &[CodePointRef]) -> Result<String> {
        let links = cps
            .iter()
            .map(|r| -> Result<String> {
                let target = self.db.characters.get(&r.cp).ok_or_else(|| {
                    Error::DataConsistency(format!(
                        "U+{}: {} mapping references unknown U+{}",
                        c.cp_hex,
                        label.to_lowercase(),
                        r.hex
                    ))
                })?;
                Ok(format!("<a href='{}'>U+{}</a>", char_file_name(target), target.cp_hex))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(links.join(" "))
    }

    pub fn render_block(&mut self, block: &Block) -> Document {
        let file_name = block_file_name(block);
        let mut overview = Vec::new();
        let mut listing = String::new();

        // Absent code points are skipped; sparse blocks are normal.
        for (cp, c) in self.db.characters.range(block.first..=block.last) {
            let glyph = encoding::numeric_reference(*cp);
            let href = char_file_name(c);
            let shown = if c.name.is_empty() {
                OVERVIEW_PLACEHOLDER
            } else {
                glyph.as_str()
            };
            overview.push(format!("<a href='{}'>{}</a>", href, shown));
            listing.push_str(&format!(
                "<li><i>{}</i> <a href='{}'>{}</a></li>",
                glyph,
                href,
                escape(&c.title())
            ));
        }

        let name = escape(&block.name);
        let html = format!(
            "<head><link rel=\"stylesheet\" href=\"../c.css\"><title>{name}</title></head>\
             <body class='b'><h1>{name}</h1><h2>Overview</h2><nav>{overview}</nav>\
             <h2>Characters</h2><ul>{listing}</ul></body>",
            name = name,
            overview = overview.join(" "),
            listing = listing,
        );

        self.entries.push(SearchEntry {
            name: block.name.clone(),
            kind: EntryKind::Section,
            path: format!("{}/{}", GENERATED_DIR, file_name),
        });
        Document { file_name, html }
    }
}

pub struct RenderStats {
    pub characters: usize,
    pub blocks: usize,
}

/// Writes every character page, then every block page, into `out_dir`.
pub fn write_documents(
    db: &Database,
    out_dir: &Path,
    pb: &ProgressBar,
) -> Result<(Vec<SearchEntry>, RenderStats)> {
    let mut renderer = Renderer::new(db);

    pb.set_length((db.characters.len() + db.blocks.len()) as u64);
    for c in db.characters.values() {
        let doc = renderer.render_character(c)?;
        std::fs::write(out_dir.join(&doc.file_name), doc.html)?;
        pb.inc(1);
    }
    for block in &db.blocks {
        let doc = renderer.render_block(block);
        std::fs::write(out_dir.join(&doc.file_name), doc.html)?;
        pb.inc(1);
    }
    pb.finish_and_clear();
    debug!("{} search entries collected", renderer.entries().len());

    let stats = RenderStats {
        characters: db.characters.len(),
        blocks: db.blocks.len(),
    };
    info!(
        "Wrote {} character pages and {} block pages to {}",
        stats.characters,
        stats.blocks,
        out_dir.display()
    );
    Ok((renderer.into_entries(), stats))
}

// ── Tests ──
