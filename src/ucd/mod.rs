pub mod blocks;
pub mod category;

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info};

use crate::error::{Error, Result};
pub use blocks::{Block, BlockIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAlias {
    pub alias: String,
    pub kind: String,
}

/// A code point referenced from a mapping attribute (`dm`, `uc`, `tc`, `lc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePointRef {
    pub cp: u32,
    /// As written in the attribute.
    pub hex: String,
}

/// One `<char cp="…">` entry of the repertoire.
#[derive(Debug, Clone, Default)]
pub struct CharRecord {
    pub cp: u32,
    /// Code point text exactly as the source wrote it.
    pub cp_hex: String,
    pub name: String,
    pub old_name: String,
    pub aliases: Vec<NameAlias>,
    /// Raw `gc` code; resolved against [`category::Category`] when rendered.
    pub category: String,
    pub decomposition: Option<Vec<CodePointRef>>,
    pub uppercase: Option<Vec<CodePointRef>>,
    pub titlecase: Option<Vec<CodePointRef>>,
    pub lowercase: Option<Vec<CodePointRef>>,
    pub age: Option<String>,
}

impl CharRecord {
    /// `na`, then `na1`, then the first alias that isn't an abbreviation.
    /// May legitimately be empty.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        if !self.old_name.is_empty() {
            return &self.old_name;
        }
        self.aliases
            .iter()
            .find(|a| a.kind != "abbreviation")
            .map(|a| a.alias.as_str())
            .unwrap_or("")
    }

    pub fn title(&self) -> String {
        format!("{} (U+{})", self.display_name(), self.cp_hex)
    }
}

#[derive(Debug)]
pub struct Database {
    /// e.g. "15.0.0", taken from `<description>Unicode 15.0.0</description>`.
    pub version: String,
    pub characters: BTreeMap<u32, CharRecord>,
    /// Source order.
    pub blocks: Vec<Block>,
    pub block_index: BlockIndex,
}

impl Database {
    pub fn block_index_of(&self, cp: u32) -> Option<usize> {
        self.block_index.lookup(cp)
    }
}

pub fn load(path: &Path) -> Result<Database> {
    let xml = std::fs::read_to_string(path)?;
    let db = parse(&xml)?;
    info!(
        "Loaded Unicode {} from {}: {} characters, {} blocks",
        db.version,
        path.display(),
        db.characters.len(),
        db.blocks.len()
    );
    Ok(db)
}

pub fn parse(xml: &str) -> Result<Database> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut description: Option<String> = None;
    let mut characters = BTreeMap::new();
    let mut blocks = Vec::new();

    let mut in_description = false;
    let mut in_repertoire = false;
    let mut in_blocks = false;
    let mut in_char = false;
    // Set only while inside a `<char>` that carries a `cp`.
    let mut current: Option<CharRecord> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"description" => {
                    in_description = true;
                    description.get_or_insert_with(String::new);
                }
                b"repertoire" => in_repertoire = true,
                b"blocks" => in_blocks = true,
                b"char" if in_repertoire => {
                    in_char = true;
                    current = parse_char(&e)?;
                }
                b"name-alias" if in_char => push_alias(&mut current, &e)?,
                b"block" if in_blocks => blocks.push(parse_block(&e)?),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"description" => {
                    description.get_or_insert_with(String::new);
                }
                b"char" if in_repertoire => {
                    if let Some(c) = parse_char(&e)? {
                        characters.insert(c.cp, c);
                    }
                }
                b"name-alias" if in_char => push_alias(&mut current, &e)?,
                b"block" if in_blocks => blocks.push(parse_block(&e)?),
                _ => {}
            },
            Event::Text(t) if in_description => {
                if let Some(d) = description.as_mut() {
                    d.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"description" => in_description = false,
                b"repertoire" => in_repertoire = false,
                b"blocks" => in_blocks = false,
                b"char" if in_char => {
                    in_char = false;
                    if let Some(c) = current.take() {
                        characters.insert(c.cp, c);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let version = parse_version(description.as_deref())?;
    let block_index = BlockIndex::build(&blocks)?;
    debug!("block index built over {} ranges", blocks.len());

    Ok(Database {
        version,
        characters,
        blocks,
        block_index,
    })
}

/// Accepts exactly `"Unicode <version>"`.
pub fn parse_version(description: Option<&str>) -> Result<String> {
    let text = description
        .ok_or_else(|| Error::MalformedInput("missing <description> element".into()))?;
    let parts: Vec<&str> = text.split(' ').collect();
    match parts.as_slice() {
        ["Unicode", version] if !version.is_empty() => Ok(version.to_string()),
        _ => Err(Error::MalformedInput(format!(
            "description {:?} is not of the form \"Unicode <version>\"",
            text
        ))),
    }
}

pub fn parse_code_point(hex: &str) -> Result<u32> {
    u32::from_str_radix(hex, 16)
        .map_err(|_| Error::MalformedInput(format!("invalid code point {:?}", hex)))
}

fn attr(e: &BytesStart, name: &str) -> Result<Option<String>> {
    match e.try_get_attribute(name)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Absent, empty and `#` (maps to itself) all mean "not declared".
/// Every listed token must be a hex code point; stray spaces are malformed.
fn mapping(e: &BytesStart, name: &str) -> Result<Option<Vec<CodePointRef>>> {
    let Some(value) = attr(e, name)?.filter(|v| !v.is_empty() && v != "#") else {
        return Ok(None);
    };
    value
        .split(' ')
        .map(|hex| -> Result<CodePointRef> {
            if hex.is_empty() {
                return Err(Error::MalformedInput(format!(
                    "empty code point in {}={:?}",
                    name, value
                )));
            }
            Ok(CodePointRef {
                cp: parse_code_point(hex)?,
                hex: hex.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Range entries (`first-cp`/`last-cp`, no `cp`) yield `None`.
fn parse_char(e: &BytesStart) -> Result<Option<CharRecord>> {
    let Some(cp_hex) = attr(e, "cp")? else {
        return Ok(None);
    };
    Ok(Some(CharRecord {
        cp: parse_code_point(&cp_hex)?,
        cp_hex,
        name: attr(e, "na")?.unwrap_or_default(),
        old_name: attr(e, "na1")?.unwrap_or_default(),
        aliases: Vec::new(),
        category: attr(e, "gc")?.unwrap_or_default(),
        decomposition: mapping(e, "dm")?,
        uppercase: mapping(e, "uc")?,
        titlecase: mapping(e, "tc")?,
        lowercase: mapping(e, "lc")?,
        age: attr(e, "age")?,
    }))
}

fn push_alias(current: &mut Option<CharRecord>, e: &BytesStart) -> Result<()> {
    if let Some(c) = current.as_mut() {
        c.aliases.push(NameAlias {
            alias: attr(e, "alias")?.unwrap_or_default(),
            kind: attr(e, "type")?.unwrap_or_default(),
        });
    }
    Ok(())
}

fn parse_block(e: &BytesStart) -> Result<Block> {
    let required = |name: &str| -> Result<String> {
        attr(e, name)?
            .ok_or_else(|| Error::MalformedInput(format!("<block> without {}", name)))
    };
    let first_hex = required("first-cp")?;
    let last_hex = required("last-cp")?;
    let name = required("name")?;
    let first = parse_code_point(&first_hex)?;
    let last = parse_code_point(&last_hex)?;
    if first > last {
        return Err(Error::MalformedInput(format!(
            "block {:?} ends before it starts ({} > {})",
            name, first_hex, last_hex
        )));
    }
    Ok(Block {
        first,
        last,
        first_hex,
        last_hex,
        name,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Database {
        load(Path::new("tests/fixtures/basic.xml")).unwrap()
    }

    fn doc(description: &str, body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
<description>{}</description>
{}
</ucd>"#,
            description, body
        )
    }

    #[test]
    fn loads_fixture() {
        let db = fixture();
        assert_eq!(db.version, "15.0.0");
        assert_eq!(db.blocks.len(), 4);
        assert_eq!(db.blocks[0].name, "Basic Latin");
        assert!(db.characters.contains_key(&0x41));
        assert!(db.characters.contains_key(&0x1F600));
        // range entry skipped
        assert!(!db.characters.contains_key(&0x3400));
    }

    #[test]
    fn mappings_normalised() {
        let db = fixture();
        let a = &db.characters[&0x41];
        assert_eq!(
            a.lowercase,
            Some(vec![CodePointRef { cp: 0x61, hex: "0061".into() }])
        );
        assert_eq!(a.uppercase, None);
        assert_eq!(a.decomposition, None);
        let ring = &db.characters[&0xC5];
        let dm: Vec<&str> = ring
            .decomposition
            .as_ref()
            .unwrap()
            .iter()
            .map(|r| r.hex.as_str())
            .collect();
        assert_eq!(dm, ["0041", "030A"]);
        assert_eq!(ring.age.as_deref(), Some("1.1"));
    }

    #[test]
    fn non_hex_mapping_is_malformed() {
        let xml = doc(
            "Unicode 15.0",
            r#"<repertoire><char cp="0044" na="X" gc="So" dm="0042 00ZZ"/></repertoire>"#,
        );
        assert!(matches!(parse(&xml), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn doubled_space_in_mapping_is_malformed() {
        let xml = doc(
            "Unicode 15.0",
            r#"<repertoire><char cp="0045" na="X" gc="So" dm="0042  0042"/></repertoire>"#,
        );
        assert!(matches!(parse(&xml), Err(Error::MalformedInput(_))));
        let xml = doc(
            "Unicode 15.0",
            r#"<repertoire><char cp="0061" na="X" gc="Ll" uc="0041 "/></repertoire>"#,
        );
        assert!(matches!(parse(&xml), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn block_membership() {
        let db = fixture();
        for (i, block) in db.blocks.iter().enumerate() {
            for cp in db.characters.range(block.first..=block.last).map(|(cp, _)| *cp) {
                assert_eq!(db.block_index_of(cp), Some(i));
            }
        }
        assert_eq!(db.block_index_of(0x1F600), Some(3));
    }

    #[test]
    fn old_name_fallback() {
        let xml = doc(
            "Unicode 15.0",
            r#"<repertoire><char cp="0007" na="" na1="OLD NAME" gc="Cc"/></repertoire>
<blocks><block first-cp="0000" last-cp="007F" name="Basic Latin"/></blocks>"#,
        );
        let db = parse(&xml).unwrap();
        assert_eq!(db.characters[&7].title(), "OLD NAME (U+0007)");
    }

    #[test]
    fn alias_fallback_skips_abbreviations() {
        let db = fixture();
        let pad = &db.characters[&0x80];
        assert_eq!(pad.aliases.len(), 3);
        assert_eq!(pad.display_name(), "PADDING CHARACTER");
    }

    #[test]
    fn only_abbreviations_leaves_name_empty() {
        let xml = doc(
            "Unicode 15.0",
            r#"<repertoire><char cp="0081" na="" na1="" gc="Cc"><name-alias alias="HOP" type="abbreviation"/></char></repertoire>
<blocks><block first-cp="0080" last-cp="00FF" name="Latin-1 Supplement"/></blocks>"#,
        );
        let db = parse(&xml).unwrap();
        assert_eq!(db.characters[&0x81].display_name(), "");
        assert_eq!(db.characters[&0x81].title(), " (U+0081)");
    }

    #[test]
    fn version_shapes() {
        assert_eq!(parse_version(Some("Unicode 15.0")).unwrap(), "15.0");
        for bad in [None, Some("Unicode"), Some("Unicode 15.0 beta"), Some("Unikode 15.0"), Some("")] {
            assert!(matches!(parse_version(bad), Err(Error::MalformedInput(_))), "{:?}", bad);
        }
    }

    #[test]
    fn missing_description_is_malformed() {
        let xml = r#"<ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0"><repertoire/></ucd>"#;
        assert!(matches!(parse(xml), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn bad_hex_is_malformed() {
        let xml = doc("Unicode 15.0", r#"<repertoire><char cp="00ZZ" na="X" gc="Lu"/></repertoire>"#);
        assert!(matches!(parse(&xml), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn inverted_block_is_malformed() {
        let xml = doc("Unicode 15.0", r#"<blocks><block first-cp="007F" last-cp="0000" name="Backwards"/></blocks>"#);
        assert!(matches!(parse(&xml), Err(Error::MalformedInput(_))));
    }
}
