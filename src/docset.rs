use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::render::{block_file_name, GENERATED_DIR};
use crate::ucd::Database;

const STYLESHEET: &str = include_str!("../assets/c.css");
const INFO_PLIST: &str = include_str!("../assets/Info.plist");

pub const PACKAGE_NAME: &str = "Unicode Characters";
pub const ARCHIVE_NAME: &str = "UnicodeCharacters.tgz";
const AUTHOR_NAME: &str = "Remko Tronçon";
const AUTHOR_LINK: &str = "https://mko.re";

/// Paths inside `<name>.docset/`.
pub struct DocsetLayout {
    root: PathBuf,
}

impl DocsetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resources_dir(&self) -> PathBuf {
        self.root.join("Contents").join("Resources")
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.resources_dir().join("Documents")
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.documents_dir().join(GENERATED_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.resources_dir().join("docSet.dsidx")
    }

    pub fn info_plist_path(&self) -> PathBuf {
        self.root.join("Contents").join("Info.plist")
    }

    /// Creates the directory tree and the static files.
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(self.generated_dir())?;
        std::fs::write(self.documents_dir().join("c.css"), STYLESHEET)?;
        std::fs::write(self.info_plist_path(), INFO_PLIST)?;
        Ok(())
    }
}

pub fn render_toc(db: &Database) -> String {
    let blocks: String = db
        .blocks
        .iter()
        .map(|b| {
            format!(
                "<li><a href='{}/{}'>{}</a> ({} - {})</li>",
                GENERATED_DIR,
                block_file_name(b),
                escape(&b.name),
                b.first_hex,
                b.last_hex
            )
        })
        .collect();

    format!(
        r#"<head>
  <link rel="stylesheet" href="c.css">
  <title>Unicode {version} Characters</title>
</head>
<body>
  <h1>Unicode {version} Characters</h1>
  <h2>Introduction</h2>
  <p>
    This docset contains a description of all characters in the Unicode
    database (without the <a href='http://www.unicode.org/reports/tr38/'>Unihan characters</a>).
  </p>
  <p>
    Navigate the characters through the blocks below, or search them by name.
  </p>
  <p>
    <em>Note: Only characters that are supported by your browser font will be
    displayed</em>
  </p>
  <h2>Blocks</h2>
  <ul>
    {blocks}
  </ul>
</body>
"#,
        version = escape(&db.version),
        blocks = blocks,
    )
}

pub fn write_toc(layout: &DocsetLayout, db: &Database) -> Result<PathBuf> {
    let path = layout.documents_dir().join("index.html");
    std::fs::write(&path, render_toc(db))?;
    Ok(path)
}

#[derive(Debug, Serialize)]
pub struct Author {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub archive: String,
    pub author: Author,
    pub aliases: Vec<String>,
    pub specific_versions: Vec<String>,
}

/// `<ucd version>/<UTC timestamp>`, which sorts by generation time.
pub fn docset_version(ucd_version: &str, now: DateTime<Utc>) -> String {
    format!("{}/{}", ucd_version, now.to_rfc3339_opts(SecondsFormat::Micros, false))
}

impl Manifest {
    pub fn new(version: String) -> Self {
        Self {
            name: PACKAGE_NAME.to_string(),
            version,
            archive: ARCHIVE_NAME.to_string(),
            author: Author {
                name: AUTHOR_NAME.to_string(),
                link: AUTHOR_LINK.to_string(),
            },
            aliases: Vec::new(),
            specific_versions: Vec::new(),
        }
    }
}

pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(manifest)?)?;
    info!("Wrote manifest {} (version {})", path.display(), manifest.version);
    Ok(())
}

// ── Tests ──
