use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_INPUT: &str = "ucd.nounihan.flat.xml";
pub const DEFAULT_DOCSET_DIR: &str = "UnicodeCharacters.docset";
pub const DEFAULT_MANIFEST: &str = "docset.json";

/// Where to read the UCD from and where the docset goes. Relative paths
/// resolve against the working directory.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub input: PathBuf,
    pub docset_dir: PathBuf,
    pub manifest: PathBuf,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub docset_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

impl Settings {
    pub fn load(overrides: Overrides) -> Result<Self> {
        let settings: Settings = Config::builder()
            .set_default("input", DEFAULT_INPUT)?
            .set_default("docset_dir", DEFAULT_DOCSET_DIR)?
            .set_default("manifest", DEFAULT_MANIFEST)?
            .add_source(Environment::with_prefix("UCD_DOCSET"))
            .build()?
            .try_deserialize()?;

        Ok(Settings {
            input: overrides.input.unwrap_or(settings.input),
            docset_dir: overrides.docset_dir.unwrap_or(settings.docset_dir),
            manifest: overrides.manifest.unwrap_or(settings.manifest),
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins() {
        let s = Settings::load(Overrides {
            input: Some("other.xml".into()),
            docset_dir: Some("out/Test.docset".into()),
            manifest: Some("out/docset.json".into()),
        })
        .unwrap();
        assert_eq!(s.input, PathBuf::from("other.xml"));
        assert_eq!(s.docset_dir, PathBuf::from("out/Test.docset"));
        assert_eq!(s.manifest, PathBuf::from("out/docset.json"));
    }
}
