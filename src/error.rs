use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the generator can hit. All of them abort the run; the only
/// soft case (an unresolved decomposition) never becomes an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// The input lacks the expected shape (description, hex code points, block bounds).
    #[error("malformed UCD input: {0}")]
    MalformedInput(String),

    /// Cross-references inside the database don't line up.
    #[error("inconsistent UCD data: {0}")]
    DataConsistency(String),

    #[error("unknown general category {code:?} on U+{cp}")]
    UnknownCategory { code: String, cp: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("search index error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
