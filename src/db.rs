use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;
use crate::render::SearchEntry;

/// Deletes any index left by a previous run, then opens a fresh one.
pub fn recreate(path: &Path) -> Result<Connection> {
    if path.exists() {
        std::fs::remove_file(path)?;
        info!("Removed previous search index {}", path.display());
    }
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS searchIndex (
            id   INTEGER PRIMARY KEY,
            name TEXT,
            type TEXT,
            path TEXT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS anchor ON searchIndex (name, type, path);
        ",
    )?;
    Ok(())
}

/// Duplicates collapse on the unique index. Returns rows actually inserted.
pub fn insert_entries(conn: &Connection, entries: &[SearchEntry]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt =
            tx.prepare("INSERT OR IGNORE INTO searchIndex (name, type, path) VALUES (?1, ?2, ?3)")?;
        for e in entries {
            count += stmt.execute(rusqlite::params![e.name, e.kind.as_str(), e.path])?;
        }
    }
    tx.commit()?;
    info!("Indexed {} search entries ({} submitted)", count, entries.len());
    Ok(count)
}

pub fn count_by_kind(conn: &Connection) -> Result<Vec<(String, usize)>> {
    let mut stmt =
        conn.prepare("SELECT type, COUNT(*) FROM searchIndex GROUP BY type ORDER BY type")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Tests ──
