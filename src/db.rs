//! SQLite snapshot loader.
//!
//! The snapshot carries three tables: `elements` (one row per element),
//! `series` (classification labels), and `oxidationstates` (zero or more
//! rows per element). The load is atomic and total: any missing file, table,
//! or column aborts startup with context.

use crate::catalog::ElementRecord;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

struct ElementRow {
    atomic_number: u32,
    atomic_weight: f64,
    symbol: String,
    name: String,
    series_id: i64,
}

/// Load every element in atomic-number order, with series labels and
/// oxidation states resolved.
pub fn load_records(path: &Path) -> Result<Vec<ElementRecord>> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("open element snapshot {}", path.display()))?;

    let mut elements_stmt = conn
        .prepare(
            "SELECT atomic_number, atomic_weight, symbol, name, series_id \
             FROM elements ORDER BY atomic_number",
        )
        .context("prepare element scan")?;
    let mut series_stmt = conn
        .prepare("SELECT name FROM series WHERE id = ?1")
        .context("prepare series lookup")?;
    let mut oxidation_stmt = conn
        .prepare("SELECT oxidation_state FROM oxidationstates WHERE atomic_number = ?1")
        .context("prepare oxidation-state lookup")?;

    let rows = elements_stmt
        .query_map([], |row| {
            Ok(ElementRow {
                atomic_number: row.get(0)?,
                atomic_weight: row.get(1)?,
                symbol: row.get(2)?,
                name: row.get(3)?,
                series_id: row.get(4)?,
            })
        })
        .context("scan elements")?;

    let mut records = Vec::new();
    for row in rows {
        let row = row.context("read element row")?;
        let series: String = series_stmt
            .query_row([row.series_id], |r| r.get(0))
            .with_context(|| format!("resolve series {} for {}", row.series_id, row.name))?;
        let oxidation_states = oxidation_stmt
            .query_map([i64::from(row.atomic_number)], |r| r.get(0))
            .with_context(|| format!("look up oxidation states for {}", row.name))?
            .collect::<rusqlite::Result<Vec<i32>>>()
            .with_context(|| format!("read oxidation states for {}", row.name))?;
        let wikipedia_url = format!("https://en.wikipedia.org/wiki/{}", row.name);
        records.push(ElementRecord {
            atomic_number: row.atomic_number,
            atomic_weight: row.atomic_weight,
            symbol: row.symbol,
            name: row.name,
            series,
            oxidation_states,
            wikipedia_url,
        });
    }

    tracing::info!(elements = records.len(), "element snapshot loaded");
    Ok(records)
}
