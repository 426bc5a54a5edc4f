//! Terminal rendering of charger lookups.
//!
//! Mirrors what the search page shows: one `name - address` line per record.

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use crate::services::charger_api::{ChargerPayload, ChargerRecord};

const UNKNOWN: &str = "unknown";

/// Formats a single record the way the web page does.
pub fn render_record(record: &ChargerRecord) -> String {
    format!(
        "{} - {}",
        record.name.as_deref().unwrap_or(UNKNOWN),
        record.address.as_deref().unwrap_or(UNKNOWN)
    )
}

/// Writes one line per charger in `payload`.
///
/// # Errors
///
/// Fails if the payload is not a list of objects, or on write errors.
pub fn write_lines<W: Write>(out: &mut W, payload: &ChargerPayload) -> Result<()> {
    let records = payload.records()?;
    debug!(count = records.len(), "Rendering chargers");

    for record in &records {
        writeln!(out, "{}", render_record(record))?;
    }
    Ok(())
}

/// Writes the payload as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, payload: &ChargerPayload) -> Result<()> {
    let value = payload.to_value()?;
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}
