use std::io::Write;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::ExportError;
use crate::record::StringRecord;

// ─── Export ──────────────────────────────────────────────────────────

/// Wire shape of one exported entry. `index` is the record's position in the
/// session, so a filtered export keeps the original numbering.
#[derive(Serialize)]
struct ExportEntry<'a> {
    index: usize,
    #[serde(rename = "type")]
    kind: &'a str,
    original: &'a str,
    string: Option<&'a str>,
}

/// Write records as a JSON array with one compact entry per line.
///
/// `full = false` exports only records still needing work; complete records
/// are omitted. Non-ASCII text is written as-is, never escaped.
pub fn export_records(
    records: &[StringRecord],
    full: bool,
    writer: &mut impl Write,
) -> Result<(), ExportError> {
    let entries: Vec<ExportEntry> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| full || !record.status.is_final())
        .map(|(i, record)| ExportEntry {
            index: i,
            kind: &record.kind,
            original: &record.original_string,
            string: record.translated_string.as_deref(),
        })
        .collect();

    writer.write_all(b"[")?;
    for (i, entry) in entries.iter().enumerate() {
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        if i + 1 < entries.len() {
            writer.write_all(b",\n")?;
        } else {
            writer.write_all(b"\n")?;
        }
    }
    writer.write_all(b"]")?;
    Ok(())
}

/// Export to a file, creating the parent directory if needed.
pub fn export_to_path(
    records: &[StringRecord],
    full: bool,
    path: &Path,
) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    export_records(records, full, &mut file)?;
    info!("Exported translation file to {}", path.display());
    Ok(())
}
