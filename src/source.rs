use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::ImportError;
use crate::record::Status;

// ─── Source kinds ────────────────────────────────────────────────────

/// External data formats an import can consume. The kind also selects the
/// overwrite trust model during reconciliation: JSON exports are treated as
/// possibly stale, legacy database dumps as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.json` — exported translation file, `{"original", "string", ...}`.
    Json,
    /// `.ats` — legacy translation database dump with typed records.
    LegacyDb,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(SourceKind::Json)
        } else if ext.eq_ignore_ascii_case("ats") {
            Some(SourceKind::LegacyDb)
        } else {
            None
        }
    }
}

// ─── Entries ─────────────────────────────────────────────────────────

/// One incoming translation, normalized from either source schema.
/// Transient: lives only for the duration of a single import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub original: String,
    pub translation: String,
    /// Only legacy records carry a status of their own.
    pub status: Option<Status>,
}

#[derive(Deserialize)]
struct RawJsonEntry {
    original: String,
    /// Null for entries exported without a translation.
    string: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    index: Option<u32>,
    #[serde(default, rename = "type")]
    #[allow(dead_code)]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct RawLegacyEntry {
    original_string: String,
    translated_string: String,
    #[serde(default)]
    status: Option<Status>,
}

// ─── Loaded source ───────────────────────────────────────────────────

/// Immutable mapping original-string -> entry, built by a single load.
/// Duplicate originals resolve last-write-wins in file order.
#[derive(Debug)]
pub struct LoadedSource {
    pub kind: SourceKind,
    entries: HashMap<String, TranslationEntry>,
}

impl LoadedSource {
    pub fn get(&self, original: &str) -> Option<&TranslationEntry> {
        self.entries.get(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Loader ──────────────────────────────────────────────────────────

/// Load a translation source file into an original-string keyed mapping.
///
/// Fails with `NotFound` for a missing file, `UnsupportedFormat` for an
/// unrecognized extension and `ParseError` for malformed content. No partial
/// result is ever returned.
pub fn load_source(path: &Path) -> Result<LoadedSource, ImportError> {
    let kind = SourceKind::from_path(path).ok_or_else(|| ImportError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ImportError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ImportError::ParseError {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    })?;

    let entries = match kind {
        SourceKind::Json => parse_json_entries(path, &content)?,
        SourceKind::LegacyDb => parse_legacy_entries(path, &content)?,
    };

    info!(
        "Loaded {} translation entrie(s) from {}",
        entries.len(),
        path.display()
    );

    Ok(LoadedSource { kind, entries })
}

fn parse_json_entries(
    path: &Path,
    content: &str,
) -> Result<HashMap<String, TranslationEntry>, ImportError> {
    let raw: Vec<RawJsonEntry> =
        serde_json::from_str(content).map_err(|err| ImportError::ParseError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut entries = HashMap::with_capacity(raw.len());
    let mut skipped = 0usize;
    for entry in raw {
        let Some(translation) = entry.string else {
            // Exported without a translation; nothing to apply.
            skipped += 1;
            continue;
        };
        entries.insert(
            entry.original.clone(),
            TranslationEntry {
                original: entry.original,
                translation,
                status: None,
            },
        );
    }
    if skipped > 0 {
        debug!("Skipped {} entrie(s) without a translation", skipped);
    }
    Ok(entries)
}

fn parse_legacy_entries(
    path: &Path,
    content: &str,
) -> Result<HashMap<String, TranslationEntry>, ImportError> {
    let raw: Vec<RawLegacyEntry> =
        serde_json::from_str(content).map_err(|err| ImportError::ParseError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    if raw.is_empty() {
        warn!("Legacy database {} contains no records", path.display());
    }

    let mut entries = HashMap::with_capacity(raw.len());
    for record in raw {
        entries.insert(
            record.original_string.clone(),
            TranslationEntry {
                original: record.original_string,
                translation: record.translated_string,
                // Legacy dumps predate per-record status; absent means the
                // translation was finalized there.
                status: Some(record.status.unwrap_or(Status::TranslationComplete)),
            },
        );
    }
    Ok(entries)
}
