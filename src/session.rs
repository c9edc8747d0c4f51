use std::path::PathBuf;

use log::{info, warn};

use crate::config::ImporterConfig;
use crate::error::{ExportError, ImportError};
use crate::export::export_to_path;
use crate::extract::{apply_plugin_strings, PluginString};
use crate::import::{ImportEvent, ImportRunner};
use crate::reconcile::RecordPatch;
use crate::record::{Status, StringRecord};

// ─── Status summary ──────────────────────────────────────────────────

/// Per-status record counts, for the host's status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub untranslated: usize,
    pub incomplete: usize,
    pub complete: usize,
    pub no_translation_required: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.untranslated + self.incomplete + self.complete + self.no_translation_required
    }
}

// ─── Session ─────────────────────────────────────────────────────────

/// One open translation, as the host editor drives it: the live record
/// collection, the import slot, and unsaved-change tracking.
///
/// All mutation happens here, on the owning thread. Import workers only ever
/// see a snapshot and hand back patches through `poll`.
pub struct EditorSession {
    /// Plugin name, used for the export file name.
    name: String,
    records: Vec<StringRecord>,
    runner: ImportRunner,
    config: ImporterConfig,
    changes_pending: bool,
}

impl EditorSession {
    pub fn new(
        name: impl Into<String>,
        records: Vec<StringRecord>,
        config: ImporterConfig,
    ) -> EditorSession {
        EditorSession {
            name: name.into(),
            records,
            runner: ImportRunner::new(),
            config,
            changes_pending: false,
        }
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    // ─── Async import ────────────────────────────────────────────────

    /// Kick off a background import of `path`. Fire-and-forget: results come
    /// back through `poll`. Fails with `ImportInProgress` while one runs.
    pub fn start_import(&mut self, path: PathBuf) -> Result<(), ImportError> {
        self.runner.start(path, self.records.clone())
    }

    pub fn import_running(&self) -> bool {
        self.runner.is_running()
    }

    pub fn cancel_import(&self) {
        self.runner.cancel();
    }

    /// Drain pending import events, applying any completed patch batch to the
    /// records. Call once per host frame/tick. The returned events drive the
    /// progress indicator and diagnostics; `Finished` means the slot is free.
    pub fn poll(&mut self) -> Vec<ImportEvent> {
        let events = self.runner.poll();
        for event in &events {
            if let ImportEvent::Completed { patches } = event {
                self.apply_patches(patches);
            }
        }
        events
    }

    fn apply_patches(&mut self, patches: &[RecordPatch]) {
        for patch in patches {
            match self.records.get_mut(patch.record) {
                Some(record) => {
                    record.translated_string = Some(patch.translation.clone());
                    record.status = patch.status;
                }
                None => warn!("Dropping patch for out-of-range record {}", patch.record),
            }
        }
        if !patches.is_empty() {
            self.changes_pending = true;
            info!("Applied {} imported patch(es)", patches.len());
        }
    }

    // ─── Synchronous plugin import ───────────────────────────────────

    /// Fill records from a translated plugin's strings, using the configured
    /// match mode. Returns how many records were filled.
    pub fn apply_plugin_strings(&mut self, strings: &[PluginString]) -> usize {
        let applied = apply_plugin_strings(&mut self.records, strings, self.config.match_mode);
        if applied > 0 {
            self.changes_pending = true;
        }
        applied
    }

    // ─── Export ──────────────────────────────────────────────────────

    /// Export to `<export_dir>/<name>.json`, returning the written path.
    pub fn export(&self, full: bool) -> Result<PathBuf, ExportError> {
        let path = self.config.export_dir.join(format!("{}.json", self.name));
        export_to_path(&self.records, full, &path)?;
        Ok(path)
    }

    // ─── Change tracking ─────────────────────────────────────────────

    pub fn changes_pending(&self) -> bool {
        self.changes_pending
    }

    pub fn mark_saved(&mut self) {
        self.changes_pending = false;
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for record in &self.records {
            match record.status {
                Status::Untranslated => counts.untranslated += 1,
                Status::TranslationIncomplete => counts.incomplete += 1,
                Status::TranslationComplete => counts.complete += 1,
                Status::NoTranslationRequired => counts.no_translation_required += 1,
            }
        }
        counts
    }
}
