use log::debug;

use crate::record::{Status, StringRecord};
use crate::source::{LoadedSource, SourceKind, TranslationEntry};

// ─── Policy ──────────────────────────────────────────────────────────

/// How much an incoming source is trusted when it collides with work already
/// present in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// JSON exports: overwrite only when the incoming text actually differs
    /// from the record's source text, and mark the result as needing review.
    ConfirmBeforeOverwrite,
    /// Legacy database dumps: take the entry's translation and status verbatim.
    Authoritative,
}

impl ReconcilePolicy {
    pub fn for_source(kind: SourceKind) -> ReconcilePolicy {
        match kind {
            SourceKind::Json => ReconcilePolicy::ConfirmBeforeOverwrite,
            SourceKind::LegacyDb => ReconcilePolicy::Authoritative,
        }
    }
}

// ─── Patches ─────────────────────────────────────────────────────────

/// One pending mutation, produced off-thread and applied by the record owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPatch {
    /// Position of the record in the session's collection.
    pub record: usize,
    pub translation: String,
    pub status: Status,
}

/// Decide what, if anything, an incoming entry does to one record.
///
/// Records already marked `TranslationComplete` are never touched, under
/// either policy.
pub fn reconcile_record(
    record: &StringRecord,
    entry: &TranslationEntry,
    policy: ReconcilePolicy,
) -> Option<(String, Status)> {
    if record.status.is_final() {
        return None;
    }

    match policy {
        ReconcilePolicy::ConfirmBeforeOverwrite => {
            // An incoming "translation" identical to the source text means the
            // exporting session never translated the string.
            if entry.translation == record.original_string {
                None
            } else {
                Some((entry.translation.clone(), Status::TranslationIncomplete))
            }
        }
        ReconcilePolicy::Authoritative => {
            if entry.translation.is_empty() {
                None
            } else {
                Some((
                    entry.translation.clone(),
                    entry.status.unwrap_or(Status::TranslationComplete),
                ))
            }
        }
    }
}

/// Run one record through the source and collect the patch, if any.
/// Records the source has no entry for are silently left alone.
pub fn reconcile_one(
    index: usize,
    record: &StringRecord,
    source: &LoadedSource,
    policy: ReconcilePolicy,
) -> Option<RecordPatch> {
    let entry = source.get(&record.original_string)?;
    let (translation, status) = reconcile_record(record, entry, policy)?;
    Some(RecordPatch {
        record: index,
        translation,
        status,
    })
}

/// Reconcile every record against the source. Pure with respect to the
/// records: the result is a batch of patches, nothing is mutated here.
pub fn reconcile_all(records: &[StringRecord], source: &LoadedSource) -> Vec<RecordPatch> {
    let policy = ReconcilePolicy::for_source(source.kind);
    let patches: Vec<RecordPatch> = records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| reconcile_one(i, record, source, policy))
        .collect();
    debug!(
        "Reconciled {} record(s) against {} entrie(s): {} patch(es)",
        records.len(),
        source.len(),
        patches.len()
    );
    patches
}
