use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use log::{error, info};

use crate::error::ImportError;
use crate::reconcile::{reconcile_one, ReconcilePolicy, RecordPatch};
use crate::record::StringRecord;
use crate::source::load_source;

// ─── Events ──────────────────────────────────────────────────────────

/// Messages a running import sends back to its owner.
///
/// Order per run: any number of `Progress`, then exactly one of `Completed`,
/// `Failed` or `Cancelled`, then `Finished`. `Finished` always arrives,
/// whatever happened before it.
#[derive(Debug)]
pub enum ImportEvent {
    /// Percentage in 0..=100, non-decreasing, reaches 100 before a
    /// successful `Completed`.
    Progress(u8),
    /// Load and reconciliation succeeded; the patches are ready to apply.
    Completed { patches: Vec<RecordPatch> },
    Failed(ImportError),
    Cancelled,
    Finished,
}

// ─── Runner ──────────────────────────────────────────────────────────

struct ActiveTask {
    handle: thread::JoinHandle<()>,
    cancel: Arc<AtomicBool>,
    events: Receiver<ImportEvent>,
}

/// Runs at most one import at a time on a background thread.
///
/// The runner never touches the live record collection: the worker computes a
/// patch batch from a snapshot and the owner applies it when it drains
/// `Completed` from `poll`.
pub struct ImportRunner {
    active: Option<ActiveTask>,
}

impl ImportRunner {
    pub fn new() -> ImportRunner {
        ImportRunner { active: None }
    }

    /// The slot stays occupied until `poll` drains the run's `Finished`.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Spawn a worker importing `path` against a snapshot of the records.
    /// Rejected while a previous run still occupies the slot.
    pub fn start(
        &mut self,
        path: PathBuf,
        records: Vec<StringRecord>,
    ) -> Result<(), ImportError> {
        if self.active.is_some() {
            return Err(ImportError::ImportInProgress);
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || run_import(&path, &records, &flag, &tx));

        self.active = Some(ActiveTask {
            handle,
            cancel,
            events: rx,
        });
        Ok(())
    }

    /// Request cancellation of the running import. The worker notices between
    /// records; no-op when idle.
    pub fn cancel(&self) {
        if let Some(task) = &self.active {
            task.cancel.store(true, Ordering::Relaxed);
        }
    }

    /// Drain pending events without blocking. Draining `Finished` reaps the
    /// worker thread and frees the slot for the next `start`.
    pub fn poll(&mut self) -> Vec<ImportEvent> {
        let Some(task) = &self.active else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let mut finished = false;
        while let Ok(event) = task.events.try_recv() {
            finished = matches!(event, ImportEvent::Finished);
            events.push(event);
            if finished {
                break;
            }
        }

        if finished {
            if let Some(task) = self.active.take() {
                if task.handle.join().is_err() {
                    error!("Import worker thread panicked");
                }
            }
        }
        events
    }
}

impl Default for ImportRunner {
    fn default() -> Self {
        ImportRunner::new()
    }
}

// ─── Worker ──────────────────────────────────────────────────────────

fn run_import(
    path: &Path,
    records: &[StringRecord],
    cancel: &AtomicBool,
    tx: &Sender<ImportEvent>,
) {
    // The owner may drop the receiver mid-run; sends failing then is fine.
    let send = |event: ImportEvent| {
        let _ = tx.send(event);
    };

    info!("Importing translations from {}", path.display());

    let source = match load_source(path) {
        Ok(source) => source,
        Err(err) => {
            error!("Import of {} failed: {}", path.display(), err);
            send(ImportEvent::Failed(err));
            send(ImportEvent::Finished);
            return;
        }
    };

    let total = records.len();
    if total == 0 || source.is_empty() {
        send(ImportEvent::Completed {
            patches: Vec::new(),
        });
        send(ImportEvent::Finished);
        return;
    }

    let policy = ReconcilePolicy::for_source(source.kind);
    let mut patches = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            info!(
                "Import of {} cancelled after {} of {} record(s)",
                path.display(),
                i,
                total
            );
            send(ImportEvent::Cancelled);
            send(ImportEvent::Finished);
            return;
        }

        if let Some(patch) = reconcile_one(i, record, &source, policy) {
            patches.push(patch);
        }
        send(ImportEvent::Progress(((i + 1) * 100 / total) as u8));
    }

    info!(
        "Import of {} complete: {} patch(es) for {} record(s)",
        path.display(),
        patches.len(),
        total
    );
    send(ImportEvent::Completed { patches });
    send(ImportEvent::Finished);
}
