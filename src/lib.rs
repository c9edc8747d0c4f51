//! Translation import and reconciliation for Bethesda plugin editing.
//!
//! The crate is the non-GUI half of a translation editor: it loads exported
//! translation files and legacy database dumps, reconciles them against the
//! session's string records on a background thread, matches strings pulled
//! from already-translated plugins, and exports the working set back to JSON.
//!
//! The host drives everything through [`EditorSession`]: start an import,
//! poll events each frame, apply plugin strings, export. Workers never touch
//! live records; they hand back patch batches over a channel.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod import;
pub mod logging;
pub mod reconcile;
pub mod record;
pub mod session;
pub mod source;

pub use config::ImporterConfig;
pub use error::{ExportError, ImportError};
pub use extract::{MatchMode, PluginString};
pub use import::{ImportEvent, ImportRunner};
pub use reconcile::{ReconcilePolicy, RecordPatch};
pub use record::{Status, StringRecord};
pub use session::{EditorSession, StatusCounts};
pub use source::{LoadedSource, SourceKind, TranslationEntry};
