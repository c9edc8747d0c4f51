use serde::{Deserialize, Serialize};

// ─── Status ──────────────────────────────────────────────────────────

/// Translation status of a single string record.
///
/// Only `TranslationComplete` is final: automated imports never touch a
/// complete record. Everything else is fair game for overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// No translation yet.
    Untranslated,
    /// Machine- or import-supplied translation, not validated by the user.
    TranslationIncomplete,
    /// Validated by the user. Immune to automated overwrite.
    TranslationComplete,
    /// User marked the string as not needing translation.
    NoTranslationRequired,
}

impl Default for Status {
    fn default() -> Self {
        Status::Untranslated
    }
}

impl Status {
    pub fn is_final(self) -> bool {
        self == Status::TranslationComplete
    }
}

// ─── StringRecord ────────────────────────────────────────────────────

/// One translatable string as held by the editor session.
///
/// `original_string` is the natural lookup key within a session. The
/// structural fields (`editor_id`, `form_id`, `kind`, `index`) disambiguate
/// records that share the same original text and drive plugin-based matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Editor ID from the plugin record. Can be a FormID for dialogue and
    /// quest strings, and is absent for some record types.
    #[serde(default)]
    pub editor_id: Option<String>,

    #[serde(default)]
    pub form_id: Option<String>,

    /// Record/subrecord scheme, e.g. "WEAP FULL".
    #[serde(rename = "type")]
    pub kind: String,

    /// String index within the record (INFO and QUST only).
    #[serde(default)]
    pub index: Option<u32>,

    /// Source-language text. Immutable once loaded.
    pub original_string: String,

    /// None while the string has no translation.
    #[serde(default)]
    pub translated_string: Option<String>,

    #[serde(default)]
    pub status: Status,
}

impl StringRecord {
    /// Bare record with only the fields every string has.
    pub fn new(kind: impl Into<String>, original: impl Into<String>) -> Self {
        StringRecord {
            editor_id: None,
            form_id: None,
            kind: kind.into(),
            index: None,
            original_string: original.into(),
            translated_string: None,
            status: Status::Untranslated,
        }
    }
}
