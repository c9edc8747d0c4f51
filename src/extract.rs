use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::record::{Status, StringRecord};

// ─── Plugin strings ──────────────────────────────────────────────────

/// One string extracted from an already-translated plugin file. Its
/// `original_string` carries the translated text, because the plugin it came
/// from is the translated one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginString {
    #[serde(default)]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub index: Option<u32>,
    pub original_string: String,
}

/// Which structural fields identify a record when matching plugin strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Key by `(editor_id, type)`. Records without an editor id are skipped.
    EditorId,
    /// Key by `(editor_id, form_id, type)`.
    EditorIdFormId,
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::EditorIdFormId
    }
}

pub type MatchKey = (Option<String>, Option<String>, String);

fn key_for(
    editor_id: &Option<String>,
    form_id: &Option<String>,
    kind: &str,
    mode: MatchMode,
) -> MatchKey {
    match mode {
        MatchMode::EditorId => (editor_id.clone(), None, kind.to_owned()),
        MatchMode::EditorIdFormId => (editor_id.clone(), form_id.clone(), kind.to_owned()),
    }
}

/// Group plugin strings by their match key. One key can collect several
/// strings (INFO responses, quest stages); `index` disambiguates later.
pub fn group_by_key(
    strings: &[PluginString],
    mode: MatchMode,
) -> HashMap<MatchKey, Vec<&PluginString>> {
    let mut groups: HashMap<MatchKey, Vec<&PluginString>> = HashMap::new();
    for string in strings {
        let key = key_for(&string.editor_id, &string.form_id, &string.kind, mode);
        groups.entry(key).or_default().push(string);
    }
    groups
}

// ─── Matching ────────────────────────────────────────────────────────

/// Fill records from a translated plugin's strings. Synchronous; mutates the
/// records in place and returns how many were filled.
///
/// Complete records are left alone. A key with several candidates is resolved
/// by `index` equality; a lone candidate matches regardless of index.
pub fn apply_plugin_strings(
    records: &mut [StringRecord],
    strings: &[PluginString],
    mode: MatchMode,
) -> usize {
    let groups = group_by_key(strings, mode);
    let mut applied = 0usize;

    for record in records.iter_mut() {
        if record.status.is_final() {
            continue;
        }
        if mode == MatchMode::EditorId && record.editor_id.is_none() {
            continue;
        }

        let key = key_for(&record.editor_id, &record.form_id, &record.kind, mode);
        let Some(candidates) = groups.get(&key) else {
            continue;
        };

        let candidate = if candidates.len() > 1 {
            match candidates.iter().find(|c| c.index == record.index) {
                Some(candidate) => *candidate,
                None => continue,
            }
        } else {
            candidates[0]
        };

        record.translated_string = Some(candidate.original_string.clone());
        record.status = Status::TranslationIncomplete;
        applied += 1;
    }

    info!(
        "Matched {} of {} record(s) against {} plugin string(s)",
        applied,
        records.len(),
        strings.len()
    );
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(editor_id: &str, kind: &str, original: &str) -> StringRecord {
        StringRecord {
            editor_id: Some(editor_id.into()),
            ..StringRecord::new(kind, original)
        }
    }

    fn plugin_string(editor_id: &str, kind: &str, text: &str) -> PluginString {
        PluginString {
            editor_id: Some(editor_id.into()),
            form_id: None,
            kind: kind.into(),
            index: None,
            original_string: text.into(),
        }
    }

    #[test]
    fn matches_by_editor_id_and_kind() {
        let mut records = vec![
            record("IronSword", "WEAP FULL", "Iron Sword"),
            record("IronShield", "ARMO FULL", "Iron Shield"),
        ];
        let strings = vec![plugin_string("IronSword", "WEAP FULL", "Eisenschwert")];

        let applied = apply_plugin_strings(&mut records, &strings, MatchMode::EditorId);
        assert_eq!(applied, 1);
        assert_eq!(records[0].translated_string.as_deref(), Some("Eisenschwert"));
        assert_eq!(records[0].status, Status::TranslationIncomplete);
        assert_eq!(records[1].translated_string, None);
    }

    #[test]
    fn form_id_mode_separates_same_editor_id() {
        let mut a = record("Greeting", "INFO NAM1", "Hello");
        a.form_id = Some("00012345".into());
        let mut b = record("Greeting", "INFO NAM1", "Goodbye");
        b.form_id = Some("00012346".into());
        let mut records = vec![a, b];

        let mut s = plugin_string("Greeting", "INFO NAM1", "Hallo");
        s.form_id = Some("00012345".into());
        let strings = vec![s];

        let applied = apply_plugin_strings(&mut records, &strings, MatchMode::EditorIdFormId);
        assert_eq!(applied, 1);
        assert_eq!(records[0].translated_string.as_deref(), Some("Hallo"));
        assert_eq!(records[1].translated_string, None);
    }

    #[test]
    fn ambiguous_key_is_resolved_by_index() {
        let mut first = record("Greeting", "INFO NAM1", "Hello");
        first.index = Some(0);
        let mut second = record("Greeting", "INFO NAM1", "Hello again");
        second.index = Some(1);
        let mut records = vec![first, second];

        let mut s0 = plugin_string("Greeting", "INFO NAM1", "Hallo");
        s0.index = Some(0);
        let mut s1 = plugin_string("Greeting", "INFO NAM1", "Nochmal hallo");
        s1.index = Some(1);
        let strings = vec![s0, s1];

        let applied = apply_plugin_strings(&mut records, &strings, MatchMode::EditorId);
        assert_eq!(applied, 2);
        assert_eq!(records[0].translated_string.as_deref(), Some("Hallo"));
        assert_eq!(
            records[1].translated_string.as_deref(),
            Some("Nochmal hallo")
        );
    }

    #[test]
    fn unresolvable_ambiguity_is_skipped() {
        let mut target = record("Greeting", "INFO NAM1", "Hello");
        target.index = Some(7);
        let mut records = vec![target];

        let mut s0 = plugin_string("Greeting", "INFO NAM1", "Hallo");
        s0.index = Some(0);
        let mut s1 = plugin_string("Greeting", "INFO NAM1", "Nochmal hallo");
        s1.index = Some(1);
        let strings = vec![s0, s1];

        let applied = apply_plugin_strings(&mut records, &strings, MatchMode::EditorId);
        assert_eq!(applied, 0);
        assert_eq!(records[0].translated_string, None);
    }

    #[test]
    fn lone_candidate_matches_regardless_of_index() {
        let mut target = record("Greeting", "INFO NAM1", "Hello");
        target.index = Some(3);
        let mut records = vec![target];

        let mut s = plugin_string("Greeting", "INFO NAM1", "Hallo");
        s.index = Some(0);
        let strings = vec![s];

        let applied = apply_plugin_strings(&mut records, &strings, MatchMode::EditorId);
        assert_eq!(applied, 1);
    }

    #[test]
    fn editor_id_mode_skips_records_without_editor_id() {
        let mut records = vec![StringRecord::new("BOOK DESC", "Some text")];
        let strings = vec![PluginString {
            editor_id: None,
            form_id: None,
            kind: "BOOK DESC".into(),
            index: None,
            original_string: "Etwas Text".into(),
        }];

        assert_eq!(
            apply_plugin_strings(&mut records, &strings, MatchMode::EditorId),
            0
        );
        // The stricter key still allows a None/None match.
        assert_eq!(
            apply_plugin_strings(&mut records, &strings, MatchMode::EditorIdFormId),
            1
        );
    }

    #[test]
    fn complete_records_are_not_touched() {
        let mut done = record("IronSword", "WEAP FULL", "Iron Sword");
        done.translated_string = Some("validated".into());
        done.status = Status::TranslationComplete;
        let mut records = vec![done];

        let strings = vec![plugin_string("IronSword", "WEAP FULL", "Eisenschwert")];
        let applied = apply_plugin_strings(&mut records, &strings, MatchMode::EditorId);
        assert_eq!(applied, 0);
        assert_eq!(records[0].translated_string.as_deref(), Some("validated"));
    }
}
