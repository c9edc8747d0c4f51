use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extract::MatchMode;

// ─── Persisted config ────────────────────────────────────────────────

const CONFIG_FILE: &str = "importer.toml";

/// Importer preferences, persisted as TOML in the host's data directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ImporterConfig {
    /// Default key scheme for plugin-string matching.
    pub match_mode: MatchMode,
    /// Where exported translation files land.
    pub export_dir: PathBuf,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::EditorIdFormId,
            export_dir: PathBuf::from("export"),
        }
    }
}

impl ImporterConfig {
    /// Load from `dir`, falling back to defaults (and writing them out) when
    /// the file is missing. A corrupt file also falls back to defaults.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                info!("Loaded importer config from {}", path.display());
                toml::from_str(&content).unwrap_or_default()
            }
            Err(_) => {
                info!("No importer config found, creating default config");
                let config = Self::default();
                config.save(dir);
                config
            }
        }
    }

    /// Preferences are best-effort: a failed save is logged, not propagated.
    pub fn save(&self, dir: &Path) {
        let path = dir.join(CONFIG_FILE);
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = std::fs::write(&path, content) {
                    error!("Failed to save importer config: {}", e);
                }
            }
            Err(e) => error!("Failed to serialize importer config: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_dir(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("esp-importer-config-{name}-{id}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_yields_defaults_and_writes_them() {
        let dir = test_dir("missing");
        let config = ImporterConfig::load(&dir);
        assert_eq!(config, ImporterConfig::default());
        assert!(dir.join(CONFIG_FILE).exists());
    }

    #[test]
    fn config_round_trips() {
        let dir = test_dir("roundtrip");
        let config = ImporterConfig {
            match_mode: MatchMode::EditorId,
            export_dir: PathBuf::from("out/translations"),
        };
        config.save(&dir);
        assert_eq!(ImporterConfig::load(&dir), config);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = test_dir("corrupt");
        std::fs::write(dir.join(CONFIG_FILE), "match_mode = 42").unwrap();
        assert_eq!(ImporterConfig::load(&dir), ImporterConfig::default());
    }
}
