//! Persisted UI preferences
//!
//! The selected language is the only client-side persisted state. It is
//! stored under a single key in a small JSON file; unrecognized or
//! missing values fall back to the default language.

use crate::AppResult;
use serde::{Deserialize, Serialize};
use shared::i18n::{set_language, Language};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    language: String,
}

/// UI preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
}

impl Preferences {
    /// Load preferences from a file
    ///
    /// A missing or unreadable file yields the defaults; a value outside
    /// the closed language set falls back to the default language.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str::<PrefsFile>(&raw) {
            Ok(file) => Self {
                language: Language::from_persisted(&file.language),
            },
            Err(error) => {
                tracing::warn!(%error, "preferences file unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Save preferences to a file
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = PrefsFile {
            language: self.language.as_str().to_string(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| shared::MarketError::backend(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply the stored selection to the process-wide language
    pub fn apply(&self) {
        set_language(self.language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let prefs = Preferences {
            language: Language::En,
        };
        prefs.save(&path).unwrap();

        assert_eq!(Preferences::load(&path), prefs);
    }

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Preferences::load(&dir.path().join("missing.json"));
        assert_eq!(loaded.language, Language::Pt);
    }

    #[test]
    fn test_unrecognized_value_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"language":"de"}"#).unwrap();

        assert_eq!(Preferences::load(&path).language, Language::Pt);
    }
}
