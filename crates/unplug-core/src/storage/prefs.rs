//! Persistent quiz-outcome preferences.
//!
//! Two values survive restarts: whether the quiz has been completed and
//! the resolved personality label. They are written together once at quiz
//! completion, read at every launch, and cleared only by an explicit
//! reset. Callers load the struct at startup and pass it around -- there
//! is no ambient global state.
//!
//! Stored as TOML at `~/.config/unplug/prefs.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::error::PrefsError;
use crate::personality::PersonalityLabel;

const PREFS_FILE: &str = "prefs.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    has_completed_test: bool,
    #[serde(default)]
    final_personality: Option<PersonalityLabel>,
}

impl Preferences {
    fn path() -> Result<PathBuf, PrefsError> {
        let dir = data_dir().map_err(|e| PrefsError::LoadFailed {
            path: PathBuf::from(PREFS_FILE),
            message: e.to_string(),
        })?;
        Ok(dir.join(PREFS_FILE))
    }

    /// Load from the default location; defaults when the file is absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, PrefsError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path; defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, PrefsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| PrefsError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), PrefsError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), PrefsError> {
        let content = toml::to_string_pretty(self).map_err(|e| PrefsError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| PrefsError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn has_completed_test(&self) -> bool {
        self.has_completed_test
    }

    pub fn personality(&self) -> Option<&PersonalityLabel> {
        self.final_personality.as_ref()
    }

    /// Display-facing label with a caller-chosen fallback.
    pub fn personality_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.final_personality
            .as_ref()
            .map(|label| label.as_str())
            .unwrap_or(fallback)
    }

    /// The single writer: mark completion and store the label together.
    pub fn complete(&mut self, label: PersonalityLabel) {
        debug!(%label, "storing quiz result");
        self.has_completed_test = true;
        self.final_personality = Some(label);
    }

    /// Explicit reset back to defaults -- the only deletion path.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_incomplete_and_unlabeled() {
        let prefs = Preferences::default();
        assert!(!prefs.has_completed_test());
        assert!(prefs.personality().is_none());
        assert_eq!(prefs.personality_or("Unknown"), "Unknown");
    }

    #[test]
    fn complete_sets_flag_and_label_together() {
        let mut prefs = Preferences::default();
        prefs.complete("ENTP".parse().unwrap());
        assert!(prefs.has_completed_test());
        assert_eq!(prefs.personality_or("Unknown"), "ENTP");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut prefs = Preferences::default();
        prefs.complete("ENTP".parse().unwrap());
        prefs.reset();
        assert!(!prefs.has_completed_test());
        assert!(prefs.personality().is_none());
    }

    #[test]
    fn disk_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut prefs = Preferences::load_from(&path).unwrap();
        assert!(!prefs.has_completed_test());

        prefs.complete("ISFP".parse().unwrap());
        prefs.save_to(&path).unwrap();

        let reloaded = Preferences::load_from(&path).unwrap();
        assert!(reloaded.has_completed_test());
        assert_eq!(reloaded.personality_or("Unknown"), "ISFP");
    }

    #[test]
    fn garbled_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "has_completed_test = \"not a bool\"").unwrap();
        assert!(matches!(
            Preferences::load_from(&path),
            Err(PrefsError::LoadFailed { .. })
        ));
    }

    #[test]
    fn invalid_stored_label_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(
            &path,
            "has_completed_test = true\nfinal_personality = \"WXYZ\"",
        )
        .unwrap();
        assert!(Preferences::load_from(&path).is_err());
    }
}
