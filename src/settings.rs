//! Persistent user settings, backed by sled.
//!
//! Two values survive across sessions: the Gemini API key and the preferred
//! summary length. They are stored as plain UTF-8 strings under fixed keys so
//! the on-disk schema stays trivially inspectable.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const KEY_API_KEY: &str = "apiKey";
const KEY_SUMMARY_LENGTH: &str = "summaryLength";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("database error: {0}")]
    DbError(#[from] sled::Error),
}

/// Requested verbosity of the generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Parse a stored value. Anything unrecognized falls back to `Medium`.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "short" => SummaryLength::Short,
            "long" => SummaryLength::Long,
            _ => SummaryLength::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user-configurable settings read before every summarisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Gemini API key. Empty when not configured yet.
    pub api_key: String,
    pub summary_length: SummaryLength,
}

/// Sled-based store for [`Settings`].
///
/// `get` never fails on missing data: absent keys yield the defaults (empty
/// key, medium length). Validation of the key itself is the caller's job.
pub struct SettingsStore {
    db: sled::Db,
}

impl SettingsStore {
    /// Open or create the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// The per-user default location for the settings database.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagebrief")
            .join("settings")
    }

    /// Read the current settings.
    pub fn get(&self) -> Result<Settings, SettingsError> {
        let api_key = self
            .read_string(KEY_API_KEY)?
            .unwrap_or_default();
        let summary_length = self
            .read_string(KEY_SUMMARY_LENGTH)?
            .map(|v| SummaryLength::from_stored(&v))
            .unwrap_or_default();

        Ok(Settings {
            api_key,
            summary_length,
        })
    }

    /// Persist the settings, overwriting any previous values.
    ///
    /// The API key is trimmed before storage; no further validation happens
    /// here.
    pub fn set(&self, settings: &Settings) -> Result<(), SettingsError> {
        self.db
            .insert(KEY_API_KEY, settings.api_key.trim().as_bytes())?;
        self.db.insert(
            KEY_SUMMARY_LENGTH,
            settings.summary_length.as_str().as_bytes(),
        )?;
        self.db.flush()?;
        Ok(())
    }

    fn read_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self
            .db
            .get(key)?
            .map(|v| String::from_utf8_lossy(&v).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("settings")).unwrap();
        (dir, store)
    }

    #[test]
    fn defaults_when_nothing_stored() {
        let (_dir, store) = open_store();
        let settings = store.get().unwrap();
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.summary_length, SummaryLength::Medium);
    }

    #[test]
    fn round_trip() {
        let (_dir, store) = open_store();
        store
            .set(&Settings {
                api_key: "k".to_string(),
                summary_length: SummaryLength::Long,
            })
            .unwrap();

        let settings = store.get().unwrap();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.summary_length, SummaryLength::Long);
    }

    #[test]
    fn api_key_is_trimmed_on_save() {
        let (_dir, store) = open_store();
        store
            .set(&Settings {
                api_key: "  AIza-secret  ".to_string(),
                summary_length: SummaryLength::Short,
            })
            .unwrap();

        assert_eq!(store.get().unwrap().api_key, "AIza-secret");
    }

    #[test]
    fn overwrite_keeps_last_value() {
        let (_dir, store) = open_store();
        store
            .set(&Settings {
                api_key: "first".to_string(),
                summary_length: SummaryLength::Short,
            })
            .unwrap();
        store
            .set(&Settings {
                api_key: "second".to_string(),
                summary_length: SummaryLength::Medium,
            })
            .unwrap();

        let settings = store.get().unwrap();
        assert_eq!(settings.api_key, "second");
        assert_eq!(settings.summary_length, SummaryLength::Medium);
    }

    #[test]
    fn unrecognized_length_falls_back_to_medium() {
        assert_eq!(SummaryLength::from_stored("short"), SummaryLength::Short);
        assert_eq!(SummaryLength::from_stored("long"), SummaryLength::Long);
        assert_eq!(SummaryLength::from_stored("medium"), SummaryLength::Medium);
        assert_eq!(SummaryLength::from_stored("verbose"), SummaryLength::Medium);
        assert_eq!(SummaryLength::from_stored(""), SummaryLength::Medium);
    }
}
