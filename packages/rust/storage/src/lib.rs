//! JSON-file state store for the content record.
//!
//! The [`JsonFileStore`] keeps one [`ContentRecord`] as pretty-printed JSON
//! (`content.json` by default). Every stage of the wider content pipeline
//! reads and writes the same file, so fields this crate does not model are
//! carried through untouched.
//!
//! **Write rules:**
//! - Saves go to a sibling temp file which is then renamed over the target,
//!   so a failed save never leaves a truncated state file.
//! - [`JsonFileStore::init`] refuses to replace an existing file unless asked.

use std::path::{Path, PathBuf};

use chrono::Utc;
use scriptforge_shared::{ContentRecord, Result, ScriptForgeError, StateStore};
use tracing::{debug, info};

/// State store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `path`. Nothing is read or created until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the state file exists yet.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write a fresh record. Fails if the file exists and `overwrite` is false.
    pub fn init(&self, record: &ContentRecord, overwrite: bool) -> Result<()> {
        if self.exists() && !overwrite {
            return Err(ScriptForgeError::Storage(format!(
                "state file {} already exists (pass --force to replace it)",
                self.path.display()
            )));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ScriptForgeError::io(parent, e))?;
        }

        self.save(record)?;
        info!(path = %self.path.display(), search_term = %record.search_term, "initialized state file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "content.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<ContentRecord> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ScriptForgeError::io(&self.path, e))?;

        let record: ContentRecord = serde_json::from_str(&content).map_err(|e| {
            ScriptForgeError::Storage(format!("failed to parse {}: {e}", self.path.display()))
        })?;

        debug!(
            path = %self.path.display(),
            sentences = record.sentences.len(),
            "loaded content record"
        );
        Ok(record)
    }

    fn save(&self, record: &ContentRecord) -> Result<()> {
        let mut stamped = record.clone();
        stamped.updated_at = Some(Utc::now());

        let json = serde_json::to_string_pretty(&stamped)
            .map_err(|e| ScriptForgeError::Storage(format!("failed to serialize record: {e}")))?;

        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| ScriptForgeError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| ScriptForgeError::io(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            sentences = record.sentences.len(),
            "saved content record"
        );
        Ok(())
    }
}
