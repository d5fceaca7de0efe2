//! JSON state files under a state directory.

use crate::history::ScanHistory;
use crate::protection::ProtectionState;
use crate::scanner::ScanOutcome;
use crate::{SentinelError, SentinelResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

const PROTECTION_FILE: &str = "protection.json";
const HISTORY_FILE: &str = "history.json";

pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saved protection state, or defaults when none exists yet
    pub fn load_protection(&self) -> SentinelResult<ProtectionState> {
        Ok(read_json(&self.dir.join(PROTECTION_FILE))?.unwrap_or_default())
    }

    pub fn save_protection(&self, state: &ProtectionState) -> SentinelResult<()> {
        write_json(&self.dir.join(PROTECTION_FILE), state)
    }

    /// Saved history; a first run starts from the demo scans when asked to
    pub fn load_history(&self, seed_sample_data: bool) -> SentinelResult<ScanHistory> {
        match read_json(&self.dir.join(HISTORY_FILE))? {
            Some(history) => Ok(history),
            None if seed_sample_data => Ok(ScanHistory::with_sample_data()),
            None => Ok(ScanHistory::new()),
        }
    }

    pub fn save_history(&self, history: &ScanHistory) -> SentinelResult<()> {
        write_json(&self.dir.join(HISTORY_FILE), history)
    }
}

/// Write a scan outcome as a standalone JSON report
pub fn write_report(outcome: &ScanOutcome, path: &Path) -> SentinelResult<()> {
    log::info!("Writing JSON results to: {:?}", path);
    write_json(path, outcome)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> SentinelResult<Option<T>> {
    if !path.exists() {
        log::debug!("No state file at {:?}", path);
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| SentinelError::io(e, Some(path.to_path_buf())))?;
    Ok(Some(serde_json::from_str(&raw)?))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> SentinelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| SentinelError::io(e, Some(parent.to_path_buf())))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| SentinelError::io(e, Some(path.to_path_buf())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_load_defaults() -> SentinelResult<()> {
        let temp_dir = TempDir::new()?;
        let store = StateStore::new(temp_dir.path());

        assert_eq!(store.load_protection()?.features.len(), 6);
        assert_eq!(store.load_history(true)?.len(), 4);
        assert!(store.load_history(false)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_state_survives_reload() -> SentinelResult<()> {
        let temp_dir = TempDir::new()?;
        let store = StateStore::new(temp_dir.path().join("nested"));

        let mut protection = ProtectionState::default();
        protection.toggle_feature("web-shield", Utc::now())?;
        protection.toggle_ai_learning();
        store.save_protection(&protection)?;

        let history = ScanHistory::with_sample_data();
        store.save_history(&history)?;

        assert_eq!(store.load_protection()?, protection);
        assert_eq!(store.load_history(false)?, history);
        Ok(())
    }

    #[test]
    fn test_corrupt_state_is_an_error() -> SentinelResult<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(temp_dir.path().join(HISTORY_FILE), "{not json")?;
        let store = StateStore::new(temp_dir.path());

        assert!(matches!(store.load_history(true), Err(SentinelError::Json(_))));
        Ok(())
    }
}
