//! File-backed sent-quotes cache
//!
//! One JSON record per request id under the data directory, recording which
//! vendors a quote-request email went out to. This is a fallback, never the
//! source of truth: live quotation rows win whenever the backend answers.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use procura_core::ports::SentQuotesStore;
use procura_domain::{ProcuraError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
struct SentQuotesRecord {
    request_id: String,
    vendors: Vec<String>,
    updated_at: DateTime<Utc>,
}

/// Per-request sent-quotes records stored as JSON files.
pub struct FileSentQuotesStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSentQuotesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            ProcuraError::Config(format!(
                "cannot create data directory {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir, write_lock: Mutex::new(()) })
    }

    fn record_path(&self, request_id: &str) -> PathBuf {
        let safe: String = request_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("sent-quotes-{safe}.json"))
    }

    fn read_record(path: &Path) -> Option<SentQuotesRecord> {
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "discarding corrupt sent-quotes record");
                None
            }
        }
    }
}

#[async_trait]
impl SentQuotesStore for FileSentQuotesStore {
    async fn load(&self, request_id: &str) -> Result<Option<Vec<String>>> {
        let path = self.record_path(request_id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Self::read_record(&path).map(|record| record.vendors))
    }

    async fn store(&self, request_id: &str, vendors: &[String]) -> Result<()> {
        let record = SentQuotesRecord {
            request_id: request_id.to_string(),
            vendors: vendors.to_vec(),
            updated_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&record)
            .map_err(|e| ProcuraError::Internal(format!("cannot serialize record: {e}")))?;

        let path = self.record_path(request_id);
        let tmp = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock();
        fs::write(&tmp, contents)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|e| ProcuraError::Internal(format!("cannot write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSentQuotesStore::new(dir.path()).unwrap();

        let vendors = vec!["Acme".to_string(), "Globex".to_string()];
        store.store("REQ-2024-001", &vendors).await.unwrap();
        assert_eq!(store.load("REQ-2024-001").await.unwrap(), Some(vendors));
    }

    #[tokio::test]
    async fn missing_records_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSentQuotesStore::new(dir.path()).unwrap();
        assert_eq!(store.load("REQ-2024-404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_records_are_discarded_silently() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSentQuotesStore::new(dir.path()).unwrap();
        store.store("REQ-2024-002", &["Acme".to_string()]).await.unwrap();

        let path = store.record_path("REQ-2024-002");
        fs::write(&path, "{broken").unwrap();
        assert_eq!(store.load("REQ-2024-002").await.unwrap(), None);
    }

    #[tokio::test]
    async fn request_ids_with_odd_characters_get_safe_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSentQuotesStore::new(dir.path()).unwrap();
        store.store("REQ/2024\\007", &["Acme".to_string()]).await.unwrap();
        assert_eq!(
            store.load("REQ/2024\\007").await.unwrap(),
            Some(vec!["Acme".to_string()])
        );
    }
}
