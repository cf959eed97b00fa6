//! # Record Storage
//!
//! Whole-collection persistence. A store never patches its backing file; it
//! reads every record on each request and rewrites every record on each
//! mutation.
//!
//! Two text layouts are supported:
//!
//! - [`StorageFormat::JsonArray`]: a pretty-printed JSON array.
//! - [`StorageFormat::JsonLines`]: one compact JSON object per line.
//!
//! Loading is forgiving: a missing or malformed file yields an empty
//! collection, because the next successful write recreates it. Writing is
//! not: a failed persist is returned to the caller.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;
use tracing::{debug, warn};

/// Errors raised while reading or writing a collection.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize records: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Text layout of a persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageFormat {
    #[default]
    JsonArray,
    JsonLines,
}

impl StorageFormat {
    pub fn encode<T: Serialize>(self, records: &[T]) -> Result<String, serde_json::Error> {
        match self {
            StorageFormat::JsonArray => serde_json::to_string_pretty(records),
            StorageFormat::JsonLines => {
                let mut out = String::new();
                for record in records {
                    out.push_str(&serde_json::to_string(record)?);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    pub fn decode<T: DeserializeOwned>(self, text: &str) -> Result<Vec<T>, serde_json::Error> {
        match self {
            StorageFormat::JsonArray => serde_json::from_str(text),
            StorageFormat::JsonLines => text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(serde_json::from_str)
                .collect(),
        }
    }
}

/// A storage format name that is neither JSON array nor JSON lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage format '{0}' (expected json or jsonl)")]
pub struct UnknownFormat(pub String);

impl FromStr for StorageFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "array" => Ok(StorageFormat::JsonArray),
            "jsonl" | "lines" | "ndjson" => Ok(StorageFormat::JsonLines),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Backing store for one collection of records.
#[async_trait]
pub trait RecordStorage<T>: Send + Sync {
    /// Every persisted record, in persisted order. Read and parse failures
    /// are logged and yield an empty collection.
    async fn load_all(&self) -> Vec<T>;

    /// Replace the persisted collection with `records`.
    async fn persist(&self, records: &[T]) -> Result<(), StorageError>;
}

/// Collection stored in a single file, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    format: StorageFormat,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>, format: StorageFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> StorageFormat {
        self.format
    }

    /// Sibling written before the rename: the full file name plus `.tmp`,
    /// so `shop.json` and `shop.jsonl` never share one.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn try_load<T: DeserializeOwned>(&self) -> Result<Vec<T>, StorageError> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                location: self.location(),
                source,
            })?;
        self.format.decode(&text).map_err(|source| StorageError::Parse {
            location: self.location(),
            source,
        })
    }

    async fn atomic_write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            location: self.location(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, bytes).await.map_err(write_err)?;
        fs::rename(&tmp, &self.path).await.map_err(write_err)?;
        Ok(())
    }
}

#[async_trait]
impl<T> RecordStorage<T> for JsonFileStorage
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load_all(&self) -> Vec<T> {
        match self.try_load().await {
            Ok(records) => records,
            Err(StorageError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No backing file yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable backing file, starting empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, records: &[T]) -> Result<(), StorageError> {
        let text = self.format.encode(records).map_err(StorageError::Serialize)?;
        self.atomic_write(text.as_bytes()).await?;
        debug!(path = %self.path.display(), size = records.len(), "Persisted");
        Ok(())
    }
}

/// In-memory storage holding the serialized collection text.
///
/// Clones share the same contents, so a test can keep one handle to inspect
/// or corrupt the "file" while the actor owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    format: StorageFormat,
    contents: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new(format: StorageFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Current persisted text, `None` if nothing was ever written.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrite the persisted text directly.
    pub fn set_contents(&self, text: impl Into<String>) {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.into());
    }

    /// Make every subsequent `persist` fail until switched back.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T> RecordStorage<T> for MemoryStorage
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load_all(&self) -> Vec<T> {
        let Some(text) = self.contents() else {
            return Vec::new();
        };
        match self.format.decode(&text) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Unparseable in-memory collection, starting empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, records: &[T]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                location: "memory".to_string(),
                source: std::io::Error::other("writes disabled"),
            });
        }
        let text = self.format.encode(records).map_err(StorageError::Serialize)?;
        self.set_contents(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        n: u32,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "a".into(), n: 1 },
            Row { id: "b".into(), n: 2 },
        ]
    }

    #[test]
    fn test_json_lines_one_record_per_line() {
        let text = StorageFormat::JsonLines.encode(&rows()).unwrap();
        assert_eq!(text, "{\"id\":\"a\",\"n\":1}\n{\"id\":\"b\",\"n\":2}\n");
    }

    #[test]
    fn test_json_lines_skips_blank_lines() {
        let text = "\n{\"id\":\"a\",\"n\":1}\n   \n{\"id\":\"b\",\"n\":2}";
        let decoded: Vec<Row> = StorageFormat::JsonLines.decode(text).unwrap();
        assert_eq!(decoded, rows());
    }

    #[test]
    fn test_json_array_is_pretty_printed() {
        let text = StorageFormat::JsonArray.encode(&rows()).unwrap();
        assert!(text.starts_with("[\n  {"));
        let decoded: Vec<Row> = StorageFormat::JsonArray.decode(&text).unwrap();
        assert_eq!(decoded, rows());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<StorageFormat>(), Ok(StorageFormat::JsonArray));
        assert_eq!("JSONL".parse::<StorageFormat>(), Ok(StorageFormat::JsonLines));
        assert_eq!(
            "yaml".parse::<StorageFormat>(),
            Err(UnknownFormat("yaml".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("absent.json"), StorageFormat::JsonArray);
        let loaded: Vec<Row> = storage.load_all().await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, "[{\"id\": \"a\", ").unwrap();
        let storage = JsonFileStorage::new(&path, StorageFormat::JsonArray);
        let loaded: Vec<Row> = storage.load_all().await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_persist_creates_parent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rows.jsonl");
        let storage = JsonFileStorage::new(&path, StorageFormat::JsonLines);

        RecordStorage::<Row>::persist(&storage, &rows()).await.unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested").join("rows.jsonl.tmp").exists());
        let loaded: Vec<Row> = storage.load_all().await;
        assert_eq!(loaded, rows());
    }

    #[test]
    fn test_temp_path_keeps_full_file_name() {
        let json = JsonFileStorage::new("/data/shop.json", StorageFormat::JsonArray);
        let lines = JsonFileStorage::new("/data/shop.jsonl", StorageFormat::JsonLines);
        assert_eq!(json.temp_path(), PathBuf::from("/data/shop.json.tmp"));
        assert_ne!(json.temp_path(), lines.temp_path());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_stem_files_written_concurrently() {
        let dir = tempfile::tempdir().unwrap();
        let array = JsonFileStorage::new(dir.path().join("shop.json"), StorageFormat::JsonArray);
        let lines = JsonFileStorage::new(dir.path().join("shop.jsonl"), StorageFormat::JsonLines);

        let first = vec![Row { id: "array".into(), n: 0 }];
        let second = vec![Row { id: "lines".into(), n: 0 }];
        let writer = |storage: JsonFileStorage, rows: Vec<Row>| {
            tokio::spawn(async move {
                for _ in 0..100 {
                    RecordStorage::<Row>::persist(&storage, &rows).await.unwrap();
                }
            })
        };
        let a = writer(array.clone(), first.clone());
        let b = writer(lines.clone(), second.clone());
        a.await.unwrap();
        b.await.unwrap();

        let loaded: Vec<Row> = array.load_all().await;
        assert_eq!(loaded, first);
        let loaded: Vec<Row> = lines.load_all().await;
        assert_eq!(loaded, second);
    }

    #[tokio::test]
    async fn test_reload_and_persist_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let storage = JsonFileStorage::new(&path, StorageFormat::JsonArray);
        RecordStorage::<Row>::persist(&storage, &rows()).await.unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        let loaded: Vec<Row> = storage.load_all().await;
        RecordStorage::<Row>::persist(&storage, &loaded).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[tokio::test]
    async fn test_memory_storage_write_failure() {
        let storage = MemoryStorage::default();
        storage.fail_writes(true);
        let result = RecordStorage::<Row>::persist(&storage, &rows()).await;
        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert!(storage.contents().is_none());
    }
}
