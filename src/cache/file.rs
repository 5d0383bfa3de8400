use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{CacheError, PersistentCache};

/// Directory-backed cache: one file per key.
///
/// Writes go to a sibling temp file and are renamed into place, so a crash
/// mid-write leaves the previous blob intact.
#[derive(Clone, Debug)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys map to file names one-to-one: bytes outside `[A-Za-z0-9_-]` are
    /// written as `%XX`, so no two keys share a file and none leave `dir`.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
                file_name.push(byte as char);
            } else {
                file_name.push_str(&format!("%{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl PersistentCache for FileCache {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::read(key, e.to_string())),
        }
    }

    async fn write(&self, key: &str, blob: Vec<u8>) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CacheError::write(key, e.to_string()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, blob)
            .await
            .map_err(|e| CacheError::write(key, e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| CacheError::write(key, e.to_string()))
    }
}
