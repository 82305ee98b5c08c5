use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{errors::StorageError, repositories::storage::StorageRepository};

/// One `<key>.json` file per key under `root`.
///
/// Writes go to a sibling temp file first and are renamed into place so a
/// crash mid-write never leaves a truncated blob behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| StorageError::Io {
            key: root.display().to_string(),
            message: e.to_string(),
        })?;

        info!("File storage ready at {}", root.display());
        Ok(FileStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, err: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        message: err.to_string(),
    }
}

impl StorageRepository for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp_path).map_err(|e| io_error(key, e))?;
        file.write_all(value.as_bytes()).map_err(|e| io_error(key, e))?;
        file.sync_all().map_err(|e| io_error(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| io_error(key, e))?;

        debug!(key, bytes = value.len(), "Persisted storage item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn check_connection(&self) -> Result<(), StorageError> {
        fs::metadata(&self.root)
            .map(|_| ())
            .map_err(|e| io_error(&self.root.display().to_string(), e))
    }
}
