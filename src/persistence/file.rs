//! JSON file persistence.
//!
//! Each collection lives in its own file inside the data directory, as a JSON
//! array of records. Writes go to a temporary file in the same directory which
//! is then renamed over the target, so readers never observe a half-written
//! snapshot. An advisory lock serializes writers across processes.

use super::{
    decode_collection, encode_collection, PersistenceAdapter, Snapshot, ENTRIES_COLLECTION,
    SUMMARIES_COLLECTION,
};
use crate::constants::{ENTRIES_FILE_NAME, LOCK_FILE_NAME, SUMMARIES_FILE_NAME};
use crate::errors::{AppError, AppResult, LockError, PersistenceError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Stores snapshots as `journal_entries.json` and `weekly_summaries.json`.
#[derive(Debug, Clone)]
pub struct JsonFileAdapter {
    data_dir: PathBuf,
}

impl JsonFileAdapter {
    /// Creates an adapter rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `AppError::Journal` if `data_dir` is not an absolute path
    /// - `AppError::Io` if the directory can't be created or secured
    pub fn open(data_dir: &Path) -> AppResult<Self> {
        ensure_data_directory_exists(data_dir)?;
        Ok(JsonFileAdapter {
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir.join(ENTRIES_FILE_NAME)
    }

    pub fn summaries_path(&self) -> PathBuf {
        self.data_dir.join(SUMMARIES_FILE_NAME)
    }

    fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE_NAME)
    }

    fn lock(&self) -> Result<SnapshotLock, LockError> {
        let path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!("Acquired snapshot lock {:?}", path);
                Ok(SnapshotLock { file, path })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(LockError::FileBusy { path })
            }
            Err(source) => Err(LockError::AcquisitionFailed { path, source }),
        }
    }
}

/// Releases the advisory lock when dropped.
struct SnapshotLock {
    file: File,
    path: PathBuf,
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release snapshot lock {:?}: {}", self.path, e);
        }
    }
}

impl PersistenceAdapter for JsonFileAdapter {
    fn load_all(&self) -> Snapshot {
        let entries = read_optional(&self.entries_path());
        let summaries = read_optional(&self.summaries_path());
        Snapshot {
            entries: decode_collection(entries.as_deref(), ENTRIES_COLLECTION),
            summaries: decode_collection(summaries.as_deref(), SUMMARIES_COLLECTION),
        }
    }

    /// Writes both collections under the snapshot lock.
    ///
    /// Each file is replaced atomically, but the pair is not: if the second
    /// write fails the files on disk come from different snapshots. Summaries
    /// are written first since completions are rarer than entry saves.
    fn save_all(&self, snapshot: &Snapshot) -> AppResult<()> {
        let entries = encode_collection(&snapshot.entries, ENTRIES_COLLECTION)?;
        let summaries = encode_collection(&snapshot.summaries, SUMMARIES_COLLECTION)?;

        let _lock = self.lock()?;
        write_atomically(&self.data_dir, &self.summaries_path(), &summaries)?;
        write_atomically(&self.data_dir, &self.entries_path(), &entries)?;
        debug!(
            "Saved {} entries and {} summaries",
            snapshot.entries.len(),
            snapshot.summaries.len()
        );
        Ok(())
    }
}

/// Ensures the data directory exists, creating it with owner-only permissions.
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Journal(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions =
                fs::Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to read snapshot {:?}, starting empty: {}", path, e);
            None
        }
    }
}

fn write_atomically(dir: &Path, target: &Path, contents: &str) -> Result<(), PersistenceError> {
    let write_error = |source: io::Error| PersistenceError::Write {
        path: target.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(contents.as_bytes()).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;

    #[cfg(unix)]
    {
        let permissions = fs::Permissions::from_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
        fs::set_permissions(temp.path(), permissions).map_err(write_error)?;
    }

    temp.persist(target).map_err(|e| write_error(e.error))?;
    Ok(())
}
