//! Append-only line writer with size-based rotation.
//!
//! When the trace file grows past [`MAX_FILE_SIZE_BYTES`] it is renamed to
//! `<name>.json.<unix seconds>` and a fresh file is started. Only the newest
//! [`MAX_BACKUP_FILES`] rotated files are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size at which the trace file is rotated (5 MiB).
const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

const MAX_BACKUP_FILES: usize = 3;

pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    /// Opened lazily on first write and dropped on rotation.
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes, rotating first if the file
    /// is over the size limit.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotation, opening, or writing, and an
    /// error if the internal lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self.file.lock().map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}"))
        })?;

        let over_limit = fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes);
        if over_limit {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?,
        };
        let file = guard.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let backup = self.file_path.with_extension(format!("json.{timestamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, backup)?;
        }
        self.prune_backups()
    }

    /// Deletes all but the newest [`MAX_BACKUP_FILES`] rotated files.
    fn prune_backups(&self) -> io::Result<()> {
        let Some(dir) = self.file_path.parent() else {
            return Ok(());
        };
        let Some(stem) = self.file_path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{stem}.json.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_backup(path, &prefix))
            .collect();

        backups.sort_by_key(|path| {
            std::cmp::Reverse(fs::metadata(path).and_then(|m| m.modified()).ok())
        });

        for stale in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

fn is_backup(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(prefix))
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
