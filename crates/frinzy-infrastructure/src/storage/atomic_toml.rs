//! Crash-safe TOML documents.
//!
//! Writes go to a sibling temp file which is synced and renamed over the
//! target. Read-modify-write cycles hold an exclusive `fs2` lock on a
//! `.lock` companion file.

use std::fs::{self, File, OpenOptions};
use std::io::Write as _;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use frinzy_core::{FrinzyError, Result};
use serde::{Serialize, de::DeserializeOwned};

pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing or blank file yields `T::default()`.
    pub fn load(&self) -> Result<T> {
        if !self.path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(toml::from_str(&content)?)
    }

    /// Replaces the document atomically.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(data)?;
        let tmp_path = self.temp_path()?;
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(rendered.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Locked read-modify-write.
    ///
    /// The closure's error aborts the cycle without writing anything.
    pub fn update<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut data = self.load()?;
        let out = f(&mut data)?;
        self.save(&data)?;
        Ok(out)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| FrinzyError::io(format!("{} has no parent", self.path.display())))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| FrinzyError::io(format!("{} has no file name", self.path.display())))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock released on drop.
struct FileLock {
    _file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        use fs2::FileExt;

        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()
            .map_err(|e| FrinzyError::transient(format!("failed to lock {}: {}", lock_path.display(), e)))?;

        Ok(Self {
            _file: file,
            lock_path,
        })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(dir.path().join("missing.toml"));
        assert_eq!(file.load().unwrap(), Counter::default());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counter.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());

        file.save(&Counter {
            name: "likes".to_string(),
            count: 2,
        })
        .unwrap();

        assert!(path.exists());
        assert!(!dir.path().join(".counter.toml.tmp").exists());
        assert_eq!(file.load().unwrap().count, 2);
    }

    #[test]
    fn test_update_returns_closure_value() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(dir.path().join("counter.toml"));

        let after = file
            .update(|c| {
                c.count += 10;
                Ok(c.count)
            })
            .unwrap();
        assert_eq!(after, 10);

        file.update(|c| {
            c.count += 5;
            Ok(())
        })
        .unwrap();
        assert_eq!(file.load().unwrap().count, 15);
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(dir.path().join("counter.toml"));
        file.save(&Counter {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        let result: Result<()> = file.update(|c| {
            c.count = 99;
            Err(FrinzyError::validation("count", "rejected"))
        });

        assert!(result.is_err());
        assert_eq!(file.load().unwrap().count, 1);
    }
}
