//! File operations for the CSV store
//!
//! Whole-file replacement via a sibling temp file, and data directory setup.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temp file used while replacing `path` (e.g. `logs.csv` -> `.logs.csv.tmp`)
pub fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Replace `path` with `content`: write a temp file, sync it, rename it over
/// the target. Parent directories are created as needed.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Read a whole file, returning `None` if it does not exist
pub fn read_if_exists(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/logs.csv");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_read_if_exists_missing() {
        let dir = tempdir().unwrap();
        assert!(read_if_exists(&dir.path().join("nope.csv")).unwrap().is_none());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let tmp = temp_path(Path::new("/data/csv/sites.csv"));
        assert_eq!(tmp, PathBuf::from("/data/csv/.sites.csv.tmp"));
    }
}
