//! Pin file reading and writing
//!
//! Writes go to a temporary sibling file that is then renamed over the
//! target, so a failed write never leaves a half-written pin file behind.

use crate::error::RequirementsError;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a pin file to a string
pub fn read_requirements(path: &Path) -> Result<String, RequirementsError> {
    fs::read_to_string(path).map_err(|e| RequirementsError::read_error(path, e))
}

/// Replace the contents of a pin file
pub fn write_requirements(path: &Path, content: &str) -> Result<(), RequirementsError> {
    // Write next to the real file so a symlinked pin file stays a symlink
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp = temp_path(&target);

    let result = fs::write(&tmp, content)
        .and_then(|()| {
            if let Ok(metadata) = fs::metadata(&target) {
                fs::set_permissions(&tmp, metadata.permissions())?;
            }
            Ok(())
        })
        .and_then(|()| fs::rename(&tmp, &target));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(RequirementsError::write_error(path, e));
    }
    Ok(())
}

fn temp_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "requirements.txt".to_string());
    target.with_file_name(format!(".{}.reqbump-tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_requirements() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requirements.txt");
        fs::write(&path, "flask==1.0\n").unwrap();
        assert_eq!(read_requirements(&path).unwrap(), "flask==1.0\n");
    }

    #[test]
    fn test_read_requirements_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_requirements(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, RequirementsError::ReadError { .. }));
    }

    #[test]
    fn test_write_requirements_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requirements.txt");
        fs::write(&path, "flask==1.0\n").unwrap();

        write_requirements(&path, "flask==2.0\r\n").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"flask==2.0\r\n");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1, "temporary file left behind");
    }

    #[test]
    fn test_write_requirements_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("requirements.txt");
        let err = write_requirements(&path, "x").unwrap_err();
        assert!(matches!(err, RequirementsError::WriteError { .. }));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path(Path::new("/a/b/requirements.txt"));
        assert_eq!(tmp, PathBuf::from("/a/b/.requirements.txt.reqbump-tmp"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("requirements.txt");
        fs::write(&real, "a==1\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_requirements(&link, "a==2\n").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "a==2\n");
    }
}
