// refmart-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Write content to a file atomically using a temporary file.
///
/// The content lands in a temp file in the destination directory, then a
/// rename replaces the target. The target is either fully written or left
/// untouched; a failed run never leaves a partial report behind. Missing
/// parent directories are created first.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    if !parent.as_os_str().is_empty() && !parent.exists() {
        std::fs::create_dir_all(parent).map_err(InfrastructureError::Io)?;
    }

    // Temp file must live in the same directory so the rename stays on one
    // filesystem and therefore atomic.
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.csv");

        atomic_write(&file_path, "Category,Rule\n")?;

        assert!(file_path.exists());
        assert_eq!(fs::read_to_string(file_path)?, "Category,Rule\n");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.csv");

        atomic_write(&file_path, "first run")?;
        atomic_write(&file_path, "second run")?;

        assert_eq!(fs::read_to_string(file_path)?, "second run");
        Ok(())
    }

    #[test]
    fn test_atomic_write_creates_missing_parents() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("target").join("docs").join("report.csv");

        atomic_write(&file_path, "nested")?;

        assert_eq!(fs::read_to_string(file_path)?, "nested");
        Ok(())
    }
}
