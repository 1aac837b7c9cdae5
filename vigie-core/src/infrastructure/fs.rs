// vigie-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Write content to a file atomically using a temporary file.
///
/// The temp file is created in the same directory as the target, then
/// persisted (renamed) over it, so the target is either fully written or not
/// written at all. The patcher relies on this: a failed pass must never leave
/// a half-rewritten report behind.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

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
        let file_path = dir.path().join("report.html");

        atomic_write(&file_path, "<html></html>")?;

        assert!(file_path.exists());
        assert_eq!(fs::read_to_string(file_path)?, "<html></html>");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.html");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Patched")?;

        assert_eq!(fs::read_to_string(file_path)?, "Patched");
        Ok(())
    }
}
