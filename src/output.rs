use std::{io::Write, path::Path};

use anyhow::Context;
use tempfile::NamedTempFile;

/// Writes `contents` to a temporary file next to `path`, then renames it into
/// place. If anything fails the previous file at `path` is left as it was.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {dir:?}"))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write {path:?}"))?;
    file.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    // dropping the returned temp file removes it
    file.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to move page into {path:?}"))?;
    Ok(())
}
