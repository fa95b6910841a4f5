use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use rgen_core::GeneratedFile;
use tempfile::NamedTempFile;

/// Write `content` to `path`, creating missing parent directories.
///
/// The content goes to a temporary file in the target directory first and
/// is then renamed over `path`, so readers see either the old file or the
/// new one.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !parent.exists() {
        debug!("creating directory {}", parent.display());
        fs::create_dir_all(parent)?;
    }

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    match fs::metadata(path) {
        Ok(existing) => temp_file.as_file().set_permissions(existing.permissions())?,
        Err(_) => set_default_permissions(temp_file.as_file())?,
    }
    temp_file.persist(path)?;
    Ok(())
}

/// Temporary files are created owner-only; new outputs get the usual 0644.
#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(DEFAULT_FILE_MODE))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Write a generated file below `base`. Returns the path written.
pub fn write_generated(base: &Path, file: &GeneratedFile) -> io::Result<PathBuf> {
    let path = base.join(&file.path);
    write_atomic(&path, &file.content)?;
    Ok(path)
}
