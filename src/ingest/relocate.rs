// File relocation for ingest dispositions

use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{ClipVaultError, Result};

/// Move a file to an exact destination path, creating parent directories.
/// Falls back to copy-and-remove when rename fails (cross-device moves).
pub fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(_) => copy_and_remove(source, dest),
    }
}

/// Move a file into a directory, keeping its filename.
/// Conflicting names get a numeric suffix.
pub fn move_into_dir(source: &Path, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let filename = source
        .file_name()
        .ok_or_else(|| ClipVaultError::InvalidPath("No filename".to_string()))?;

    let mut dest = dir.join(filename);
    if dest.exists() {
        dest = generate_unique_path(&dest)?;
    }

    move_file(source, &dest)?;
    Ok(dest)
}

/// Generate a unique path by appending a number
fn generate_unique_path(path: &Path) -> Result<PathBuf> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    for i in 1..1000 {
        let new_name = if ext.is_empty() {
            format!("{}_{}", stem, i)
        } else {
            format!("{}_{}.{}", stem, i, ext)
        };
        let new_path = parent.join(new_name);
        if !new_path.exists() {
            return Ok(new_path);
        }
    }

    Err(ClipVaultError::Other("Could not generate unique filename".to_string()))
}

/// Cross-device fallback: copy with size verification, then remove the source.
fn copy_and_remove(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest)?;
    verify_copy(source, dest)?;

    // Preserve modification time
    if let Ok(source_meta) = fs::metadata(source) {
        if let Ok(modified) = source_meta.modified() {
            let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(modified));
        }
    }

    fs::remove_file(source)?;
    Ok(())
}

/// Size check after a copy. A mismatched copy is removed before erroring
/// so the destination never holds a truncated file.
fn verify_copy(source: &Path, dest: &Path) -> Result<()> {
    let source_size = fs::metadata(source)?.len();
    let dest_size = fs::metadata(dest)?.len();
    if source_size != dest_size {
        let _ = fs::remove_file(dest);
        return Err(ClipVaultError::Other(format!(
            "Move verification failed: size mismatch ({} vs {})",
            source_size, dest_size
        )));
    }
    Ok(())
}
