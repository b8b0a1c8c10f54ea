use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use walkdir::WalkDir;

use crate::error::{DetuxError, Result};
use crate::validate::is_file_valid;

/// Read a file and base64 encode its contents for a form POST.
pub fn encode_for_transport(path: &Path) -> Result<String> {
    let contents = fs::read(path).map_err(|e| DetuxError::io(path, e))?;
    Ok(STANDARD.encode(contents))
}

/// Lazily walk `dir` and yield the absolute path of every submittable file.
///
/// Dotfiles and anything that is not a regular, non-empty file are skipped.
/// Symlinks are judged by their target. Unreadable entries are logged and
/// skipped. The iterator makes one pass;
/// ordering depends on the filesystem.
pub fn enumerate_files(dir: &Path) -> Result<impl Iterator<Item = PathBuf>> {
    let root = dir.canonicalize().map_err(|e| DetuxError::io(dir, e))?;

    let files = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| !is_dotfile(entry.path()))
        .map(|entry| entry.into_path())
        .filter(|path| is_file_valid(path));

    Ok(files)
}

fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
