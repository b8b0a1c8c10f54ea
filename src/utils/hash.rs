use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use sha2::{Sha256, Digest};

use crate::constants::HASH_CHUNK_SIZE;
use crate::error::{DetuxError, Result};
use crate::validate::is_file_valid;

/// Calculate the SHA-256 digest of a file as lowercase hex.
///
/// Returns `Ok(None)` if the path is not a regular, non-empty file; callers
/// that need an error for that case should run
/// [`validate_file_reference`](crate::validate::validate_file_reference) first.
pub fn compute_digest(path: &Path) -> Result<Option<String>> {
    if !is_file_valid(path) {
        return Ok(None);
    }

    let file = File::open(path).map_err(|e| DetuxError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| DetuxError::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = hasher.finalize();
    Ok(Some(format!("{:x}", hash)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compute_digest_known_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("abc.txt");
        fs::write(&path, b"abc").unwrap();

        let digest = compute_digest(&path).unwrap();
        assert_eq!(
            digest.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_compute_digest_spans_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("large.bin");
        let data: Vec<u8> = (0..(HASH_CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &data).unwrap();

        let expected = format!("{:x}", Sha256::digest(&data));
        assert_eq!(compute_digest(&path).unwrap(), Some(expected));
    }

    #[test]
    fn test_compute_digest_empty_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        assert_eq!(compute_digest(&path).unwrap(), None);
    }

    #[test]
    fn test_compute_digest_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(compute_digest(&temp_dir.path().join("missing")).unwrap(), None);
    }
}
