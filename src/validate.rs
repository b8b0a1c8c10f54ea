//! Argument validation performed before any network or disk I/O.
//!
//! Every public client entry point runs the relevant checks here first, so a
//! bad argument never results in a partially executed request or write.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::MAX_SUBMIT_WORKERS;
use crate::error::{DetuxError, Result};
use crate::store::{AwsCredentials, SaveTarget};

lazy_static! {
    /// Full-string SHA256 pattern, case-insensitive
    static ref SHA256_PATTERN: Regex = Regex::new(r"(?i)^[0-9a-f]{64}$").unwrap();
}

/// Check that `path` exists, is a regular file and is not empty.
///
/// Errors name the generic `validate` operation; client calls re-tag them
/// with [`DetuxError::in_operation`].
pub fn validate_file_reference(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| DetuxError::InvalidFile {
        operation: DetuxError::VALIDATE,
        path: path.to_path_buf(),
        reason: format!("cannot stat file: {}", e),
    })?;

    if !metadata.is_file() {
        return Err(DetuxError::InvalidFile {
            operation: DetuxError::VALIDATE,
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }

    if metadata.len() == 0 {
        return Err(DetuxError::InvalidFile {
            operation: DetuxError::VALIDATE,
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }

    Ok(())
}

/// Boolean form of [`validate_file_reference`] used when filtering files.
pub fn is_file_valid(path: &Path) -> bool {
    validate_file_reference(path).is_ok()
}

/// Check that `value` is a SHA256 hex digest.
pub fn validate_hash(value: &str) -> Result<()> {
    if SHA256_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(DetuxError::InvalidHash {
            operation: DetuxError::VALIDATE,
            value: value.to_string(),
        })
    }
}

/// Check that search text is present.
pub fn validate_search_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(DetuxError::invalid_argument(
            "search",
            "search text must not be empty",
        ));
    }
    Ok(())
}

/// Check that a search offset is not negative.
pub fn validate_offset(offset: i64) -> Result<()> {
    if offset < 0 {
        return Err(DetuxError::invalid_argument(
            "search",
            format!("offset must be >= 0, got {}", offset),
        ));
    }
    Ok(())
}

/// Check that `path` is an existing directory.
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(DetuxError::invalid_argument(
            "submit_directory",
            format!("{} is not a directory", path.display()),
        ));
    }
    Ok(())
}

/// Check a worker count against the batch size.
///
/// Valid counts satisfy `0 < n <= min(25, file_count)`.
pub fn validate_thread_count(n: usize, file_count: usize) -> Result<()> {
    let limit = MAX_SUBMIT_WORKERS.min(file_count);
    if n == 0 || n > limit {
        return Err(DetuxError::invalid_argument(
            "submit_directory",
            format!(
                "thread count must be between 1 and {} (at most {} and no more than the {} files found), got {}",
                limit, MAX_SUBMIT_WORKERS, file_count, n
            ),
        ));
    }
    Ok(())
}

/// Build a [`SaveTarget`] from loosely typed save options.
///
/// `save` accepts `disk` (alias `json`) or `object-store` (alias `s3`).
/// For object storage, `output` is used as the object key.
pub fn validate_save_target(
    save: Option<&str>,
    output: Option<&str>,
    s3_bucket: Option<&str>,
    aws_key: Option<&str>,
    aws_secret: Option<&str>,
    aws_region: Option<&str>,
) -> Result<SaveTarget> {
    let mode = match save {
        None => return Ok(SaveTarget::None),
        Some(mode) => mode,
    };

    let output = non_empty(output);

    match mode {
        "disk" | "json" => {
            let output = output.ok_or_else(|| {
                DetuxError::invalid_argument("report", "an output path is required when saving to disk")
            })?;
            Ok(SaveTarget::Disk(PathBuf::from(output)))
        }
        "object-store" | "s3" => {
            let key = output.ok_or_else(|| {
                DetuxError::invalid_argument("report", "an output key is required when saving to object storage")
            })?;
            let bucket = require("s3_bucket", s3_bucket)?;
            let access_key = require("aws_key", aws_key)?;
            let secret_key = require("aws_secret", aws_secret)?;
            let region = require("aws_region", aws_region)?;

            Ok(SaveTarget::ObjectStore {
                bucket,
                key: key.to_string(),
                credentials: AwsCredentials {
                    access_key,
                    secret_key,
                    region,
                },
            })
        }
        other => Err(DetuxError::invalid_argument(
            "report",
            format!("save must be one of \"disk\" or \"object-store\", got \"{}\"", other),
        )),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn require(name: &str, value: Option<&str>) -> Result<String> {
    non_empty(value).map(str::to_string).ok_or_else(|| {
        DetuxError::invalid_argument(
            "report",
            format!("\"{}\" must be set when saving to object storage", name),
        )
    })
}
