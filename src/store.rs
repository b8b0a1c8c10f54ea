//! Persistence of Detux reports.
//!
//! Reports are written as UTF-8 JSON with 4-space indentation, either to a
//! local file or to an S3 object. Date/time values are expected to be
//! serialized as ISO-8601 strings (chrono's serde representation).
//!
//! The two sinks differ on existing targets: a disk write refuses to replace
//! an existing file, an object store write replaces an existing key.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::cloud::{ObjectStore, S3ObjectStore};
use crate::constants::{REPORT_FILE_EXTENSION, REPORT_JSON_INDENT};
use crate::error::{DetuxError, Result};

/// Static AWS credentials for object store writes.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<REDACTED>")
            .field("region", &self.region)
            .finish()
    }
}

/// Where a fetched report should be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveTarget {
    /// Return the report without storing it.
    #[default]
    None,
    /// Write to a new local file.
    Disk(PathBuf),
    /// Upload to `bucket`/`key`.
    ObjectStore {
        bucket: String,
        key: String,
        credentials: AwsCredentials,
    },
}

impl SaveTarget {
    /// Human readable location, used in logs and errors.
    pub fn describe(&self) -> String {
        match self {
            SaveTarget::None => "<none>".to_string(),
            SaveTarget::Disk(path) => path.display().to_string(),
            SaveTarget::ObjectStore { bucket, key, .. } => format!("s3://{}/{}", bucket, key),
        }
    }

    /// Treat this target as a directory or key prefix and derive the
    /// location `<target>/<hash>.json` for one report.
    pub fn for_report(&self, hash: &str) -> SaveTarget {
        let file_name = format!("{}.{}", hash, REPORT_FILE_EXTENSION);
        match self {
            SaveTarget::None => SaveTarget::None,
            SaveTarget::Disk(dir) => SaveTarget::Disk(dir.join(file_name)),
            SaveTarget::ObjectStore { bucket, key, credentials } => SaveTarget::ObjectStore {
                bucket: bucket.clone(),
                key: format!("{}/{}", key.trim_end_matches('/'), file_name),
                credentials: credentials.clone(),
            },
        }
    }

    /// Create the directory behind a disk target used as a report prefix.
    ///
    /// Object store prefixes need no preparation.
    pub fn create_output_dir(&self) -> Result<()> {
        if let SaveTarget::Disk(dir) = self {
            fs::create_dir_all(dir).map_err(|e| DetuxError::storage(dir.display().to_string(), e))?;
            debug!("Report directory {} is ready", dir.display());
        }
        Ok(())
    }
}

/// Serialize `report` as 4-space indented JSON.
pub fn render_report<T: Serialize + ?Sized>(report: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(REPORT_JSON_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    report
        .serialize(&mut serializer)
        .map_err(|e| DetuxError::storage("<serializer>", e))?;
    Ok(buffer)
}

/// Write `report` to a new file at `path`.
///
/// Fails with [`DetuxError::Storage`] if `path` already exists; the existing
/// file is left untouched.
pub fn to_disk<T: Serialize + ?Sized>(report: &T, path: &Path) -> Result<()> {
    let target = path.display().to_string();
    let body = render_report(report)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => DetuxError::storage(&target, "output file already exists on disk"),
            _ => DetuxError::storage(&target, e),
        })?;

    file.write_all(&body)
        .and_then(|_| file.flush())
        .map_err(|e| DetuxError::storage(&target, e))?;

    info!("Stored report at {} ({} bytes)", target, body.len());
    Ok(())
}

/// Upload `report` to `bucket`/`key` after checking that the bucket exists.
pub fn to_object_store<T: Serialize + ?Sized>(
    store: &dyn ObjectStore,
    report: &T,
    bucket: &str,
    key: &str,
) -> Result<()> {
    let target = format!("s3://{}/{}", bucket, key);

    if !store.bucket_exists(bucket)? {
        return Err(DetuxError::storage(&target, format!("S3 bucket {} does not exist", bucket)));
    }

    let body = render_report(report)?;
    let size = body.len();
    debug!("Uploading {} bytes to {}", size, target);
    store.put_object(bucket, key, body)?;

    info!("Stored report at {} ({} bytes)", target, size);
    Ok(())
}

/// Persist `report` according to `target`.
pub fn save_report<T: Serialize + ?Sized>(report: &T, target: &SaveTarget) -> Result<()> {
    match target {
        SaveTarget::None => Ok(()),
        SaveTarget::Disk(path) => to_disk(report, path),
        SaveTarget::ObjectStore { bucket, key, credentials } => {
            let store = S3ObjectStore::new(credentials)?;
            to_object_store(&store, report, bucket, key)
        }
    }
}
