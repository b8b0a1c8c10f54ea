//! Object storage for Detux reports.
//!
//! [`ObjectStore`] is the minimal put API the report store needs: a bucket
//! existence check and a whole-object write. [`S3ObjectStore`] implements it
//! on top of rusoto.
//!
//! ## Usage Example
//!
//! ```no_run
//! use rust_detux::cloud::S3ObjectStore;
//! use rust_detux::store::{to_object_store, AwsCredentials};
//! use serde_json::json;
//!
//! # fn example() -> rust_detux::Result<()> {
//! let credentials = AwsCredentials {
//!     access_key: "KEY".to_string(),
//!     secret_key: "SECRET".to_string(),
//!     region: "us-east-1".to_string(),
//! };
//!
//! let store = S3ObjectStore::new(&credentials)?;
//! to_object_store(&store, &json!({"status": 1}), "detux-reports", "reports/sample.json")?;
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
use mockall::automock;

use crate::error::Result;

/// S3 client construction
pub mod client;

/// Amazon S3 backed object store
pub mod s3;

pub use s3::S3ObjectStore;

/// Minimal object storage API.
#[cfg_attr(test, automock)]
pub trait ObjectStore {
    /// Whether `bucket` exists and is reachable with the current credentials.
    fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Write `body` to `bucket`/`key`, replacing any existing object.
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}
