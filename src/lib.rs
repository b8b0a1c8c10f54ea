//! # rust-detux
//!
//! A client for the [Detux](https://detux.org) Linux malware analysis sandbox
//! API, with local and S3 persistence of returned reports.
//!
//! ## Overview
//!
//! The Detux API exposes three form-POST endpoints: search, submit and
//! report. This crate validates arguments before any I/O, builds the request
//! for each operation, classifies the reply into an [`ApiResponse`] and can
//! submit a whole directory of samples through a bounded worker pool.
//!
//! ## Usage
//!
//! ### Fetching and storing a report
//!
//! ```no_run
//! use std::time::Duration;
//! use rust_detux::api::{DetuxClient, Endpoints, HttpTransport};
//! use rust_detux::validate::validate_save_target;
//!
//! # fn main() -> rust_detux::Result<()> {
//! let client = DetuxClient::new(
//!     "API_KEY",
//!     Endpoints::default(),
//!     HttpTransport::new(Duration::from_secs(30))?,
//! );
//!
//! let target = validate_save_target(Some("disk"), Some("report.json"), None, None, None, None)?;
//! let hash = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";
//! let report = client.report_and_save(hash, &target)?;
//! println!("success: {}", report.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`api`]: request client, response classification and batch submission
//! - [`validate`]: argument validation run before any I/O
//! - [`utils`]: hashing, transport encoding and directory enumeration
//! - [`store`]: report persistence to disk or object storage
//! - [`cloud`]: S3 object store backend
//! - [`config`]: YAML and environment configuration
//! - [`security`]: credential scrubbing for logs and errors
//! - [`constants`]: application-wide constants
//! - [`cli`]: command-line interface definitions

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Detux API client and batch submission
pub mod api;

/// Error type shared by the library
pub mod error;

/// Argument validation
pub mod validate;

/// Hashing and file helpers
pub mod utils;

/// Report persistence
pub mod store;

/// Object storage integration (S3)
pub mod cloud;

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Security utilities for credential protection
pub mod security;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;

pub use api::{ApiResponse, BatchResults, DetuxClient};
pub use error::{DetuxError, Result};
pub use store::SaveTarget;
