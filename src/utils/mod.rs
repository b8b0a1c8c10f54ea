//! File helpers used before a request is built.
//!
//! ## Components
//!
//! - **Hashing**: SHA-256 digest of a sample, used for report lookups
//! - **Files**: base64 transport encoding and directory enumeration
//!
//! ### Looking up a report for a local sample
//!
//! ```no_run
//! use rust_detux::utils::hash::compute_digest;
//! use std::path::Path;
//!
//! # fn example() -> rust_detux::Result<()> {
//! match compute_digest(Path::new("/samples/dropper.elf"))? {
//!     Some(hash) => println!("SHA-256: {}", hash),
//!     None => println!("Not a regular, non-empty file"),
//! }
//! # Ok(())
//! # }
//! ```

/// Cryptographic hash calculation utilities
pub mod hash;

/// Transport encoding and directory enumeration
pub mod files;
