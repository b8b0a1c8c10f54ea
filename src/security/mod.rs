//! Security utilities for the Detux client.
//!
//! - `credential_scrubber`: strips API keys and AWS secrets from strings
//!   before they are logged or placed in error messages

pub mod credential_scrubber;

pub use credential_scrubber::{scrub_credentials, scrub_known_secret};
