//! Global constants for the rust-detux client.
//!
//! This module centralizes hardcoded values such as the default API
//! endpoints, buffer sizes and validation limits.

// API endpoints
/// Default Detux search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://detux.org/api/search.php";

/// Default Detux submission endpoint
pub const DEFAULT_SUBMIT_URL: &str = "https://detux.org/api/submit.php";

/// Default Detux report endpoint
pub const DEFAULT_REPORT_URL: &str = "https://detux.org/api/report.php";

/// Value of the `status` field that marks a successful API call
pub const API_SUCCESS_STATUS: i64 = 1;

/// Error text attached to responses with a non-200 HTTP status
pub const NON_200_ERROR_TEXT: &str = "POST request returned non-200 HTTP status code";

// Buffer sizes
/// Chunk size used when hashing files (16KB)
pub const HASH_CHUNK_SIZE: usize = 16 * 1024;

/// Indentation used for JSON reports written to storage
pub const REPORT_JSON_INDENT: &[u8] = b"    ";

// Limits
/// Maximum number of concurrent submission workers
pub const MAX_SUBMIT_WORKERS: usize = 25;

/// Number of results returned by one search page
pub const SEARCH_PAGE_SIZE: i64 = 20;

// Timeouts
/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Environment variables
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "DETUX_API_KEY";

/// Environment variable overriding the request timeout
pub const ENV_TIMEOUT_SECS: &str = "DETUX_TIMEOUT_SECS";

// Default file names
pub const DEFAULT_CONFIG_NAME: &str = "detux.yaml";
pub const REPORT_FILE_EXTENSION: &str = "json";
