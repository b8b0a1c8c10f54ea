//! Detux HTTP API client.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   validate    ┌──────────────┐  POST form  ┌──────────────┐
//! │ DetuxClient  │──────────────▶│   Payload    │────────────▶│  Transport   │
//! └──────┬───────┘               └──────────────┘             └──────┬───────┘
//!        │                                                           │
//!        │ submit_directory                                  HttpReply│
//!  ┌─────▼───────────┐                                       ┌───────▼──────┐
//!  │ worker pool (N) │                                       │ ApiResponse  │
//!  └─────────────────┘                                       └──────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use rust_detux::api::{DetuxClient, Endpoints, HttpTransport};
//!
//! # fn example() -> rust_detux::Result<()> {
//! let transport = HttpTransport::new(Duration::from_secs(30))?;
//! let client = DetuxClient::new("API_KEY", Endpoints::default(), transport);
//!
//! let hits = client.search("185.10.68.1", 0)?;
//! println!("{}", hits.to_json());
//!
//! let results = client.submit_directory(Path::new("/samples"), true, Some(4))?;
//! println!("{} of {} samples accepted", results.success_count(), results.len());
//! # Ok(())
//! # }
//! ```

/// Bounded worker pool for directory submissions
pub mod batch;

/// Request construction and the three API operations
pub mod client;

/// Endpoint identifiers and URLs
pub mod endpoint;

/// Response classification
pub mod response;

/// HTTP transport seam and the reqwest implementation
pub mod transport;

pub use batch::{BatchResults, FileOutcome};
pub use client::{next_search_offset, DetuxClient};
pub use endpoint::{Endpoint, Endpoints};
pub use response::ApiResponse;
pub use transport::{HttpReply, HttpTransport, Payload, Transport};
