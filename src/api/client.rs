use std::path::Path;

use log::{debug, info};

use crate::api::endpoint::{Endpoint, Endpoints};
use crate::api::response::ApiResponse;
use crate::api::transport::{Payload, Transport};
use crate::constants::SEARCH_PAGE_SIZE;
use crate::error::{DetuxError, Result};
use crate::store::{save_report, SaveTarget};
use crate::utils::files::encode_for_transport;
use crate::utils::hash::compute_digest;
use crate::validate::{
    validate_file_reference, validate_hash, validate_offset, validate_search_text,
};

/// Client for the Detux search, submit and report endpoints.
///
/// Every call validates its arguments before building a request, sends one
/// form POST through the injected [`Transport`] and classifies the reply into
/// an [`ApiResponse`].
pub struct DetuxClient<T> {
    api_key: String,
    endpoints: Endpoints,
    transport: T,
}

impl<T: Transport> DetuxClient<T> {
    pub fn new(api_key: impl Into<String>, endpoints: Endpoints, transport: T) -> Self {
        Self {
            api_key: api_key.into(),
            endpoints,
            transport,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Search Detux by hash, IP address, domain and so on.
    ///
    /// Each page holds up to 20 results; pass the index of the next wanted
    /// result as `offset` to page further.
    pub fn search(&self, text: &str, offset: i64) -> Result<ApiResponse> {
        validate_search_text(text)?;
        validate_offset(offset)?;

        debug!("Search request for '{}' starting from offset {}", text, offset);
        let payload = self
            .payload()
            .with("search", text)
            .with("from", offset.to_string());

        self.send(Endpoint::Search, &payload)
    }

    /// Fetch the existing report for a SHA256 hash.
    pub fn report(&self, sha256: &str) -> Result<ApiResponse> {
        validate_hash(sha256).map_err(|e| e.in_operation(Endpoint::Report.operation()))?;

        let payload = self.payload().with("sha256", sha256);
        self.send(Endpoint::Report, &payload)
    }

    /// Hash a local file and fetch the report for it.
    pub fn report_for_file(&self, path: &Path) -> Result<ApiResponse> {
        validate_file_reference(path).map_err(|e| e.in_operation(Endpoint::Report.operation()))?;

        let digest = compute_digest(path)?.ok_or_else(|| DetuxError::InvalidFile {
            operation: Endpoint::Report.operation(),
            path: path.to_path_buf(),
            reason: "unable to compute SHA256 digest".to_string(),
        })?;

        debug!("Computed SHA256 {} for {}", digest, path.display());
        self.report(&digest)
    }

    /// Fetch a report and persist it to `target`.
    ///
    /// The response is stored whatever its outcome, in its JSON rendering.
    pub fn report_and_save(&self, sha256: &str, target: &SaveTarget) -> Result<ApiResponse> {
        validate_hash(sha256).map_err(|e| e.in_operation(Endpoint::Report.operation()))?;

        let response = self.report(sha256)?;
        if *target != SaveTarget::None {
            info!("Storing report for {} to {}", sha256, target.describe());
            save_report(&response.to_json(), target)?;
        }
        Ok(response)
    }

    /// Submit one file for analysis.
    ///
    /// `display_name` is sent as the sample's file name; otherwise the server
    /// picks one.
    pub fn submit_file(
        &self,
        path: &Path,
        comment: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<ApiResponse> {
        validate_file_reference(path).map_err(|e| e.in_operation(Endpoint::Submit.operation()))?;

        let encoded = encode_for_transport(path)?;
        debug!("Encoded {} ({} base64 bytes)", path.display(), encoded.len());

        let payload = self
            .payload()
            .with("file", encoded)
            .with_optional("comments", comment)
            .with_optional("file_name", display_name);

        self.send(Endpoint::Submit, &payload)
    }

    fn payload(&self) -> Payload {
        Payload::new().with("api_key", self.api_key.as_str())
    }

    fn send(&self, endpoint: Endpoint, payload: &Payload) -> Result<ApiResponse> {
        let url = self.endpoints.url(endpoint);
        let reply = self.transport.post_form(url, payload)?;
        let response = ApiResponse::classify(url, reply)?;

        match &response {
            ApiResponse::Success(_) => debug!("{} request successful; endpoint={}", endpoint, url),
            ApiResponse::RemoteFailure(message) => {
                debug!("{} request failed: {}; endpoint={}", endpoint, message, url)
            }
            ApiResponse::TransportFailure { status, .. } => {
                debug!("{} request returned HTTP {}; endpoint={}", endpoint, status, url)
            }
        }

        Ok(response)
    }
}

/// Offset of the search page after the one starting at `offset`.
pub fn next_search_offset(offset: i64) -> i64 {
    offset.saturating_add(SEARCH_PAGE_SIZE)
}
