use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REPORT_URL, DEFAULT_SEARCH_URL, DEFAULT_SUBMIT_URL};

/// The three Detux API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Submit,
    Report,
}

impl Endpoint {
    /// Operation name used in logs and error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Submit => "submit",
            Endpoint::Report => "report",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// Absolute URLs for each endpoint.
///
/// Fixed once a client is built; configuration can only change them at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub search: String,
    pub submit: String,
    pub report: String,
}

impl Endpoints {
    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Search => &self.search,
            Endpoint::Submit => &self.submit,
            Endpoint::Report => &self.report,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search: DEFAULT_SEARCH_URL.to_string(),
            submit: DEFAULT_SUBMIT_URL.to_string(),
            report: DEFAULT_REPORT_URL.to_string(),
        }
    }
}
