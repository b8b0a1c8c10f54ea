use std::time::Duration;

use log::debug;
#[cfg(test)]
use mockall::automock;

use crate::error::{DetuxError, Result};
use crate::security::scrub_credentials;

/// Form fields for one POST, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, consuming and returning the payload.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    /// Append a field only when `value` is present.
    pub fn with_optional(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// Raw HTTP answer handed back to the client for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends one form-encoded POST.
///
/// Implementations return `Err(DetuxError::Transport)` only for faults where no
/// HTTP answer was received. Any status code, including errors, is an `Ok`.
#[cfg_attr(test, automock)]
pub trait Transport {
    fn post_form(&self, url: &str, payload: &Payload) -> Result<HttpReply>;
}

/// Blocking reqwest transport with a per-request timeout.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rust-detux/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DetuxError::Transport {
                endpoint: "<client setup>".to_string(),
                detail: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, payload: &Payload) -> Result<HttpReply> {
        debug!("Sending POST to {}", url);

        let transport_error = |e: reqwest::Error| DetuxError::Transport {
            endpoint: url.to_string(),
            detail: scrub_credentials(&e.to_string()),
        };

        let response = self
            .client
            .post(url)
            .form(payload.fields())
            .send()
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;

        Ok(HttpReply { status, body })
    }
}
