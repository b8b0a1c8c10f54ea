use serde_json::{json, Value};

use crate::api::endpoint::Endpoint;
use crate::api::transport::HttpReply;
use crate::constants::{API_SUCCESS_STATUS, NON_200_ERROR_TEXT};
use crate::error::{DetuxError, Result};

/// Outcome of one API request that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// HTTP 200 with `status == 1`; carries the full body.
    Success(Value),
    /// HTTP 200 with any other status; carries the body's `message`.
    RemoteFailure(String),
    /// Any non-200 HTTP status.
    TransportFailure {
        status: u16,
        endpoint: String,
        error: String,
    },
}

impl ApiResponse {
    /// Classify a raw HTTP reply from `url`.
    pub fn classify(url: &str, reply: HttpReply) -> Result<Self> {
        if reply.status != 200 {
            return Ok(ApiResponse::TransportFailure {
                status: reply.status,
                endpoint: url.to_string(),
                error: NON_200_ERROR_TEXT.to_string(),
            });
        }

        let body: Value = serde_json::from_str(&reply.body).map_err(|e| DetuxError::MalformedResponse {
            endpoint: url.to_string(),
            detail: e.to_string(),
        })?;

        if is_success(&body) {
            return Ok(ApiResponse::Success(body));
        }

        let message = match body.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        };

        Ok(ApiResponse::RemoteFailure(message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    /// JSON rendering used when a response is written to storage.
    pub fn to_json(&self) -> Value {
        match self {
            ApiResponse::Success(body) => body.clone(),
            ApiResponse::RemoteFailure(message) => Value::String(message.clone()),
            ApiResponse::TransportFailure { status, endpoint, error } => json!({
                "status": status,
                "endpoint": endpoint,
                "error": error,
            }),
        }
    }

    /// Turn the failure outcomes into errors for `?`-style callers.
    pub fn into_result(self, endpoint: Endpoint) -> Result<Value> {
        match self {
            ApiResponse::Success(body) => Ok(body),
            ApiResponse::RemoteFailure(message) => Err(DetuxError::RemoteFailure {
                operation: endpoint.operation(),
                message,
            }),
            ApiResponse::TransportFailure { status, endpoint, .. } => {
                Err(DetuxError::RemoteProtocol { endpoint, status })
            }
        }
    }
}

/// Only a numeric `status` of 1 counts; `"1"` is a failure.
fn is_success(body: &Value) -> bool {
    match body.get("status") {
        Some(Value::Number(n)) => n.as_i64() == Some(API_SUCCESS_STATUS),
        _ => false,
    }
}
