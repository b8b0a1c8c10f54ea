//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use rust_detux::api::{DetuxClient, Endpoints, HttpReply, Payload, Transport};
use rust_detux::{DetuxError, Result};
use tempfile::TempDir;

pub const API_KEY: &str = "integration-key";

/// Scripted transport that records every request it receives.
///
/// Replies are served from a queue; once it is empty every request gets
/// `fallback`. Files whose base64 payload matches `fail_payload` produce a
/// transport fault instead.
pub struct FakeTransport {
    replies: Mutex<VecDeque<HttpReply>>,
    fallback: HttpReply,
    fail_payload: Option<String>,
    delay: Duration,
    pub requests: Mutex<Vec<(String, Payload)>>,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl FakeTransport {
    pub fn answering(status: u16, body: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: HttpReply { status, body: body.to_string() },
            fail_payload: None,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn accepting() -> Self {
        Self::answering(200, r#"{"status": 1, "sha256": "queued"}"#)
    }

    pub fn then(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(HttpReply { status, body: body.to_string() });
        self
    }

    pub fn failing_on(mut self, encoded_file: &str) -> Self {
        self.fail_payload = Some(encoded_file.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    fn post_form(&self, url: &str, payload: &Payload) -> Result<HttpReply> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_payload.is_some() && payload.get("file") == self.fail_payload.as_deref() {
            return Err(DetuxError::Transport {
                endpoint: url.to_string(),
                detail: "connection reset by peer".to_string(),
            });
        }

        let scripted = self.replies.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| self.fallback.clone()))
    }
}

pub fn client(transport: FakeTransport) -> DetuxClient<FakeTransport> {
    DetuxClient::new(API_KEY, Endpoints::default(), transport)
}

/// Directory with `count` distinct non-empty samples.
pub fn sample_dir(count: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for i in 0..count {
        write_sample(dir.path(), &format!("elf-{:02}", i), format!("payload {}", i).as_bytes());
    }
    dir
}

pub fn write_sample(dir: &Path, name: &str, content: &[u8]) {
    fs::write(dir.join(name), content).unwrap();
}
