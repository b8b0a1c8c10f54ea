//! Bounded-concurrency submission of every file in a directory.
//!
//! Files are enumerated up front, fed into a crossbeam channel and drained by
//! a fixed number of scoped worker threads. Each worker records the outcome of
//! every file it pops in a shared map keyed by path, and the batch call joins
//! all workers before returning, so the result set always holds exactly one
//! entry per input file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use crossbeam::channel::{bounded, Receiver};
use log::{debug, info, warn};

use crate::api::client::DetuxClient;
use crate::api::response::ApiResponse;
use crate::api::transport::Transport;
use crate::error::{DetuxError, Result};
use crate::utils::files::enumerate_files;
use crate::validate::{validate_directory, validate_thread_count};

/// Outcome of submitting one file.
pub type FileOutcome = Result<ApiResponse>;

/// Per-file outcomes of one batch, keyed by absolute path.
#[derive(Debug, Default)]
pub struct BatchResults {
    outcomes: HashMap<PathBuf, FileOutcome>,
}

impl BatchResults {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&FileOutcome> {
        self.outcomes.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &FileOutcome)> {
        self.outcomes.iter()
    }

    /// Number of files the server accepted.
    pub fn success_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|outcome| matches!(outcome, Ok(response) if response.is_success()))
            .count()
    }

    pub fn into_inner(self) -> HashMap<PathBuf, FileOutcome> {
        self.outcomes
    }
}

impl IntoIterator for BatchResults {
    type Item = (PathBuf, FileOutcome);
    type IntoIter = std::collections::hash_map::IntoIter<PathBuf, FileOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<T: Transport + Sync> DetuxClient<T> {
    /// Submit every eligible file under `dir`.
    ///
    /// With `workers == None` files are submitted one after another on the
    /// calling thread. With `Some(n)`, `n` must satisfy
    /// `0 < n <= min(25, file count)`. When `use_filenames` is set, each
    /// file's base name is sent as its display name.
    ///
    /// Per-file failures are recorded in the result set and never stop the
    /// batch; only an invalid directory or worker count fails the call.
    pub fn submit_directory(
        &self,
        dir: &Path,
        use_filenames: bool,
        workers: Option<usize>,
    ) -> Result<BatchResults> {
        validate_directory(dir)?;

        let files: Vec<PathBuf> = enumerate_files(dir)?.collect();
        info!("Found {} files to submit in {}", files.len(), dir.display());

        if files.is_empty() {
            return Ok(BatchResults::default());
        }

        if let Some(n) = workers {
            validate_thread_count(n, files.len())?;
        }

        let start = Instant::now();
        let file_count = files.len();

        let outcomes = match workers {
            None => self.submit_sequential(files, use_filenames),
            Some(n) => self.submit_pooled(files, use_filenames, n)?,
        };

        if outcomes.len() != file_count {
            return Err(DetuxError::Worker(format!(
                "batch for {} finished with {} of {} results",
                dir.display(),
                outcomes.len(),
                file_count
            )));
        }

        let results = BatchResults { outcomes };
        info!(
            "Submitted {} files from {} in {:?} ({} accepted)",
            file_count,
            dir.display(),
            start.elapsed(),
            results.success_count()
        );
        Ok(results)
    }

    fn submit_sequential(&self, files: Vec<PathBuf>, use_filenames: bool) -> HashMap<PathBuf, FileOutcome> {
        let mut outcomes = HashMap::with_capacity(files.len());
        for path in files {
            let outcome = self.submit_batch_entry(&path, use_filenames);
            outcomes.insert(path, outcome);
        }
        outcomes
    }

    fn submit_pooled(
        &self,
        files: Vec<PathBuf>,
        use_filenames: bool,
        worker_count: usize,
    ) -> Result<HashMap<PathBuf, FileOutcome>> {
        info!("Using {} workers for {} submissions", worker_count, files.len());

        let outcomes = Mutex::new(HashMap::with_capacity(files.len()));
        let (sender, receiver) = bounded::<PathBuf>(files.len());

        let scope_result = crossbeam::scope(|scope| {
            let mut started = 0;
            for i in 0..worker_count {
                let worker_receiver = receiver.clone();
                let outcomes = &outcomes;

                let spawned = scope
                    .builder()
                    .name(format!("submit-worker-{}", i))
                    .spawn(move |_| self.submit_worker(worker_receiver, outcomes, use_filenames));

                match spawned {
                    Ok(_) => started += 1,
                    Err(e) => warn!("Failed to start submit-worker-{}: {}", i, e),
                }
            }
            drop(receiver);

            if started == 0 {
                return Err(DetuxError::Worker("no submission workers could be started".to_string()));
            }

            for path in files {
                if sender.send(path).is_err() {
                    break;
                }
            }
            // Closing the channel lets workers exit once it is drained
            drop(sender);
            Ok(())
        });

        match scope_result {
            Ok(result) => result?,
            Err(_) => return Err(DetuxError::Worker("a submission worker panicked".to_string())),
        }

        outcomes
            .into_inner()
            .map_err(|_| DetuxError::Worker("result collector poisoned".to_string()))
    }

    fn submit_worker(
        &self,
        receiver: Receiver<PathBuf>,
        outcomes: &Mutex<HashMap<PathBuf, FileOutcome>>,
        use_filenames: bool,
    ) {
        for path in receiver.iter() {
            let outcome = self.submit_batch_entry(&path, use_filenames);
            match outcomes.lock() {
                Ok(mut map) => {
                    map.insert(path, outcome);
                }
                Err(poisoned) => {
                    poisoned.into_inner().insert(path, outcome);
                }
            }
        }
    }

    fn submit_batch_entry(&self, path: &Path, use_filenames: bool) -> FileOutcome {
        let display_name = if use_filenames {
            path.file_name().map(|name| name.to_string_lossy().into_owned())
        } else {
            None
        };

        debug!("Submitting {}", path.display());
        let outcome = self.submit_file(path, None, display_name.as_deref());
        if let Err(e) = &outcome {
            warn!("Submission of {} failed: {}", path.display(), e);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoint::Endpoints;
    use crate::api::transport::{HttpReply, Payload};
    use crate::test_utils::create_sample_dir;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Counts calls and tracks the highest number of requests in flight.
    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        names: Mutex<Vec<String>>,
    }

    impl Transport for CountingTransport {
        fn post_form(&self, _url: &str, payload: &Payload) -> Result<HttpReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(name) = payload.get("file_name") {
                self.names.lock().unwrap().push(name.to_string());
            }
            thread::sleep(Duration::from_millis(5));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            Ok(HttpReply {
                status: 200,
                body: r#"{"status":1}"#.to_string(),
            })
        }
    }

    fn client() -> DetuxClient<CountingTransport> {
        DetuxClient::new("key", Endpoints::default(), CountingTransport::default())
    }

    #[test]
    fn test_pooled_batch_respects_worker_bound() {
        let dir = create_sample_dir(12).unwrap();
        let client = client();

        let results = client.submit_directory(dir.path(), false, Some(3)).unwrap();

        assert_eq!(results.len(), 12);
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 12);
        assert!(client.transport().peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(results.success_count(), 12);
    }

    #[test]
    fn test_sequential_batch_runs_one_at_a_time() {
        let dir = create_sample_dir(4).unwrap();
        let client = client();

        let results = client.submit_directory(dir.path(), false, None).unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(client.transport().peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_use_filenames_sends_base_names() {
        let dir = create_sample_dir(3).unwrap();
        let client = client();

        client.submit_directory(dir.path(), true, Some(2)).unwrap();

        let names: HashSet<String> = client.transport().names.lock().unwrap().iter().cloned().collect();
        let expected: HashSet<String> = (0..3).map(|i| format!("sample-{:02}.bin", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_invalid_worker_count_fails_before_any_request() {
        let dir = create_sample_dir(2).unwrap();
        let client = client();

        assert!(matches!(
            client.submit_directory(dir.path(), false, Some(3)),
            Err(DetuxError::InvalidArgument { .. })
        ));
        assert!(client.submit_directory(dir.path(), false, Some(0)).is_err());
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_directory_returns_empty_results() {
        let dir = TempDir::new().unwrap();
        let client = client();

        let results = client.submit_directory(dir.path(), false, Some(5)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_missing_directory_is_invalid_argument() {
        let client = client();
        let result = client.submit_directory(Path::new("/nonexistent/detux-batch"), false, Some(1));
        assert!(matches!(result, Err(DetuxError::InvalidArgument { .. })));
    }
}
