//! Test utilities for rust-detux
//!
//! Common fixtures shared by unit test modules.

#![cfg(test)]

use anyhow::Result;
use std::fs;
use tempfile::{NamedTempFile, TempDir};

/// Creates a temporary file with the given content
pub fn create_temp_file(content: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    use std::io::Write;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

/// Creates a directory holding `count` non-empty samples named
/// `sample-00.bin`, `sample-01.bin`, ... plus a dotfile and an empty file
/// that enumeration must skip.
pub fn create_sample_dir(count: usize) -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let base_path = temp_dir.path();

    for i in 0..count {
        fs::write(base_path.join(format!("sample-{:02}.bin", i)), format!("sample payload {}", i))?;
    }
    fs::write(base_path.join(".DS_Store"), b"ignored")?;
    fs::write(base_path.join("zero.bin"), b"")?;

    Ok(temp_dir)
}

/// Creates a YAML configuration file pointing at local endpoints
pub fn create_test_config() -> Result<NamedTempFile> {
    let config_content = r#"
api_key: "yaml-key"
timeout_secs: 5
endpoints:
  search: "http://127.0.0.1:8080/api/search.php"
  submit: "http://127.0.0.1:8080/api/submit.php"
  report: "http://127.0.0.1:8080/api/report.php"
"#;

    create_temp_file(config_content.as_bytes())
}
