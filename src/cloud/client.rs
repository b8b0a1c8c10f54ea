use rusoto_core::{HttpClient, Region};
use rusoto_credential::StaticProvider;
use rusoto_s3::S3Client;

use crate::error::{DetuxError, Result};
use crate::store::AwsCredentials;

/// Parse an AWS region name such as `us-east-1`.
pub fn parse_region(name: &str) -> Result<Region> {
    name.parse::<Region>()
        .map_err(|e| DetuxError::storage(format!("region {}", name), e))
}

/// Create an S3 client authenticated with static credentials.
pub fn create_s3_client(credentials: &AwsCredentials) -> Result<S3Client> {
    let region = parse_region(&credentials.region)?;

    let http_client = HttpClient::new()
        .map_err(|e| DetuxError::storage("S3 HTTP client", e))?;

    let provider = StaticProvider::new_minimal(
        credentials.access_key.clone(),
        credentials.secret_key.clone(),
    );

    Ok(S3Client::new_with(http_client, provider, region))
}
