use log::debug;
use rusoto_core::{ByteStream, RusotoError};
use rusoto_s3::{HeadBucketError, HeadBucketRequest, PutObjectRequest, S3Client, S3};
use tokio::runtime::{Builder, Runtime};

use crate::cloud::client::create_s3_client;
use crate::cloud::ObjectStore;
use crate::error::{DetuxError, Result};
use crate::store::AwsCredentials;

/// Blocking [`ObjectStore`] backed by Amazon S3.
///
/// rusoto is async only, so each store drives its requests on a private
/// current-thread Tokio runtime.
pub struct S3ObjectStore {
    client: S3Client,
    runtime: Runtime,
    region: String,
}

impl S3ObjectStore {
    pub fn new(credentials: &AwsCredentials) -> Result<Self> {
        let client = create_s3_client(credentials)?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DetuxError::storage("S3 runtime", e))?;

        Ok(Self {
            client,
            runtime,
            region: credentials.region.clone(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl ObjectStore for S3ObjectStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let request = HeadBucketRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };

        match self.runtime.block_on(self.client.head_bucket(request)) {
            Ok(_) => Ok(true),
            Err(RusotoError::Service(HeadBucketError::NoSuchBucket(_))) => Ok(false),
            // HeadBucket has no body, so a missing bucket usually arrives as a bare 404
            Err(RusotoError::Unknown(ref response)) if response.status.as_u16() == 404 => Ok(false),
            Err(e) => Err(DetuxError::storage(format!("s3://{}", bucket), e)),
        }
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let request = PutObjectRequest {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: Some("application/json".to_string()),
            body: Some(ByteStream::from(body)),
            ..Default::default()
        };

        self.runtime
            .block_on(self.client.put_object(request))
            .map_err(|e| DetuxError::storage(format!("s3://{}/{}", bucket, key), e))?;

        debug!("PutObject s3://{}/{} completed in region {}", bucket, key, self.region);
        Ok(())
    }
}
