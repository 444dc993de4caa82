use arrow::record_batch::RecordBatch;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion};
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client};
use tracing::{debug, info, instrument};

use super::{encode_parquet, TableSink};
use crate::config::EtlConfig;
use crate::error::{EtlError, Result};

/// Puts the Parquet file into an S3-compatible bucket (MinIO and friends).
#[derive(Clone)]
pub struct S3Sink {
    client: Client,
    bucket: String,
    key: String,
}

impl S3Sink {
    /// Credentials come from the default AWS provider chain (env, profile, ...);
    /// the endpoint and object path come from `config`.
    pub async fn new(config: &EtlConfig) -> Result<Self> {
        let (bucket, key) = config.bucket_and_key()?;
        let region = RegionProviderChain::default_provider().or_else("us-east-1");
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .endpoint_url(&config.storage_endpoint)
            .force_path_style(true)
            .build();

        debug!(endpoint = %config.storage_endpoint, bucket, key, "S3 client configured");
        Ok(Self::from_conf(s3_config, bucket, key))
    }

    pub fn from_conf(
        s3_config: aws_sdk_s3::Config,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl TableSink for S3Sink {
    fn destination(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    #[instrument(level = "info", skip_all, fields(bucket = %self.bucket, key = %self.key))]
    async fn write(&self, batch: &RecordBatch) -> Result<usize> {
        let bytes = encode_parquet(batch)?;
        let size = bytes.len();
        debug!(size, "uploading parquet");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .content_type("application/vnd.apache.parquet")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                EtlError::Storage(format!(
                    "PutObject {}: {}",
                    self.destination(),
                    DisplayErrorContext(&e)
                ))
            })?;

        info!(bytes = size, rows = batch.num_rows(), "uploaded to {}", self.destination());
        Ok(size)
    }
}
