use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

use crate::error::{EtlError, Result};

/// PX-Web table holding yearly population by region, civil status, age and sex.
pub const DEFAULT_API_URL: &str =
    "https://api.scb.se/OV0104/v1/doris/sv/ssd/BE/BE0101/BE0101A/BefolkningNy";
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://minio.lab.foffe.dev";
pub const DEFAULT_BUCKET_KEY: &str = "user-foffe/befolkning.parquet";
pub const DEFAULT_QUERY_PATH: &str = "api.json";

/// Everything a run needs to know about where to read from and write to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub api_base_url: String,
    pub storage_endpoint: String,
    /// `bucket/key`, optionally prefixed with `s3://`.
    pub bucket_key: String,
    pub query_descriptor_path: PathBuf,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            storage_endpoint: DEFAULT_STORAGE_ENDPOINT.to_string(),
            bucket_key: DEFAULT_BUCKET_KEY.to_string(),
            query_descriptor_path: PathBuf::from(DEFAULT_QUERY_PATH),
        }
    }
}

impl EtlConfig {
    /// Load a YAML config file; keys it omits keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EtlError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text)
            .map_err(|e| EtlError::Config(format!("parsing {}: {}", path.display(), e)))
    }

    /// Split `bucket_key` into `(bucket, key)`.
    pub fn bucket_and_key(&self) -> Result<(&str, &str)> {
        let trimmed = self
            .bucket_key
            .strip_prefix("s3://")
            .unwrap_or(&self.bucket_key);
        match trimmed.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok((bucket, key)),
            _ => Err(EtlError::Config(format!(
                "bucket_key {:?} must look like bucket/key",
                self.bucket_key
            ))),
        }
    }

    /// Reject URLs and object paths that cannot work before touching the network.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("api_base_url", &self.api_base_url),
            ("storage_endpoint", &self.storage_endpoint),
        ] {
            Url::parse(value)
                .map_err(|e| EtlError::Config(format!("{} {:?}: {}", name, value, e)))?;
        }
        self.bucket_and_key()?;
        Ok(())
    }
}
