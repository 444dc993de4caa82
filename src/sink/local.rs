use arrow::record_batch::RecordBatch;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

use super::{encode_parquet, TableSink};
use crate::error::{EtlError, Result};

/// Writes the Parquet file to the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSink {
    path: PathBuf,
}

impl LocalSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for LocalSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    async fn write(&self, batch: &RecordBatch) -> Result<usize> {
        let bytes = encode_parquet(batch)?;
        let storage =
            |e: std::io::Error| EtlError::Storage(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage)?;
        }

        // write to a temporary sibling first, then rename over the target
        let tmp_path = self.path.with_extension("parquet.tmp");
        fs::write(&tmp_path, &bytes).await.map_err(storage)?;
        fs::rename(&tmp_path, &self.path).await.map_err(storage)?;

        info!(bytes = bytes.len(), rows = batch.num_rows(), "wrote parquet");
        Ok(bytes.len())
    }
}
