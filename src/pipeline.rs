// src/pipeline.rs

use arrow::record_batch::RecordBatch;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, instrument};

use crate::{
    config::EtlConfig,
    error::Result,
    fetch::{self, Mappings, RawResult},
    query,
    sink::TableSink,
    table,
};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub bytes: usize,
    pub destination: String,
}

/// The load → fetch → build → sink sequence, one typed stage per method.
pub struct Pipeline {
    config: EtlConfig,
    client: Client,
}

impl Pipeline {
    pub fn new(config: EtlConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: EtlConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    pub fn load_query(&self) -> Result<Value> {
        query::load_query(&self.config.query_descriptor_path)
    }

    pub async fn fetch_data(&self, query: &Value) -> Result<RawResult> {
        fetch::fetch_data(&self.client, &self.config.api_base_url, query).await
    }

    pub async fn fetch_mappings(&self) -> Result<Mappings> {
        fetch::fetch_mappings(&self.client, &self.config.api_base_url).await
    }

    pub fn build_table(&self, raw: &RawResult, mappings: &Mappings) -> Result<RecordBatch> {
        table::build_table(raw, mappings)
    }

    /// Run every stage once, in order. The first failure aborts the run.
    #[instrument(level = "info", skip_all, fields(destination = %sink.destination()))]
    pub async fn run<S: TableSink>(&self, sink: &S) -> Result<RunSummary> {
        let start = Instant::now();

        // descriptor problems surface before any request is sent
        let query = self.load_query()?;
        let raw = self.fetch_data(&query).await?;
        let mappings = self.fetch_mappings().await?;
        let batch = self.build_table(&raw, &mappings)?;
        let bytes = sink.write(&batch).await?;

        let summary = RunSummary {
            rows: batch.num_rows(),
            bytes,
            destination: sink.destination(),
        };
        info!(
            rows = summary.rows,
            bytes = summary.bytes,
            elapsed = ?start.elapsed(),
            "run complete"
        );
        Ok(summary)
    }
}
