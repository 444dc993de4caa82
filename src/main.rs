use anyhow::{Context, Result};
use clap::Parser;
use scbscraper::{
    sink::{LocalSink, S3Sink},
    EtlConfig, Pipeline, RunSummary,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch SCB population statistics and store them as Parquet.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// YAML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// PX-Web table URL
    #[arg(long)]
    api_url: Option<String>,

    /// S3-compatible endpoint URL
    #[arg(long)]
    storage_endpoint: Option<String>,

    /// Target object as bucket/key
    #[arg(long)]
    bucket_key: Option<String>,

    /// Query descriptor (JSON)
    #[arg(long)]
    query: Option<PathBuf>,

    /// Write to this local file instead of object storage
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(EtlConfig, Option<PathBuf>)> {
        let mut cfg = match &self.config {
            Some(path) => EtlConfig::from_yaml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EtlConfig::default(),
        };
        if let Some(v) = self.api_url {
            cfg.api_base_url = v;
        }
        if let Some(v) = self.storage_endpoint {
            cfg.storage_endpoint = v;
        }
        if let Some(v) = self.bucket_key {
            cfg.bucket_key = v;
        }
        if let Some(v) = self.query {
            cfg.query_descriptor_path = v;
        }
        cfg.validate().context("invalid configuration")?;
        Ok((cfg, self.output))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve configuration ────────────────────────────────────
    let (config, output) = Args::parse().into_config()?;
    info!(
        api = %config.api_base_url,
        query = %config.query_descriptor_path.display(),
        "configuration"
    );

    // ─── 3) run the pipeline into the chosen sink ────────────────────
    let pipeline = Pipeline::new(config);
    let result = match output {
        Some(path) => pipeline.run(&LocalSink::new(path)).await,
        None => {
            let sink = S3Sink::new(pipeline.config())
                .await
                .context("configuring object storage")?;
            pipeline.run(&sink).await
        }
    };

    match result {
        Ok(RunSummary {
            rows,
            bytes,
            destination,
        }) => {
            info!(rows, bytes, %destination, "all done");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "run failed");
            Err(e).context("population ETL run failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "scbscraper",
            "--bucket-key",
            "stats/pop.parquet",
            "--query",
            "queries/pop.json",
        ]);
        let (cfg, output) = args.into_config().unwrap();
        assert_eq!(cfg.bucket_key, "stats/pop.parquet");
        assert_eq!(cfg.query_descriptor_path, PathBuf::from("queries/pop.json"));
        assert_eq!(cfg.api_base_url, EtlConfig::default().api_base_url);
        assert!(output.is_none());
    }

    #[test]
    fn bad_bucket_key_fails_validation() {
        let args = Args::parse_from(["scbscraper", "--bucket-key", "nokey"]);
        assert!(args.into_config().is_err());
    }
}
