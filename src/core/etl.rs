use crate::config::cli::LocalStorage;
use crate::core::export::CSV_HEADER;
use crate::core::pipeline::MovieLanguagePipeline;
use crate::core::queries::{movie_languages_query, wikidata_languages_query};
use crate::core::{ConfigProvider, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use crate::utils::validation::Validate;
use std::path::Path;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Extract, transform, load. Returns the path of the written file.
    ///
    /// Nothing is written unless both queries and the join succeed.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process...");
        if self.monitor.is_enabled() {
            tracing::info!("🔍 System monitoring enabled");
        }
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("Extracting data...");
        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} film records and {} language identifiers",
            extracted.movies.len(),
            extracted.languages.len()
        );
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Transforming data...");
        let transformed = self.pipeline.transform(extracted).await?;
        tracing::info!(
            "Kept {} records, discarded {} with an unknown language",
            transformed.rows_written,
            transformed.rows_discarded
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}

/// Validates `config`, prints its summary, then either prints the dry-run report or runs
/// the pipeline against the local filesystem.
///
/// Returns `Ok(None)` for a dry run, otherwise the path of the written file.
pub async fn run_with_config<C>(
    config: C,
    monitor_enabled: bool,
    dry_run: bool,
) -> Result<Option<String>>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::info!("✅ Configuration validated successfully");

    println!("{}", config_summary(&config, dry_run));

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        println!("{}", dry_run_report(&config));
        return Ok(None);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = MovieLanguagePipeline::new(storage, config)?;
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    engine.run().await.map(Some)
}

pub fn config_summary<C: ConfigProvider>(config: &C, dry_run: bool) -> String {
    let mut lines = vec![
        "📋 Configuration Summary:".to_string(),
        format!("  CQ endpoint: {}", config.cq_endpoint()),
        format!("  Wikidata endpoint: {}", config.wikidata_endpoint()),
        format!(
            "  Output: {}",
            Path::new(config.output_path())
                .join(config.output_file())
                .display()
        ),
        format!("  Timeout: {:?}", config.request_timeout()),
        format!("  Concurrent queries: {}", config.concurrent_queries()),
        format!("  Ordered results: {}", config.ordered_queries()),
    ];
    if dry_run {
        lines.push("  🔍 DRY RUN MODE ENABLED".to_string());
    }
    lines.join("\n")
}

/// Both query texts exactly as they would be sent, plus the CSV header.
pub fn dry_run_report<C: ConfigProvider>(config: &C) -> String {
    let ordered = config.ordered_queries();
    [
        "🔍 Dry Run Analysis:".to_string(),
        format!("📡 Query sent to {}:", config.cq_endpoint()),
        movie_languages_query(ordered),
        format!("📡 Query sent to {}:", config.wikidata_endpoint()),
        wikidata_languages_query(ordered),
        format!("💾 CSV header: {}", CSV_HEADER.join(",")),
        "✅ Dry run analysis complete.".to_string(),
    ]
    .join("\n")
}
