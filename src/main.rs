use clap::Parser;
use movie_langues::core::etl::run_with_config;
use movie_langues::utils::logger;
use movie_langues::{CliConfig, TomlConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.json_logs);

    tracing::info!("🚀 Starting movie-langues");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };

            tracing::info!("📦 Pipeline: {}", config.pipeline_name());

            // 應用命令列覆蓋設定
            cli.apply_overrides(&mut config);
            let monitor = cli.monitor || config.monitoring_enabled();

            run_with_config(config, monitor, cli.dry_run).await
        }
        None => {
            let monitor = cli.monitor;
            let dry_run = cli.dry_run;
            run_with_config(cli, monitor, dry_run).await
        }
    };

    match outcome {
        Ok(Some(output_path)) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!("✅ ETL process completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Ok(None) => {}
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}
