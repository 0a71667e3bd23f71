use clap::Parser;
use continent_layout::domain::ports::ConfigProvider;
use continent_layout::utils::{logger, validation::Validate};
use continent_layout::{CliConfig, LayoutPipeline, LayoutRunner, LocalStorage};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting continent-layout CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    if let Some(positions) = config.positions_file() {
        tracing::info!("📌 Using cached positions from: {}", positions);
    }

    let pipeline = LayoutPipeline::new(LocalStorage::default(), config);
    let mut runner = LayoutRunner::new_with_monitoring(pipeline, monitor_enabled);

    match runner.run() {
        Ok(output_path) => {
            tracing::info!("✅ Layout completed successfully!");
            println!("✅ Layout completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Layout failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
