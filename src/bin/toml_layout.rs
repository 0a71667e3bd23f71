use anyhow::Context;
use clap::Parser;
use continent_layout::config::toml_config::TomlConfig;
use continent_layout::domain::ports::{ConfigProvider, InputSource};
use continent_layout::utils::{logger, validation::Validate};
use continent_layout::{LayoutPipeline, LayoutRunner, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-layout")]
#[command(about = "Continent layout with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "layout-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the layout seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Show what would be laid out without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based continent layout");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.layout.seed = seed;
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args)?;

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = LayoutPipeline::new(LocalStorage::default(), config);
    let mut runner = LayoutRunner::new_with_monitoring(pipeline, monitor_enabled);

    match runner.run() {
        Ok(output_path) => {
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
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) -> anyhow::Result<()> {
    let layout = &config.layout;

    println!("📋 Configuration Summary:");
    match config.input_source()? {
        InputSource::Csv(path) => println!("  Input: {}", path.display()),
        InputSource::Synthetic { num_apps, seed } => {
            println!("  Input: synthetic ({} apps, seed {})", num_apps, seed)
        }
    }
    println!("  Output: {}", config.output_path());
    if let Some(positions) = config.positions_file() {
        println!("  Positions: {}", positions);
    }
    println!(
        "  Gaps: water {} / connected {}",
        layout.water_gap, layout.connected_gap
    );
    println!(
        "  Padding: {:.2}, Iterations: {}",
        layout.padding_ratio, layout.force_iterations
    );
    println!(
        "  Collision rate: {}, Indicator rate: {}",
        layout.collision_rate, layout.indicator_rate
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
    Ok(())
}
