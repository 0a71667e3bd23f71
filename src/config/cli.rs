use crate::config::LayoutConfig;
use crate::domain::ports::{ConfigProvider, InputSource};
use crate::utils::error::{LayoutError, Result};
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "continent-layout")]
#[command(about = "Generate continent-based hex map layouts from application inventories")]
pub struct CliConfig {
    /// Input CSV/TSV file
    pub input: Option<String>,

    #[arg(short, long, help = "Generate synthetic test data")]
    pub generate: bool,

    #[arg(short, long, default_value = "200")]
    pub num_apps: usize,

    #[arg(short, long, default_value = "./data.json")]
    pub output: String,

    #[arg(short, long, default_value = "42")]
    pub seed: u64,

    #[arg(long, default_value = "2")]
    pub water_gap: u32,

    #[arg(long, default_value = "1")]
    pub connected_gap: u32,

    #[arg(long, default_value = "0.2")]
    pub padding_ratio: f64,

    #[arg(long, default_value = "100")]
    pub force_iterations: u32,

    /// Demo collisions; forced to 0 for CSV input
    #[arg(long, default_value = "0.01")]
    pub collision_rate: f64,

    #[arg(long, default_value = "0.15")]
    pub indicator_rate: f64,

    /// Previous layout output used to keep continents in place
    #[arg(long)]
    pub positions: Option<String>,

    #[arg(long, help = "Ignore the positions file and lay out from scratch")]
    pub reset: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log memory and timing per stage")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            water_gap: self.water_gap,
            connected_gap: self.connected_gap,
            padding_ratio: self.padding_ratio,
            force_iterations: self.force_iterations,
            seed: self.seed,
            collision_rate: self.collision_rate,
            indicator_rate: self.indicator_rate,
            ..LayoutConfig::default()
        }
    }

    fn input_source(&self) -> Result<InputSource> {
        match (&self.input, self.generate) {
            (Some(path), _) => Ok(InputSource::Csv(PathBuf::from(path))),
            (None, true) => Ok(InputSource::Synthetic {
                num_apps: self.num_apps,
                seed: self.seed,
            }),
            (None, false) => Err(LayoutError::InputError {
                message: "Provide an input CSV file or use --generate for synthetic data"
                    .to_string(),
            }),
        }
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn positions_file(&self) -> Option<&str> {
        if self.reset {
            return None;
        }
        self.positions.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.input_source()?;
        if let Some(input) = &self.input {
            validate_file_extension("input", input, &["csv", "tsv"])?;
        }
        validate_path("output", &self.output)?;
        self.layout().validate()
    }
}
