pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::LayoutConfig;
pub use core::{engine::ContinentLayoutEngine, pipeline::LayoutPipeline, runner::LayoutRunner};
pub use domain::hex::HexCoord;
pub use domain::model::{AppRecord, LayoutOutput};
pub use utils::error::{LayoutError, Result};
