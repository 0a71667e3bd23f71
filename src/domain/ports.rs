use crate::config::LayoutConfig;
use crate::domain::model::{AppRecord, LayoutOutput};
use crate::utils::error::Result;
use std::path::PathBuf;

/// Where application records come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Csv(PathBuf),
    Synthetic { num_apps: usize, seed: u64 },
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn layout(&self) -> LayoutConfig;
    fn input_source(&self) -> Result<InputSource>;
    fn output_path(&self) -> &str;
    fn positions_file(&self) -> Option<&str>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<AppRecord>>;
    fn transform(&self, records: Vec<AppRecord>) -> Result<LayoutOutput>;
    fn load(&self, output: LayoutOutput) -> Result<String>;
}
