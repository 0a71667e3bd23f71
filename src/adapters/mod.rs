// Adapters layer: files, CSV inventories, synthetic data and prior layouts.

pub mod csv_source;
pub mod position_cache;
pub mod storage;
pub mod synthetic;
