use crate::adapters::csv_source::{log_business_summary, parse_inventory};
use crate::adapters::position_cache::PositionCache;
use crate::adapters::synthetic::generate_test_data;
use crate::config::LayoutConfig;
use crate::core::engine::ContinentLayoutEngine;
use crate::core::{
    AppRecord, ConfigProvider, InputSource, LayoutOutput, Pipeline, Result, Storage,
};

/// Inventory in, layout JSON out.
pub struct LayoutPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> LayoutPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// 真實清單 (CSV) 不做碰撞示範
    fn layout_config(&self) -> Result<LayoutConfig> {
        let mut layout = self.config.layout();
        let is_csv = matches!(self.config.input_source()?, InputSource::Csv(_));
        if is_csv && layout.collision_rate > 0.0 {
            tracing::debug!("Collision demo disabled for CSV input");
            layout.collision_rate = 0.0;
        }
        Ok(layout)
    }

    /// 讀不到上次的位置檔時照常從頭排版
    fn position_cache(&self) -> Option<PositionCache> {
        let path = self.config.positions_file()?;
        match PositionCache::load(&self.storage, path) {
            Ok(cache) => Some(cache),
            Err(e) => {
                tracing::warn!("⚠️ Ignoring positions file '{}': {}", path, e);
                None
            }
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for LayoutPipeline<S, C> {
    fn extract(&self) -> Result<Vec<AppRecord>> {
        match self.config.input_source()? {
            InputSource::Csv(path) => {
                tracing::debug!("Reading inventory from: {}", path.display());
                let data = self.storage.read_file(&path.to_string_lossy())?;
                let records = parse_inventory(&data)?;
                tracing::info!("📥 Loaded {} apps from {}", records.len(), path.display());
                log_business_summary(&records);
                Ok(records)
            }
            InputSource::Synthetic { num_apps, seed } => {
                tracing::info!("🧪 Generating synthetic test data with {} apps", num_apps);
                Ok(generate_test_data(num_apps, seed))
            }
        }
    }

    fn transform(&self, records: Vec<AppRecord>) -> Result<LayoutOutput> {
        let mut engine = ContinentLayoutEngine::new(self.layout_config()?);
        if let Some(cache) = self.position_cache() {
            engine = engine.with_position_cache(cache);
        }

        engine.load_apps(records);
        engine.generate_layout()
    }

    fn load(&self, output: LayoutOutput) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let json_data = serde_json::to_string_pretty(&output)?;

        tracing::debug!("Writing layout ({} bytes) to storage", json_data.len());
        self.storage.write_file(&output_path, json_data.as_bytes())?;

        for cluster in &output.clusters {
            let connections: usize = cluster
                .applications
                .iter()
                .map(|app| app.connections.len())
                .sum();
            tracing::info!(
                "  {}: {} apps, {} connections",
                cluster.name,
                cluster.hex_count,
                connections
            );
        }

        Ok(output_path)
    }
}
