use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct LayoutRunner<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> LayoutRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&mut self) -> Result<String> {
        tracing::info!("Starting layout run...");

        // Extract
        let records = self.pipeline.extract()?;
        tracing::info!("Extracted {} application records", records.len());
        self.monitor.log_stats("Extract");

        // Transform
        let output = self.pipeline.transform(records)?;
        tracing::info!(
            "Laid out {} continents, {} applications",
            output.clusters.len(),
            output.application_count()
        );
        self.monitor.log_stats("Layout");

        // Load
        let output_path = self.pipeline.load(output)?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
