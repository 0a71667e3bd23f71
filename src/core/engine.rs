use crate::adapters::position_cache::PositionCache;
use crate::config::LayoutConfig;
use crate::core::territory::OccupancyArena;
use crate::core::{connectivity, forces, output, placement, territory};
use crate::domain::model::{App, AppRecord, Continent, LayoutOutput};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Runs the continent layout: centroids, territories, app placement, output.
pub struct ContinentLayoutEngine {
    config: LayoutConfig,
    continents: Vec<Continent>,
    position_cache: Option<PositionCache>,
    occupied: OccupancyArena,
}

impl ContinentLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            continents: Vec::new(),
            position_cache: None,
            occupied: OccupancyArena::new(),
        }
    }

    pub fn with_position_cache(mut self, cache: PositionCache) -> Self {
        self.position_cache = Some(cache);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    /// Hexes claimed during the last territory growth.
    pub fn occupied(&self) -> &OccupancyArena {
        &self.occupied
    }

    /// Groups records into one continent per business (sorted by name) and
    /// computes connection strengths.
    pub fn load_apps(&mut self, records: Vec<AppRecord>) {
        let mut by_business: BTreeMap<String, Vec<App>> = BTreeMap::new();
        for record in records {
            by_business
                .entry(record.business.clone())
                .or_default()
                .push(App::from(record));
        }

        self.continents = by_business
            .into_iter()
            .enumerate()
            .map(|(index, (business, apps))| {
                Continent::new(index, business, apps, self.config.padding_ratio)
            })
            .collect();
        self.occupied = OccupancyArena::new();

        connectivity::analyze(&mut self.continents);
    }

    pub fn app_count(&self) -> usize {
        self.continents.iter().map(|c| c.apps.len()).sum()
    }

    fn apply_position_cache(&mut self) {
        let Some(cache) = &self.position_cache else {
            return;
        };

        let mut reused = 0;
        for continent in self.continents.iter_mut() {
            if let Some(hex) = cache.get(&continent.name) {
                continent.centroid = (hex.q as f64, hex.r as f64);
                reused += 1;
            }
        }
        tracing::info!(
            "📌 Reused cached positions for {}/{} continents",
            reused,
            self.continents.len()
        );
    }

    pub fn generate_layout(&mut self) -> Result<LayoutOutput> {
        tracing::info!(
            "Generating layout for {} continents, {} apps",
            self.continents.len(),
            self.app_count()
        );

        tracing::info!("Phase 1: Positioning continent centroids...");
        forces::position_centroids(&mut self.continents, &self.config);
        self.apply_position_cache();

        tracing::info!("Phase 2: Growing territories...");
        self.occupied = territory::grow_territories(&mut self.continents, &self.config)?;

        tracing::info!("Phase 3: Placing apps...");
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let collisions = placement::place_all(&mut self.continents, &self.config, &mut rng);
        if collisions > 0 {
            tracing::info!("  Total: {} collision(s)", collisions);
        }

        tracing::info!("Phase 4: Building output...");
        Ok(output::build_output(&self.continents))
    }
}
