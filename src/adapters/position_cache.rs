use crate::domain::hex::HexCoord;
use crate::domain::model::LayoutOutput;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::BTreeMap;

/// Continent name -> footprint centroid from an earlier run, used as the
/// territory start point so continents stay put across reruns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionCache {
    positions: BTreeMap<String, HexCoord>,
}

impl PositionCache {
    pub fn from_output(output: &LayoutOutput) -> Self {
        let positions = output
            .clusters
            .iter()
            .map(|cluster| (cluster.name.clone(), HexCoord::from(cluster.grid_position)))
            .collect();
        Self { positions }
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        let output: LayoutOutput = serde_json::from_slice(data)?;
        Ok(Self::from_output(&output))
    }

    pub fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path)?;
        let cache = Self::from_json(&data)?;
        tracing::debug!("Loaded {} cached continent positions from {}", cache.len(), path);
        Ok(cache)
    }

    pub fn insert(&mut self, continent: impl Into<String>, hex: HexCoord) {
        self.positions.insert(continent.into(), hex);
    }

    pub fn get(&self, continent: &str) -> Option<HexCoord> {
        self.positions.get(continent).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
