//! Constrained growth of continent territories on the hex grid.

use crate::config::LayoutConfig;
use crate::domain::hex::HexCoord;
use crate::domain::model::Continent;
use crate::utils::error::{LayoutError, Result};
use std::collections::{BTreeMap, HashSet};

/// Largest square ring scanned when a start hex is already taken.
pub const SPIRAL_SEARCH_RADIUS: i32 = 100;

/// Spatial index of claimed hexes, keyed by coordinate, owned by the grower
/// for the duration of territory growth.
#[derive(Debug, Default, Clone)]
pub struct OccupancyArena {
    owners: BTreeMap<HexCoord, String>,
}

impl OccupancyArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, hex: HexCoord) -> bool {
        self.owners.contains_key(&hex)
    }

    pub fn owner(&self, hex: HexCoord) -> Option<&str> {
        self.owners.get(&hex).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Claims `hex` for `continent_id`. A hex already owned by anyone is
    /// refused with a partition violation.
    pub fn claim(&mut self, hex: HexCoord, continent_id: &str) -> Result<()> {
        if let Some(existing) = self.owners.get(&hex) {
            return Err(LayoutError::PartitionViolation {
                hex,
                first: existing.clone(),
                second: continent_id.to_string(),
            });
        }
        self.owners.insert(hex, continent_id.to_string());
        Ok(())
    }

    /// Nearest unoccupied hex to `start`, scanning square rings outward.
    /// Falls back to `start` itself when every ring is full.
    pub fn nearest_empty(&self, start: HexCoord) -> HexCoord {
        if !self.is_occupied(start) {
            return start;
        }

        for radius in 1..=SPIRAL_SEARCH_RADIUS {
            for dq in -radius..=radius {
                for dr in -radius..=radius {
                    let candidate = HexCoord::new(start.q + dq, start.r + dr);
                    if !self.is_occupied(candidate) {
                        return candidate;
                    }
                }
            }
        }

        tracing::warn!(
            "⚠️ No free hex within radius {} of ({}, {}), reusing occupied start",
            SPIRAL_SEARCH_RADIUS,
            start.q,
            start.r
        );
        start
    }

    /// Territories are pairwise disjoint and their union is exactly the set
    /// of claimed hexes.
    pub fn verify(&self, continents: &[Continent]) -> Result<()> {
        let mut seen: BTreeMap<HexCoord, &str> = BTreeMap::new();
        for continent in continents {
            for hex in &continent.territory {
                if let Some(first) = seen.insert(*hex, continent.id.as_str()) {
                    return Err(LayoutError::PartitionViolation {
                        hex: *hex,
                        first: first.to_string(),
                        second: continent.id.clone(),
                    });
                }
                match self.owner(*hex) {
                    Some(owner) if owner == continent.id => {}
                    other => {
                        return Err(LayoutError::PartitionViolation {
                            hex: *hex,
                            first: other.unwrap_or("<unclaimed>").to_string(),
                            second: continent.id.clone(),
                        })
                    }
                }
            }
        }

        if let Some((hex, owner)) = self.owners.iter().find(|(hex, _)| !seen.contains_key(hex)) {
            return Err(LayoutError::PartitionViolation {
                hex: *hex,
                first: owner.clone(),
                second: "<no territory>".to_string(),
            });
        }
        Ok(())
    }
}

/// Processing order: largest `target_size` first, ties by model order.
pub fn growth_order(continents: &[Continent]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..continents.len()).collect();
    order.sort_by(|&a, &b| continents[b].target_size.cmp(&continents[a].target_size));
    order
}

/// True when `hex` sits closer than the required gap to any other continent
/// that has already committed territory.
fn too_close_to_others(
    hex: HexCoord,
    index: usize,
    continents: &[Continent],
    config: &LayoutConfig,
) -> bool {
    let me = &continents[index];
    continents
        .iter()
        .enumerate()
        .filter(|(other_idx, other)| *other_idx != index && !other.territory.is_empty())
        .any(|(_, other)| {
            let required_gap = if me.combined_strength(other) > 0 {
                config.connected_gap
            } else {
                config.water_gap
            };
            other
                .territory
                .iter()
                .any(|claimed| hex.distance(*claimed) < required_gap)
        })
}

/// Grows one continent's territory outward from its centroid, claiming each
/// accepted hex in `arena`. Returns the claimed hexes in claim order.
pub fn grow_territory(
    index: usize,
    continents: &[Continent],
    arena: &mut OccupancyArena,
    config: &LayoutConfig,
) -> Result<Vec<HexCoord>> {
    let continent = &continents[index];
    let (cx, cy) = continent.centroid;

    let start = arena.nearest_empty(HexCoord::from_point(cx, cy));

    let mut territory = Vec::new();
    let mut frontier = vec![start];
    let mut visited: HashSet<HexCoord> = HashSet::from([start]);

    while territory.len() < continent.target_size && !frontier.is_empty() {
        // 由近到遠擴張 (stable sort 保留加入順序)
        frontier.sort_by(|a, b| {
            a.squared_distance_to(cx, cy)
                .total_cmp(&b.squared_distance_to(cx, cy))
        });
        let hex = frontier.remove(0);

        if arena.is_occupied(hex) || too_close_to_others(hex, index, continents, config) {
            continue;
        }

        arena.claim(hex, &continent.id)?;
        territory.push(hex);

        for neighbor in hex.neighbors() {
            if visited.insert(neighbor) {
                frontier.push(neighbor);
            }
        }
    }

    Ok(territory)
}

/// Grows every territory in [`growth_order`], then checks the partition.
pub fn grow_territories(
    continents: &mut [Continent],
    config: &LayoutConfig,
) -> Result<OccupancyArena> {
    let mut arena = OccupancyArena::new();

    for index in growth_order(continents) {
        let claimed = grow_territory(index, continents, &mut arena, config)?;
        let continent = &mut continents[index];
        continent.territory = claimed.into_iter().collect();

        tracing::debug!(
            "  {}: {} hexes (target: {})",
            continent.name,
            continent.territory.len(),
            continent.target_size
        );
        if continent.territory.len() < continent.target_size {
            tracing::debug!(
                "  {} boxed in at {} of {} hexes",
                continent.name,
                continent.territory.len(),
                continent.target_size
            );
        }
    }

    arena.verify(continents)?;
    Ok(arena)
}
