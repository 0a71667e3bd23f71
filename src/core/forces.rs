//! Force-directed placement of continent centroids.

use crate::config::LayoutConfig;
use crate::domain::model::Continent;
use sha2::{Digest, Sha256};
use std::f64::consts::PI;

const DISTANCE_EPSILON: f64 = 0.1;
const SPRING_FACTOR: f64 = 0.1;
const ATTRACTION_BASE: f64 = 0.3;
const ATTRACTION_FACTOR: f64 = 0.05;
const REPULSION_FACTOR: f64 = 0.5;
const INITIAL_DAMPING: f64 = 0.8;
const UNCONNECTED_GAP_MULTIPLIER: f64 = 3.0;

/// Deterministic start position inside a `scale`-sided square centred on
/// the origin, derived from the continent name only.
pub fn hash_position(name: &str, scale: f64) -> (f64, f64) {
    let digest = Sha256::digest(name.as_bytes());
    let x = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let y = u32::from_be_bytes([digest[4], digest[5], digest[6], digest[7]]);
    let unit = |v: u32| v as f64 / u32::MAX as f64 - 0.5;
    (unit(x) * scale, unit(y) * scale)
}

/// Approximate circle radius of a territory with `target_size` hexes.
pub fn territory_radius(target_size: usize) -> f64 {
    (target_size as f64 / PI).sqrt() * 2.0
}

/// Signed force along the c1 -> c2 direction; positive pulls the pair together.
fn pair_force(c1: &Continent, c2: &Continent, dist: f64, config: &LayoutConfig) -> f64 {
    let radii = territory_radius(c1.target_size) + territory_radius(c2.target_size);
    let strength = c1.combined_strength(c2);

    let (ideal_dist, attraction) = if strength > 0 {
        (
            radii + config.connected_gap as f64,
            ATTRACTION_BASE * (1.0 + strength as f64).ln(),
        )
    } else {
        (radii + config.water_gap as f64 * UNCONNECTED_GAP_MULTIPLIER, 0.0)
    };

    let spring_force = (dist - ideal_dist) * SPRING_FACTOR;
    let attract_force = attraction * (dist - ideal_dist) * ATTRACTION_FACTOR;

    let min_dist = radii + config.water_gap as f64;
    let repulsion = (min_dist - dist).max(0.0) * REPULSION_FACTOR;

    spring_force + attract_force - repulsion
}

/// Runs the fixed-iteration simulation and stores the settled centroids,
/// recentred so their mean lies on the origin.
pub fn position_centroids(continents: &mut [Continent], config: &LayoutConfig) {
    let mut positions: Vec<(f64, f64)> = continents
        .iter()
        .map(|c| hash_position(&c.name, config.initial_scale))
        .collect();

    let iterations = config.force_iterations;
    for iteration in 0..iterations {
        let mut forces = vec![(0.0f64, 0.0f64); continents.len()];

        for i in 0..continents.len() {
            for j in (i + 1)..continents.len() {
                let (x1, y1) = positions[i];
                let (x2, y2) = positions[j];
                let dx = x2 - x1;
                let dy = y2 - y1;
                let dist = (dx * dx + dy * dy).sqrt() + DISTANCE_EPSILON;
                let (nx, ny) = (dx / dist, dy / dist);

                let total_force = pair_force(&continents[i], &continents[j], dist, config);

                forces[i].0 += nx * total_force;
                forces[i].1 += ny * total_force;
                forces[j].0 -= nx * total_force;
                forces[j].1 -= ny * total_force;
            }
        }

        // 線性冷卻
        let damping = INITIAL_DAMPING * (1.0 - iteration as f64 / iterations as f64);
        for (position, force) in positions.iter_mut().zip(&forces) {
            position.0 += force.0 * damping;
            position.1 += force.1 * damping;
        }
    }

    if !positions.is_empty() {
        let count = positions.len() as f64;
        let mean_x = positions.iter().map(|p| p.0).sum::<f64>() / count;
        let mean_y = positions.iter().map(|p| p.1).sum::<f64>() / count;
        for position in positions.iter_mut() {
            position.0 -= mean_x;
            position.1 -= mean_y;
        }
    }

    for (continent, position) in continents.iter_mut().zip(positions) {
        continent.centroid = position;
    }
}
