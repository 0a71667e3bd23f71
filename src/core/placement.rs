//! Assignment of individual applications to hexes inside their territory.

use crate::config::LayoutConfig;
use crate::domain::hex::HexCoord;
use crate::domain::model::Continent;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;

fn by_distance(centroid: (f64, f64)) -> impl Fn(&HexCoord, &HexCoord) -> Ordering {
    move |a, b| {
        a.squared_distance_to(centroid.0, centroid.1)
            .total_cmp(&b.squared_distance_to(centroid.0, centroid.1))
            .then_with(|| a.cmp(b))
    }
}

/// Places every app of `continent` on its own hex. Externally connected
/// apps take the hexes farthest from the centroid, internal ones the
/// nearest. Apps left over once the territory is full stay unplaced.
///
/// Indicator flags are drawn from `rng` once per app in placement order.
pub fn place_apps<R: Rng>(continent: &mut Continent, indicator_rate: f64, rng: &mut R) {
    if continent.territory.is_empty() {
        return;
    }

    let order = by_distance(continent.centroid);
    let mut center_first: Vec<HexCoord> = continent.territory.iter().copied().collect();
    center_first.sort_by(&order);
    let mut edge_first = center_first.clone();
    edge_first.sort_by(|a, b| order(b, a));

    // 外部連線多的優先 (stable)
    let mut placement_order: Vec<usize> = (0..continent.apps.len()).collect();
    placement_order.sort_by(|&a, &b| {
        continent.apps[b]
            .external_connection_count
            .cmp(&continent.apps[a].external_connection_count)
    });

    let mut assigned: HashSet<HexCoord> = HashSet::new();
    for idx in placement_order {
        let app = &mut continent.apps[idx];

        if rng.gen::<f64>() < indicator_rate {
            app.show_position_indicator = true;
        }

        let candidates = if app.external_connection_count > 0 {
            &edge_first
        } else {
            &center_first
        };

        app.grid_position = candidates.iter().copied().find(|hex| assigned.insert(*hex));
        if app.grid_position.is_none() {
            tracing::debug!("  {} has no free hex left in {}", app.id, continent.name);
        }
    }
}

/// Demonstration-only duplicate positions: in up to
/// `max(1, total_apps × collision_rate)` continents with three or more placed
/// apps, the second placed app is moved onto the first one's hex. Returns
/// the number of collisions created.
pub fn inject_collisions(continents: &mut [Continent], collision_rate: f64) -> usize {
    if collision_rate <= 0.0 {
        return 0;
    }

    let total_apps: usize = continents.iter().map(|c| c.apps.len()).sum();
    let wanted = ((total_apps as f64 * collision_rate) as usize).max(1);
    let mut created = 0;

    for continent in continents.iter_mut() {
        if created >= wanted {
            break;
        }

        let placed: Vec<usize> = continent
            .apps
            .iter()
            .enumerate()
            .filter(|(_, app)| app.grid_position.is_some())
            .map(|(idx, _)| idx)
            .take(3)
            .collect();
        if placed.len() < 3 {
            continue;
        }

        continent.apps[placed[1]].grid_position = continent.apps[placed[0]].grid_position;
        created += 1;
        tracing::info!("  Created collision in {}", continent.name);
    }

    created
}

/// Places apps in every continent, then applies the collision demo.
pub fn place_all<R: Rng>(
    continents: &mut [Continent],
    config: &LayoutConfig,
    rng: &mut R,
) -> usize {
    for continent in continents.iter_mut() {
        place_apps(continent, config.indicator_rate, rng);
    }
    inject_collisions(continents, config.collision_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{App, AppRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn continent_with_territory(externals: &[u32], radius: i32) -> Continent {
        let apps = externals
            .iter()
            .enumerate()
            .map(|(i, ext)| {
                let mut app = App::from(AppRecord::new(format!("app_{}", i), "Ops"));
                app.external_connection_count = *ext;
                app
            })
            .collect();
        let mut continent = Continent::new(0, "Ops", apps, 0.2);
        for q in -radius..=radius {
            for r in -radius..=radius {
                let hex = HexCoord::new(q, r);
                if hex.distance(HexCoord::ORIGIN) <= radius as u32 {
                    continent.territory.insert(hex);
                }
            }
        }
        continent
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_internal_apps_take_center_external_apps_take_edge() {
        let mut continent = continent_with_territory(&[0, 2, 0], 1);
        place_apps(&mut continent, 0.0, &mut rng());

        assert_eq!(continent.apps[0].grid_position, Some(HexCoord::ORIGIN));
        let external = continent.apps[1].grid_position.unwrap();
        assert_eq!(external.distance(HexCoord::ORIGIN), 1);
        let second_internal = continent.apps[2].grid_position.unwrap();
        assert_eq!(second_internal.distance(HexCoord::ORIGIN), 1);
        assert_ne!(second_internal, external);
    }

    #[test]
    fn test_more_apps_than_hexes_leaves_rest_unplaced() {
        let mut continent = continent_with_territory(&[0, 0, 0], 0);
        place_apps(&mut continent, 0.0, &mut rng());

        let placed = continent.placed_apps().count();
        assert_eq!(placed, 1);
        assert_eq!(continent.apps[0].grid_position, Some(HexCoord::ORIGIN));
        assert_eq!(continent.apps[2].grid_position, None);
    }

    #[test]
    fn test_empty_territory_places_nothing() {
        let mut continent = continent_with_territory(&[0, 1], 1);
        continent.territory.clear();
        place_apps(&mut continent, 1.0, &mut rng());
        assert!(continent.apps.iter().all(|a| a.grid_position.is_none()));
        assert!(continent.apps.iter().all(|a| !a.show_position_indicator));
    }

    #[test]
    fn test_indicator_rate_extremes() {
        let mut all = continent_with_territory(&[0, 0, 1, 3], 1);
        place_apps(&mut all, 1.0, &mut rng());
        assert!(all.apps.iter().all(|a| a.show_position_indicator));

        let mut none = continent_with_territory(&[0, 0, 1, 3], 1);
        place_apps(&mut none, 0.0, &mut rng());
        assert!(none.apps.iter().all(|a| !a.show_position_indicator));
    }

    #[test]
    fn test_collision_moves_second_app_onto_first() {
        let mut continents = vec![continent_with_territory(&[0, 0, 0, 0], 1)];
        place_apps(&mut continents[0], 0.0, &mut rng());
        let first = continents[0].apps[0].grid_position;

        assert_eq!(inject_collisions(&mut continents, 0.01), 1);
        assert_eq!(continents[0].apps[1].grid_position, first);
        assert_ne!(continents[0].apps[2].grid_position, first);
    }

    #[test]
    fn test_collisions_disabled_at_zero_rate() {
        let mut continents = vec![continent_with_territory(&[0, 0, 0, 0], 1)];
        place_apps(&mut continents[0], 0.0, &mut rng());
        let before = continents.clone();

        assert_eq!(inject_collisions(&mut continents, 0.0), 0);
        assert_eq!(continents, before);
    }

    #[test]
    fn test_collision_skips_small_continents() {
        let mut continents = vec![continent_with_territory(&[0, 0], 1)];
        place_apps(&mut continents[0], 0.0, &mut rng());
        assert_eq!(inject_collisions(&mut continents, 0.5), 0);
    }
}
