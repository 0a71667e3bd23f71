use continent_layout::adapters::position_cache::PositionCache;
use continent_layout::adapters::synthetic::generate_test_data;
use continent_layout::domain::model::Continent;
use continent_layout::{AppRecord, ContinentLayoutEngine, HexCoord, LayoutConfig};
use std::collections::HashSet;

fn min_hex_distance(a: &Continent, b: &Continent) -> u32 {
    a.territory
        .iter()
        .flat_map(|x| b.territory.iter().map(move |y| x.distance(*y)))
        .min()
        .expect("both territories are non-empty")
}

fn two_continents(connected: bool) -> Vec<AppRecord> {
    let mut records: Vec<AppRecord> = (0..5)
        .map(|i| AppRecord::new(format!("alpha_{}", i), "Alpha"))
        .chain((0..5).map(|i| AppRecord::new(format!("beta_{}", i), "Beta")))
        .collect();
    if connected {
        records[0].connections.push("beta_0".to_string());
    }
    records
}

fn run(records: Vec<AppRecord>, config: LayoutConfig) -> ContinentLayoutEngine {
    let mut engine = ContinentLayoutEngine::new(config);
    engine.load_apps(records);
    engine.generate_layout().unwrap();
    engine
}

fn pinned(alpha: (i32, i32), beta: (i32, i32)) -> PositionCache {
    let mut cache = PositionCache::default();
    cache.insert("Alpha", HexCoord::new(alpha.0, alpha.1));
    cache.insert("Beta", HexCoord::new(beta.0, beta.1));
    cache
}

#[test]
fn test_connected_continents_settle_closer_than_unconnected() {
    let config = LayoutConfig::production();

    let connected = run(two_continents(true), config.clone());
    let unconnected = run(two_continents(false), config.clone());

    let near = min_hex_distance(&connected.continents()[0], &connected.continents()[1]);
    let far = min_hex_distance(&unconnected.continents()[0], &unconnected.continents()[1]);

    assert!(near >= config.connected_gap);
    assert!(far >= config.water_gap);
    assert!(near < far, "connected {} vs unconnected {}", near, far);
}

#[test]
fn test_connected_shores_touch_when_neighbors() {
    let mut engine = ContinentLayoutEngine::new(LayoutConfig::production())
        .with_position_cache(pinned((-2, 0), (1, 0)));
    engine.load_apps(two_continents(true));
    engine.generate_layout().unwrap();

    let continents = engine.continents();
    assert_eq!(continents[0].territory.len(), 6);
    assert_eq!(continents[1].territory.len(), 6);
    assert_eq!(min_hex_distance(&continents[0], &continents[1]), 1);
}

#[test]
fn test_unconnected_neighbors_keep_water_gap() {
    let mut engine = ContinentLayoutEngine::new(LayoutConfig::production())
        .with_position_cache(pinned((-2, 0), (1, 0)));
    engine.load_apps(two_continents(false));
    engine.generate_layout().unwrap();

    let continents = engine.continents();
    assert_eq!(min_hex_distance(&continents[0], &continents[1]), 2);
}

#[test]
fn test_padded_territory_places_every_app_once() {
    let config = LayoutConfig {
        padding_ratio: 1.5,
        ..LayoutConfig::production()
    };
    let records = (0..4)
        .map(|i| AppRecord::new(format!("solo_{}", i), "Solo"))
        .collect();

    let mut engine = ContinentLayoutEngine::new(config);
    engine.load_apps(records);
    let output = engine.generate_layout().unwrap();

    let continent = &engine.continents()[0];
    assert_eq!(continent.target_size, 10);
    assert_eq!(continent.territory.len(), 10);

    let positions: Vec<_> = continent.apps.iter().filter_map(|a| a.grid_position).collect();
    assert_eq!(positions.len(), 4);
    assert_eq!(positions.iter().collect::<HashSet<_>>().len(), 4);
    assert!(positions.iter().all(|p| continent.territory.contains(p)));
    assert_eq!(output.clusters[0].hex_count, 4);
}

#[test]
fn test_single_app_lands_on_origin() {
    let engine = run(vec![AppRecord::new("only", "Solo")], LayoutConfig::production());

    let continent = &engine.continents()[0];
    assert_eq!(continent.target_size, 1);
    assert_eq!(
        continent.territory.iter().copied().collect::<Vec<_>>(),
        vec![HexCoord::ORIGIN]
    );
    assert_eq!(continent.apps[0].grid_position, Some(HexCoord::ORIGIN));
}

#[test]
fn test_external_apps_sit_farther_out_than_internal_ones() {
    let mut records: Vec<AppRecord> = (0..12)
        .map(|i| AppRecord::new(format!("core_{}", i), "Core"))
        .collect();
    for record in records.iter_mut().take(4) {
        record.connections.push("edge_0".to_string());
    }
    records[5].connections.push("core_6".to_string());
    records.push(AppRecord::new("edge_0", "Edge"));
    records.push(AppRecord::new("edge_1", "Edge"));

    let engine = run(records, LayoutConfig::production());
    let core = &engine.continents()[0];
    assert_eq!(core.name, "Core");

    let (fq, fr) = core.footprint_centroid();
    let spread = |external: bool| {
        let distances: Vec<f64> = core
            .apps
            .iter()
            .filter(|a| (a.external_connection_count > 0) == external)
            .filter_map(|a| a.grid_position)
            .map(|h| h.squared_distance_to(fq, fr).sqrt())
            .collect();
        distances.iter().sum::<f64>() / distances.len() as f64
    };

    assert!(spread(true) >= spread(false));
}

#[test]
fn test_generated_layout_json_is_deterministic() {
    let render = || {
        let mut engine = ContinentLayoutEngine::new(LayoutConfig::default());
        engine.load_apps(generate_test_data(120, 7));
        serde_json::to_string_pretty(&engine.generate_layout().unwrap()).unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_synthetic_layout_honours_partition_gap_and_capacity() {
    let config = LayoutConfig::default();
    let engine = run(generate_test_data(200, 42), config.clone());
    let continents = engine.continents();

    let mut union = HashSet::new();
    for continent in continents {
        assert!(continent.territory.len() <= continent.target_size);
        for hex in &continent.territory {
            assert!(union.insert(*hex), "hex {:?} claimed twice", hex);
            assert_eq!(engine.occupied().owner(*hex), Some(continent.id.as_str()));
        }
    }
    assert_eq!(union.len(), engine.occupied().len());

    for (i, a) in continents.iter().enumerate() {
        for b in continents.iter().skip(i + 1) {
            if a.territory.is_empty() || b.territory.is_empty() {
                continue;
            }
            let required = if a.combined_strength(b) > 0 {
                config.connected_gap
            } else {
                config.water_gap
            };
            assert!(min_hex_distance(a, b) >= required, "{} / {}", a.name, b.name);
        }
    }
}

#[test]
fn test_collision_demo_duplicates_exactly_one_position() {
    let config = LayoutConfig {
        collision_rate: 0.001,
        ..LayoutConfig::default()
    };
    let engine = run(generate_test_data(100, 42), config);

    let duplicated: usize = engine
        .continents()
        .iter()
        .map(|c| {
            let placed: Vec<_> = c.apps.iter().filter_map(|a| a.grid_position).collect();
            placed.len() - placed.iter().collect::<HashSet<_>>().len()
        })
        .sum();
    assert_eq!(duplicated, 1);
}
