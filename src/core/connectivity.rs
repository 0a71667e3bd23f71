//! Cross-continent connection counting.

use crate::domain::model::Continent;
use std::collections::HashMap;

/// Fills each continent's directed strength map and every app's
/// `external_connection_count`. Targets that resolve to no continent are
/// ignored.
pub fn analyze(continents: &mut [Continent]) {
    let app_to_continent: HashMap<String, usize> = continents
        .iter()
        .enumerate()
        .flat_map(|(idx, continent)| continent.apps.iter().map(move |app| (app.id.clone(), idx)))
        .collect();
    let continent_ids: Vec<String> = continents.iter().map(|c| c.id.clone()).collect();

    for (idx, continent) in continents.iter_mut().enumerate() {
        continent.connections.clear();

        for app in continent.apps.iter_mut() {
            let mut external = 0;
            for target in &app.connections {
                match app_to_continent.get(target) {
                    Some(&target_idx) if target_idx != idx => {
                        external += 1;
                        *continent
                            .connections
                            .entry(continent_ids[target_idx].clone())
                            .or_insert(0) += 1;
                    }
                    _ => {}
                }
            }
            app.external_connection_count = external;
        }
    }
}
