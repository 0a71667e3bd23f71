use crate::domain::hex::HexCoord;
use crate::domain::model::{
    ApplicationOutput, ClusterOutput, ConnectionOutput, Continent, LayoutOutput,
    CLUSTER_PRIORITY, CONNECTION_STRENGTH, CONNECTION_TYPE,
};

fn application_output(continent: &Continent) -> Vec<ApplicationOutput> {
    continent
        .apps
        .iter()
        .filter_map(|app| {
            let position = app.grid_position?;
            Some(ApplicationOutput {
                id: app.id.clone(),
                name: app.name.clone(),
                color: continent.color.clone(),
                status: app.status,
                grid_position: position.into(),
                connections: app
                    .connections
                    .iter()
                    .map(|target| ConnectionOutput {
                        to: target.clone(),
                        kind: CONNECTION_TYPE.to_string(),
                        strength: CONNECTION_STRENGTH.to_string(),
                    })
                    .collect(),
                description: app.description.clone(),
                show_position_indicator: app.show_position_indicator.then_some(true),
            })
        })
        .collect()
}

/// Builds the renderer-facing structure: clusters sorted by name, each
/// positioned at its rounded footprint centroid.
pub fn build_output(continents: &[Continent]) -> LayoutOutput {
    let mut sorted: Vec<&Continent> = continents.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let clusters = sorted
        .into_iter()
        .map(|continent| {
            let (q, r) = continent.footprint_centroid();
            let applications = application_output(continent);
            ClusterOutput {
                id: continent.id.clone(),
                name: continent.name.clone(),
                color: continent.color.clone(),
                hex_count: applications.len(),
                grid_position: HexCoord::from_point(q, r).into(),
                priority: CLUSTER_PRIORITY.to_string(),
                applications,
            }
        })
        .collect();

    LayoutOutput { clusters }
}
