use crate::domain::hex::HexCoord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 大陸調色盤，依名稱排序後循環使用
pub const CONTINENT_COLORS: [&str; 8] = [
    "#1f78b4", "#e31a1c", "#33a02c", "#6a3d9a", "#ff7f00", "#a6cee3", "#b2df8a", "#fdbf6f",
];

pub const CONNECTION_TYPE: &str = "link";
pub const CONNECTION_STRENGTH: &str = "medium";
pub const CLUSTER_PRIORITY: &str = "Normal";

fn default_status() -> u8 {
    100
}

/// Application record as handed over by an ingestion source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub id: String,
    pub name: String,
    pub business: String,
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default = "default_status")]
    pub status: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub show_indicator: bool,
}

impl AppRecord {
    pub fn new(id: impl Into<String>, business: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            business: business.into(),
            connections: Vec::new(),
            status: default_status(),
            description: None,
            show_indicator: false,
        }
    }

    pub fn with_connections<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.connections = targets.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct App {
    pub id: String,
    pub name: String,
    pub business: String,
    pub connections: Vec<String>,
    pub status: u8,
    pub description: Option<String>,
    pub grid_position: Option<HexCoord>,
    pub show_position_indicator: bool,

    // 衍生欄位
    pub external_connection_count: u32,
}

impl From<AppRecord> for App {
    fn from(record: AppRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            business: record.business,
            connections: record.connections,
            status: record.status.min(100),
            description: record.description.filter(|d| !d.trim().is_empty()),
            grid_position: None,
            show_position_indicator: record.show_indicator,
            external_connection_count: 0,
        }
    }
}

/// One business grouping and the hex territory it ends up owning.
#[derive(Debug, Clone, PartialEq)]
pub struct Continent {
    pub id: String,
    pub name: String,
    pub color: String,
    pub apps: Vec<App>,

    pub centroid: (f64, f64),
    pub territory: BTreeSet<HexCoord>,
    pub target_size: usize,

    /// continent id -> 連線數 (單向，讀取時合併雙向)
    pub connections: HashMap<String, u32>,
}

impl Continent {
    pub fn new(index: usize, name: impl Into<String>, apps: Vec<App>, padding_ratio: f64) -> Self {
        let target_size = Self::target_size_for(apps.len(), padding_ratio);
        Self {
            id: format!("continent_{}", index),
            name: name.into(),
            color: CONTINENT_COLORS[index % CONTINENT_COLORS.len()].to_string(),
            apps,
            centroid: (0.0, 0.0),
            territory: BTreeSet::new(),
            target_size,
            connections: HashMap::new(),
        }
    }

    pub fn target_size_for(app_count: usize, padding_ratio: f64) -> usize {
        (app_count as f64 * (1.0 + padding_ratio)).round() as usize
    }

    pub fn strength_to(&self, other_id: &str) -> u32 {
        self.connections.get(other_id).copied().unwrap_or(0)
    }

    /// Symmetrised connection strength between two continents.
    pub fn combined_strength(&self, other: &Continent) -> u32 {
        self.strength_to(&other.id) + other.strength_to(&self.id)
    }

    /// Arithmetic mean of the claimed hexes, falling back to the physics
    /// centroid while the territory is still empty.
    pub fn footprint_centroid(&self) -> (f64, f64) {
        if self.territory.is_empty() {
            return self.centroid;
        }
        let count = self.territory.len() as f64;
        let (sum_q, sum_r) = self
            .territory
            .iter()
            .fold((0i64, 0i64), |(q, r), hex| (q + hex.q as i64, r + hex.r as i64));
        (sum_q as f64 / count, sum_r as f64 / count)
    }

    pub fn placed_apps(&self) -> impl Iterator<Item = &App> {
        self.apps.iter().filter(|app| app.grid_position.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub q: i32,
    pub r: i32,
}

impl From<HexCoord> for GridPosition {
    fn from(hex: HexCoord) -> Self {
        Self { q: hex.q, r: hex.r }
    }
}

impl From<GridPosition> for HexCoord {
    fn from(pos: GridPosition) -> Self {
        HexCoord::new(pos.q, pos.r)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionOutput {
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub strength: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationOutput {
    pub id: String,
    pub name: String,
    pub color: String,
    pub status: u8,
    pub grid_position: GridPosition,
    pub connections: Vec<ConnectionOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_position_indicator: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOutput {
    pub id: String,
    pub name: String,
    pub color: String,
    pub hex_count: usize,
    pub grid_position: GridPosition,
    pub priority: String,
    pub applications: Vec<ApplicationOutput>,
}

/// Final layout as consumed by the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOutput {
    pub clusters: Vec<ClusterOutput>,
}

impl LayoutOutput {
    pub fn application_count(&self) -> usize {
        self.clusters.iter().map(|c| c.applications.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_size_rounds_padded_count() {
        assert_eq!(Continent::target_size_for(1, 0.2), 1);
        assert_eq!(Continent::target_size_for(5, 0.2), 6);
        assert_eq!(Continent::target_size_for(4, 1.5), 10);
        assert_eq!(Continent::target_size_for(0, 0.2), 0);
    }

    #[test]
    fn test_app_from_record_clamps_status_and_drops_blank_description() {
        let mut record = AppRecord::new("APP_1", "Trading");
        record.status = 250;
        record.description = Some("   ".to_string());

        let app = App::from(record);
        assert_eq!(app.status, 100);
        assert_eq!(app.description, None);
        assert_eq!(app.grid_position, None);
    }

    #[test]
    fn test_footprint_centroid_is_mean_of_territory() {
        let mut continent = Continent::new(0, "Ops", Vec::new(), 0.2);
        continent.centroid = (7.5, -3.0);
        assert_eq!(continent.footprint_centroid(), (7.5, -3.0));

        continent.territory.insert(HexCoord::new(0, 0));
        continent.territory.insert(HexCoord::new(2, 0));
        continent.territory.insert(HexCoord::new(1, 3));
        assert_eq!(continent.footprint_centroid(), (1.0, 1.0));
    }

    #[test]
    fn test_application_output_omits_absent_optionals() {
        let app = ApplicationOutput {
            id: "a".to_string(),
            name: "A".to_string(),
            color: "#1f78b4".to_string(),
            status: 90,
            grid_position: GridPosition { q: 1, r: -1 },
            connections: vec![ConnectionOutput {
                to: "b".to_string(),
                kind: CONNECTION_TYPE.to_string(),
                strength: CONNECTION_STRENGTH.to_string(),
            }],
            description: None,
            show_position_indicator: None,
        };

        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["gridPosition"]["q"], 1);
        assert_eq!(json["connections"][0]["type"], "link");
        assert!(json.get("description").is_none());
        assert!(json.get("showPositionIndicator").is_none());
    }
}
