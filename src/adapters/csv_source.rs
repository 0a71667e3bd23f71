//! Application inventory from CSV/TSV files.
//!
//! Expected headers: `app_name,business` (required), `status`,
//! `description`, `connects_to` (semicolon separated app names),
//! `show_indicator`.

use crate::domain::model::AppRecord;
use crate::utils::error::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    app_name: String,
    #[serde(default)]
    business: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    connects_to: Option<String>,
    #[serde(default)]
    show_indicator: Option<String>,
}

fn to_app_id(name: &str) -> String {
    name.trim().replace(' ', "_")
}

fn parse_status(raw: Option<&str>) -> u8 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.trunc().clamp(0.0, 100.0) as u8)
        .unwrap_or(100)
}

fn parse_connections(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(';')
        .map(to_app_id)
        .filter(|target| !target.is_empty())
        .collect()
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes" | "y")
    )
}

/// Reads records from any reader. Rows without a name or business and
/// duplicate app ids are skipped with a warning.
pub fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<AppRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();

    for (idx, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row_num = idx + 2;
        let row = row?;

        let app_name = row.app_name.trim();
        if app_name.is_empty() {
            tracing::warn!("Row {} has no app_name, skipping", row_num);
            continue;
        }

        let business = row.business.trim();
        if business.is_empty() {
            tracing::warn!("Row {} ({}) has no business, skipping", row_num, app_name);
            continue;
        }

        let id = to_app_id(app_name);
        if !seen_ids.insert(id.clone()) {
            tracing::warn!("Duplicate app_name '{}' at row {}, skipping", app_name, row_num);
            continue;
        }

        records.push(AppRecord {
            id,
            name: app_name.to_string(),
            business: business.to_string(),
            connections: parse_connections(row.connects_to.as_deref()),
            status: parse_status(row.status.as_deref()),
            description: row
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            show_indicator: parse_flag(row.show_indicator.as_deref()),
        });
    }

    Ok(records)
}

const SNIFF_SAMPLE_BYTES: usize = 2048;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Tab when the leading sample has more tabs than commas, comma otherwise.
pub fn sniff_delimiter(data: &[u8]) -> u8 {
    let sample = &data[..data.len().min(SNIFF_SAMPLE_BYTES)];
    let tabs = sample.iter().filter(|&&b| b == b'\t').count();
    let commas = sample.iter().filter(|&&b| b == b',').count();
    if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Parses an inventory export whatever its extension: strips a UTF-8 BOM
/// and sniffs the delimiter from the content.
pub fn parse_inventory(data: &[u8]) -> Result<Vec<AppRecord>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    read_records(data, sniff_delimiter(data))
}

/// Loads a comma or tab separated inventory file.
pub fn load_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<AppRecord>> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let records = parse_inventory(&data)?;

    tracing::info!("📥 Loaded {} apps from {}", records.len(), path.display());
    log_business_summary(&records);
    Ok(records)
}

pub fn log_business_summary(records: &[AppRecord]) {
    let mut per_business: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *per_business.entry(record.business.as_str()).or_insert(0) += 1;
    }
    for (business, count) in per_business {
        tracing::debug!("  {}: {}", business, count);
    }
}
