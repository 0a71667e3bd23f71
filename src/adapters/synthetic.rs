//! Synthetic universal-bank inventory for demos and load testing.

use crate::domain::model::AppRecord;
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet};

pub const BUSINESS_FUNCTIONS: [&str; 8] = [
    "Trading",
    "Risk Management",
    "Retail Banking",
    "Wealth Management",
    "Cards & Payments",
    "Corporate Banking",
    "Operations",
    "Technology & Infrastructure",
];

const APP_SUFFIXES: [&str; 12] = [
    "Hub", "Engine", "Platform", "Service", "System", "Gateway", "Manager", "Processor", "Core",
    "Plus", "Pro", "Central",
];

const MIN_APPS_PER_BUSINESS: usize = 5;
const EXTERNAL_LINK_PROBABILITY: f64 = 0.4;

fn prefixes(business: &str) -> &'static [&'static str] {
    match business {
        "Trading" => &["TRD", "FX", "EQ", "FI", "DERIV", "ALGO", "OMS", "EMS"],
        "Risk Management" => &["RISK", "VAR", "CREDIT", "MARKET", "OPS", "STRESS", "LIMIT"],
        "Retail Banking" => &["RET", "ACCT", "LOAN", "MORT", "SAVE", "CHECK", "MOBILE"],
        "Wealth Management" => &["WM", "PORT", "INVEST", "TRUST", "PLAN", "ADV"],
        "Cards & Payments" => &["CARD", "PAY", "AUTH", "FRAUD", "SETTLE", "CLEAR"],
        "Corporate Banking" => &["CORP", "LEND", "CASH", "TRADE", "FIN", "TREAS"],
        "Operations" => &["OPS", "SETTLE", "RECON", "CONFIRM", "CUSTODY", "CLEAR"],
        _ => &["INFRA", "DATA", "API", "SEC", "CLOUD", "NET"],
    }
}

/// Splits `num_apps` across the business functions with ±50% variance,
/// at least five apps each while the budget allows.
fn distribute<R: Rng>(num_apps: usize, rng: &mut R) -> Vec<(&'static str, usize)> {
    let businesses = BUSINESS_FUNCTIONS.len();
    let base = num_apps / businesses;
    let variance = base / 2;
    let mut remaining = num_apps;
    let mut counts = Vec::with_capacity(businesses);

    for (i, business) in BUSINESS_FUNCTIONS.iter().enumerate() {
        let count = if i == businesses - 1 {
            remaining
        } else {
            let drawn = rng.gen_range(base - variance..=base + variance);
            let reserved = (businesses - i - 1) * MIN_APPS_PER_BUSINESS;
            drawn
                .min(remaining.saturating_sub(reserved))
                .max(MIN_APPS_PER_BUSINESS)
                .min(remaining)
        };
        remaining -= count;
        counts.push((*business, count));
    }
    counts
}

/// Deterministic test inventory: names from business prefixes and generic
/// suffixes, 0–3 links inside the business and, for about 40% of apps,
/// 0–2 links into other businesses.
pub fn generate_test_data(num_apps: usize, seed: u64) -> Vec<AppRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let counts = distribute(num_apps, &mut rng);
    tracing::debug!("Apps per business: {:?}", counts);

    let mut records = Vec::with_capacity(num_apps);
    let mut ids = HashSet::new();

    for (business, count) in &counts {
        let names = prefixes(business);
        for _ in 0..*count {
            // 名稱空間有限，撞名時補序號
            let mut attempt = 0;
            let id = loop {
                let prefix = names.choose(&mut rng).copied().unwrap_or("APP");
                let suffix = APP_SUFFIXES.choose(&mut rng).copied().unwrap_or("Core");
                let num: u32 = rng.gen_range(1..=99);
                let candidate = if attempt < 50 {
                    format!("{}_{}_{}", prefix, suffix, num)
                } else {
                    format!("{}_{}_{}_{}", prefix, suffix, num, attempt)
                };
                if ids.insert(candidate.clone()) {
                    break candidate;
                }
                attempt += 1;
            };

            let mut record = AppRecord::new(id.clone(), *business);
            record.name = id.replace('_', " ");
            record.status = rng.gen_range(50..=100);
            record.description = Some(format!("{} application", business));
            records.push(record);
        }
    }

    let mut by_business: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in &records {
        by_business
            .entry(record.business.clone())
            .or_default()
            .push(record.id.clone());
    }

    for record in records.iter_mut() {
        let num_internal = rng.gen_range(0..=3usize);
        let num_external = if rng.gen::<f64>() < EXTERNAL_LINK_PROBABILITY {
            rng.gen_range(0..=2usize)
        } else {
            0
        };

        let same_business = by_business
            .get(&record.business)
            .into_iter()
            .flatten()
            .filter(|id| **id != record.id);
        let internal = same_business.cloned().choose_multiple(&mut rng, num_internal);
        record.connections.extend(internal);

        for _ in 0..num_external {
            let other = BUSINESS_FUNCTIONS
                .iter()
                .filter(|b| **b != record.business)
                .choose(&mut rng);
            if let Some(target) = other
                .and_then(|b| by_business.get(*b))
                .and_then(|ids| ids.choose(&mut rng))
            {
                record.connections.push(target.clone());
            }
        }
    }

    records
}
