use std::path::Path;

use anyhow::{Context, Result, anyhow};
use geojson::GeoJson;
use serde::Serialize;
use serde_json::{Map, Value};

/// Property keys present in the source GeoJSON but unused downstream;
/// pruned before the required-field check.
pub const PRUNED_PROPERTIES: [&str; 9] = [
    "ext_id",
    "date_updated",
    "dis_status",
    "email",
    "phones",
    "url",
    "source",
    "OBJECTID",
    "addrln2",
];

/// Properties that must be present and non-null for a facility to survive
/// cleaning.
pub const REQUIRED_PROPERTIES: [&str; 7] =
    ["cat3", "org_name", "addrln1", "city", "state", "hours", "zip"];

/// One cleaned medical facility, ready for the map layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityRecord {
    pub name: String,
    pub category: String,
    pub org_name: String,
    pub addrln1: String,
    pub city: String,
    pub state: String,
    pub hours: String,
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Loads the raw per-feature property maps; cleaning happens in the
/// transform layer.
pub fn load_facility_properties(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed reading {}", path.display()))?;
    let geo: GeoJson = text
        .parse()
        .with_context(|| format!("Failed parsing GeoJSON {}", path.display()))?;
    let GeoJson::FeatureCollection(collection) = geo else {
        return Err(anyhow!(
            "{} is not a GeoJSON FeatureCollection",
            path.display()
        ));
    };
    Ok(collection
        .features
        .into_iter()
        .map(|feature| feature.properties.unwrap_or_default())
        .collect())
}
