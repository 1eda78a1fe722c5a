use std::path::Path;

use anyhow::{Context, Result};

use super::header_index;

/// One hospital from the locations dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalLocation {
    pub name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub beds: i64,
    pub trauma: String,
}

pub fn load_hospital_locations(path: &Path) -> Result<Vec<HospitalLocation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed opening hospital locations CSV {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed reading headers from {}", path.display()))?
        .clone();

    let name_idx = header_index(&headers, "NAME")?;
    let city_idx = header_index(&headers, "CITY")?;
    let lat_idx = header_index(&headers, "LATITUDE")?;
    let lon_idx = header_index(&headers, "LONGITUDE")?;
    let beds_idx = header_index(&headers, "BEDS")?;
    let trauma_idx = header_index(&headers, "TRAUMA")?;

    let mut out = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Failed reading row from {}", path.display()))?;
        let latitude: f64 = record
            .get(lat_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Failed parsing LATITUDE in row {} of {}", row + 1, path.display()))?;
        let longitude: f64 = record
            .get(lon_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Failed parsing LONGITUDE in row {} of {}", row + 1, path.display()))?;
        let beds: i64 = record
            .get(beds_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Failed parsing BEDS in row {} of {}", row + 1, path.display()))?;
        out.push(HospitalLocation {
            name: record.get(name_idx).unwrap_or("").to_string(),
            city: record.get(city_idx).unwrap_or("").to_string(),
            latitude,
            longitude,
            beds,
            trauma: record.get(trauma_idx).unwrap_or("").to_string(),
        });
    }
    Ok(out)
}
