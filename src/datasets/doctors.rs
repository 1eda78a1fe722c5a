use std::path::Path;

use anyhow::{Context, Result};

use super::header_index;

/// One licensed physician record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorRecord {
    pub county: String,
    pub activities_in_medicine: String,
    pub primary_area_of_practice: String,
}

pub fn load_doctors(path: &Path) -> Result<Vec<DoctorRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed opening doctors CSV {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed reading headers from {}", path.display()))?
        .clone();

    let county_idx = header_index(&headers, "County")?;
    let activities_idx = header_index(&headers, "Activities in Medicine")?;
    let practice_idx = header_index(&headers, "Primary Area of Practice")?;

    let mut out = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed reading row from {}", path.display()))?;
        out.push(DoctorRecord {
            county: record.get(county_idx).unwrap_or("").to_string(),
            activities_in_medicine: record.get(activities_idx).unwrap_or("").to_string(),
            primary_area_of_practice: record.get(practice_idx).unwrap_or("").to_string(),
        });
    }
    Ok(out)
}
