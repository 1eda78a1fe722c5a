use std::path::Path;

use anyhow::{Context, Result};

use super::header_index;

/// One Medicare inpatient billing record. Row identity in the source is
/// (provider, diagnosis group); the three charge fields stay as
/// currency-prefixed strings until the transform layer parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InpatientCharge {
    pub drg_definition: String,
    pub provider_id: String,
    pub provider_name: String,
    pub provider_state: String,
    pub average_covered_charges: String,
    pub average_total_payments: String,
    pub average_medicare_payments: String,
}

pub fn load_inpatient_charges(path: &Path) -> Result<Vec<InpatientCharge>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed opening inpatient charges CSV {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed reading headers from {}", path.display()))?
        .clone();

    let drg_idx = header_index(&headers, "DRG Definition")?;
    let id_idx = header_index(&headers, "Provider Id")?;
    let name_idx = header_index(&headers, "Provider Name")?;
    let state_idx = header_index(&headers, "Provider State")?;
    let covered_idx = header_index(&headers, "Average Covered Charges")?;
    let total_idx = header_index(&headers, "Average Total Payments")?;
    let medicare_idx = header_index(&headers, "Average Medicare Payments")?;

    let mut out = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed reading row from {}", path.display()))?;
        out.push(InpatientCharge {
            drg_definition: record.get(drg_idx).unwrap_or("").to_string(),
            provider_id: record.get(id_idx).unwrap_or("").to_string(),
            provider_name: record.get(name_idx).unwrap_or("").to_string(),
            provider_state: record.get(state_idx).unwrap_or("").to_string(),
            average_covered_charges: record.get(covered_idx).unwrap_or("").to_string(),
            average_total_payments: record.get(total_idx).unwrap_or("").to_string(),
            average_medicare_payments: record.get(medicare_idx).unwrap_or("").to_string(),
        });
    }
    Ok(out)
}
