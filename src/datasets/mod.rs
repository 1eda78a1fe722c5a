pub mod doctors;
pub mod facilities;
pub mod inpatient;
pub mod locations;
pub mod ratings;

use anyhow::{Context, Result};

/// Locates a column by trimmed header name. Some source headers carry
/// leading/trailing padding (e.g. " Average Covered Charges ").
pub(crate) fn header_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .with_context(|| format!("CSV missing required header '{name}'"))
}
