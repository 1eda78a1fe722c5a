use std::path::Path;

use anyhow::{Context, Result};

/// Hospital quality ratings, held as a dynamic table (headers + cells) so
/// the fully-null-column drop can run before any field extraction. An empty
/// cell is the null marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RatingTable {
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("Rating column '{name}' missing (or dropped as fully null)"))
    }

    /// Keeps only rows whose value in `column` equals `value` exactly.
    pub fn filter_rows(&self, column: &str, value: &str) -> Result<RatingTable> {
        let idx = self.column(column)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| row.get(idx).map(String::as_str) == Some(value))
            .cloned()
            .collect();
        Ok(RatingTable {
            headers: self.headers.clone(),
            rows,
        })
    }

    /// Drops columns that are null in every row. A table with no rows keeps
    /// all of its columns so a zero-row region still extracts cleanly.
    pub fn drop_fully_null_columns(&self) -> RatingTable {
        if self.rows.is_empty() {
            return self.clone();
        }
        let keep: Vec<usize> = (0..self.headers.len())
            .filter(|&j| {
                self.rows
                    .iter()
                    .any(|row| row.get(j).is_some_and(|cell| !cell.is_empty()))
            })
            .collect();
        RatingTable {
            headers: keep.iter().map(|&j| self.headers[j].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    keep.iter()
                        .map(|&j| row.get(j).cloned().unwrap_or_default())
                        .collect()
                })
                .collect(),
        }
    }
}

/// The rating fields consumed downstream, extracted after column pruning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalRating {
    pub provider_id: String,
    pub hospital_name: String,
    pub city: String,
    pub overall_rating: String,
    pub emergency_services: String,
    pub ownership: String,
}

pub fn extract_ratings(table: &RatingTable) -> Result<Vec<HospitalRating>> {
    let id_idx = table.column("Provider ID")?;
    let name_idx = table.column("Hospital Name")?;
    let city_idx = table.column("City")?;
    let rating_idx = table.column("Hospital overall rating")?;
    let emergency_idx = table.column("Emergency Services")?;
    let ownership_idx = table.column("Hospital Ownership")?;

    let cell = |row: &Vec<String>, idx: usize| row.get(idx).cloned().unwrap_or_default();

    Ok(table
        .rows
        .iter()
        .map(|row| HospitalRating {
            provider_id: cell(row, id_idx),
            hospital_name: cell(row, name_idx),
            city: cell(row, city_idx),
            overall_rating: cell(row, rating_idx),
            emergency_services: cell(row, emergency_idx),
            ownership: cell(row, ownership_idx),
        })
        .collect())
}

// The ratings file is ISO-8859-1; every byte maps directly to the Unicode
// code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub fn load_rating_table(path: &Path) -> Result<RatingTable> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed reading {}", path.display()))?;
    let text = decode_latin1(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed reading headers from {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed reading row from {}", path.display()))?;
        rows.push(
            (0..headers.len())
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect(),
        );
    }
    Ok(RatingTable { headers, rows })
}
