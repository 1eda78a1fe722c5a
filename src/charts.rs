//! Builds the chart payloads from the pipeline output: nine artifacts plus
//! the facility map, in the fixed render order. The actual drawing happens
//! client-side; this layer only shapes the data.

use std::cmp::Ordering;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::datasets::facilities::FacilityRecord;
use crate::pipeline::PipelineOutput;
use crate::transform::JoinedRow;

pub const BEDS_HISTOGRAM_BINS: usize = 20;
pub const MAP_CENTER: [f64; 2] = [20.0, 0.0];
pub const MAP_ZOOM: u8 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// `counts.len() + 1` edges, equal width over [min, max].
    pub bin_edges: Vec<f64>,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BedsPoint {
    pub beds: i64,
    pub hospital_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChargeSummaryRow {
    pub provider_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub average_covered_charges: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

/// The full dashboard payload, fields in render order.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub beds_histogram: Histogram,
    pub beds_by_hospital: Vec<BedsPoint>,
    pub rating_counts: Vec<CategoryCount>,
    pub emergency_counts: Vec<CategoryCount>,
    pub trauma_counts: Vec<CategoryCount>,
    pub ownership_counts: Vec<CategoryCount>,
    pub covered_charges_by_provider: Vec<ChargeSummaryRow>,
    pub doctor_activity_counts: Vec<CategoryCount>,
    pub doctor_practice_counts: Vec<CategoryCount>,
    pub map: MapView,
}

pub fn build_dashboard(output: &PipelineOutput) -> Result<DashboardData> {
    let beds: Vec<f64> = output.joined.iter().map(|row| row.beds as f64).collect();

    Ok(DashboardData {
        beds_histogram: histogram(&beds, BEDS_HISTOGRAM_BINS)?,
        beds_by_hospital: output
            .joined
            .iter()
            .map(|row| BedsPoint {
                beds: row.beds,
                hospital_name: row.hospital_name.clone(),
            })
            .collect(),
        rating_counts: count_by_first_seen(
            output.joined.iter().map(|row| row.overall_rating.as_str()),
        ),
        emergency_counts: count_by_first_seen(
            output
                .joined
                .iter()
                .map(|row| row.emergency_services.as_str()),
        ),
        trauma_counts: count_by_first_seen(output.joined.iter().map(|row| row.trauma.as_str())),
        ownership_counts: count_by_first_seen(
            output.joined.iter().map(|row| row.ownership.as_str()),
        ),
        covered_charges_by_provider: covered_charges_by_provider(&output.joined),
        doctor_activity_counts: value_counts_desc(
            output
                .doctors
                .iter()
                .map(|d| d.activities_in_medicine.as_str()),
        ),
        doctor_practice_counts: value_counts_desc(
            output
                .doctors
                .iter()
                .map(|d| d.primary_area_of_practice.as_str()),
        ),
        map: MapView {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            markers: facility_markers(&output.facilities),
        },
    })
}

/// Equal-width histogram over [min, max]; the last bin is closed on the
/// right. Empty input is an error, as a plotting call over no data would be.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    if values.is_empty() {
        return Err(anyhow!("histogram over empty input"));
    }
    if bins == 0 {
        return Err(anyhow!("histogram needs at least one bin"));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            return Err(anyhow!("histogram over non-finite value {v}"));
        }
        min = min.min(v);
        max = max.max(v);
    }
    // A single distinct value gets a unit-wide range around it.
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let bin_edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0u64; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Ok(Histogram { bin_edges, counts })
}

/// Counts categories in first-seen order. Empty labels are the null marker
/// and are skipped.
pub fn count_by_first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut out: Vec<CategoryCount> = Vec::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        match out.iter_mut().find(|c| c.label == value) {
            Some(existing) => existing.count += 1,
            None => out.push(CategoryCount {
                label: value.to_string(),
                count: 1,
            }),
        }
    }
    out
}

/// Category counts sorted by descending frequency; ties keep first-seen
/// order.
pub fn value_counts_desc<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut out = count_by_first_seen(values);
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Mean covered charge per (provider name, latitude, longitude), sorted
/// descending by charge. Grouping uses exact coordinate equality.
pub fn covered_charges_by_provider(rows: &[JoinedRow]) -> Vec<ChargeSummaryRow> {
    let mut groups: Vec<(String, f64, f64, Vec<f64>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| {
            g.0 == row.provider_name && g.1 == row.latitude && g.2 == row.longitude
        }) {
            Some(group) => group.3.push(row.average_covered_charges),
            None => groups.push((
                row.provider_name.clone(),
                row.latitude,
                row.longitude,
                vec![row.average_covered_charges],
            )),
        }
    }

    let mut out: Vec<ChargeSummaryRow> = groups
        .into_iter()
        .map(|(provider_name, latitude, longitude, charges)| ChargeSummaryRow {
            provider_name,
            latitude,
            longitude,
            average_covered_charges: charges.iter().sum::<f64>() / charges.len() as f64,
        })
        .collect();
    out.sort_by(|a, b| {
        b.average_covered_charges
            .partial_cmp(&a.average_covered_charges)
            .unwrap_or(Ordering::Equal)
    });
    out
}

fn facility_markers(facilities: &[FacilityRecord]) -> Vec<MapMarker> {
    facilities
        .iter()
        .map(|f| MapMarker {
            latitude: f.latitude,
            longitude: f.longitude,
            name: f.name.clone(),
        })
        .collect()
}
