//! Pure filter/join/clean layer. No I/O, no rendering dependency; every
//! function here operates on in-memory rows and is unit-testable.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use crate::datasets::facilities::{FacilityRecord, PRUNED_PROPERTIES, REQUIRED_PROPERTIES};
use crate::datasets::inpatient::InpatientCharge;
use crate::datasets::locations::HospitalLocation;
use crate::datasets::ratings::HospitalRating;
use crate::datasets::doctors::DoctorRecord;

/// Region scope applied before joining. Matching is exact and
/// case-sensitive; rows whose fields differ in case or spelling are
/// silently excluded.
#[derive(Debug, Clone)]
pub struct RegionFilter {
    pub provider_state: String,
    pub city: String,
    pub county: String,
}

/// One row of the working table after both joins, city rename included.
/// Currency fields are still the raw prefixed strings.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub provider_id: String,
    pub provider_name: String,
    pub hospital_name: String,
    pub city: String,
    pub overall_rating: String,
    pub emergency_services: String,
    pub ownership: String,
    pub beds: i64,
    pub trauma: String,
    pub latitude: f64,
    pub longitude: f64,
    pub average_covered_charges: String,
    pub average_total_payments: String,
    pub average_medicare_payments: String,
}

/// The finished working table: same shape as [`JoinedRecord`] with the three
/// monetary fields parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub provider_id: String,
    pub provider_name: String,
    pub hospital_name: String,
    pub city: String,
    pub overall_rating: String,
    pub emergency_services: String,
    pub ownership: String,
    pub beds: i64,
    pub trauma: String,
    pub latitude: f64,
    pub longitude: f64,
    pub average_covered_charges: f64,
    pub average_total_payments: f64,
    pub average_medicare_payments: f64,
}

pub fn filter_charges_by_state(rows: Vec<InpatientCharge>, state: &str) -> Vec<InpatientCharge> {
    rows.into_iter()
        .filter(|row| row.provider_state == state)
        .collect()
}

pub fn filter_locations_by_city(rows: Vec<HospitalLocation>, city: &str) -> Vec<HospitalLocation> {
    rows.into_iter().filter(|row| row.city == city).collect()
}

pub fn filter_doctors_by_county(rows: Vec<DoctorRecord>, county: &str) -> Vec<DoctorRecord> {
    rows.into_iter()
        .filter(|row| row.county == county)
        .collect()
}

/// Removes exact-duplicate rows, keeping the first occurrence. Quadratic
/// scan; the inputs are small once the region filter has run.
pub fn dedup_rows<T: PartialEq + Clone>(rows: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(rows.len());
    for row in rows {
        if !out.contains(row) {
            out.push(row.clone());
        }
    }
    out
}

/// Cleans raw facility properties: prunes the fixed unused-column set,
/// drops features missing any required field, extracts the typed record.
pub fn clean_facilities(features: Vec<Map<String, Value>>) -> Result<Vec<FacilityRecord>> {
    let mut out = Vec::new();
    for mut props in features {
        prune_facility_properties(&mut props);
        if !has_required_properties(&props) {
            continue;
        }
        out.push(facility_from_properties(&props)?);
    }
    Ok(out)
}

pub fn prune_facility_properties(props: &mut Map<String, Value>) {
    for key in PRUNED_PROPERTIES {
        props.remove(key);
    }
}

pub fn has_required_properties(props: &Map<String, Value>) -> bool {
    REQUIRED_PROPERTIES
        .iter()
        .all(|key| props.get(*key).is_some_and(|v| !v.is_null()))
}

fn facility_from_properties(props: &Map<String, Value>) -> Result<FacilityRecord> {
    Ok(FacilityRecord {
        name: prop_string(props, "Name"),
        category: prop_string(props, "cat3"),
        org_name: prop_string(props, "org_name"),
        addrln1: prop_string(props, "addrln1"),
        city: prop_string(props, "city"),
        state: prop_string(props, "state"),
        hours: prop_string(props, "hours"),
        zip: prop_string(props, "zip"),
        latitude: prop_f64(props, "latitude")
            .with_context(|| format!("facility '{}'", prop_string(props, "org_name")))?,
        longitude: prop_f64(props, "longitude")
            .with_context(|| format!("facility '{}'", prop_string(props, "org_name")))?,
    })
}

fn prop_string(props: &Map<String, Value>, key: &str) -> String {
    match props.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn prop_f64(props: &Map<String, Value>, key: &str) -> Result<f64> {
    match props.get(key) {
        Some(Value::Number(n)) => n
            .as_f64()
            .with_context(|| format!("property '{key}' is not a finite number")),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .with_context(|| format!("Failed parsing property '{key}' value '{s}'")),
        _ => Err(anyhow!("property '{key}' missing or null")),
    }
}

/// Join 1: charges x ratings, inner, on provider identifier (`Provider Id`
/// vs `Provider ID` in the sources). Pairs multiply when an identifier
/// repeats on either side.
pub fn join_charges_with_ratings(
    charges: &[InpatientCharge],
    ratings: &[HospitalRating],
) -> Vec<(InpatientCharge, HospitalRating)> {
    let mut by_id: HashMap<&str, Vec<&HospitalRating>> = HashMap::new();
    for rating in ratings {
        by_id
            .entry(rating.provider_id.as_str())
            .or_default()
            .push(rating);
    }

    let mut out = Vec::new();
    for charge in charges {
        if let Some(matches) = by_id.get(charge.provider_id.as_str()) {
            for rating in matches {
                out.push((charge.clone(), (*rating).clone()));
            }
        }
    }
    out
}

/// Join 2: (join 1) x locations, inner, on charge provider name vs location
/// `NAME`. Exact string equality; name variants across sources do not match.
/// The rating's `City` lands in the lowercase `city` field here (the column
/// rename step).
pub fn join_with_locations(
    pairs: Vec<(InpatientCharge, HospitalRating)>,
    locations: &[HospitalLocation],
) -> Vec<JoinedRecord> {
    let mut by_name: HashMap<&str, Vec<&HospitalLocation>> = HashMap::new();
    for location in locations {
        by_name
            .entry(location.name.as_str())
            .or_default()
            .push(location);
    }

    let mut out = Vec::new();
    for (charge, rating) in pairs {
        if let Some(matches) = by_name.get(charge.provider_name.as_str()) {
            for location in matches {
                out.push(JoinedRecord {
                    provider_id: charge.provider_id.clone(),
                    provider_name: charge.provider_name.clone(),
                    hospital_name: rating.hospital_name.clone(),
                    city: rating.city.clone(),
                    overall_rating: rating.overall_rating.clone(),
                    emergency_services: rating.emergency_services.clone(),
                    ownership: rating.ownership.clone(),
                    beds: location.beds,
                    trauma: location.trauma.clone(),
                    latitude: location.latitude,
                    longitude: location.longitude,
                    average_covered_charges: charge.average_covered_charges.clone(),
                    average_total_payments: charge.average_total_payments.clone(),
                    average_medicare_payments: charge.average_medicare_payments.clone(),
                });
            }
        }
    }
    out
}

/// Rewrites each joined city word-by-word: first letter upper, rest lower,
/// words rejoined with a single space. Idempotent.
pub fn normalize_city_names(rows: &mut [JoinedRecord]) {
    for row in rows {
        row.city = title_case_words(&row.city);
    }
}

pub fn title_case_words(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Strips exactly one leading character (the currency symbol in the source
/// convention) and parses the remainder. An unprefixed value therefore loses
/// its first digit; that stripping behavior is intentional.
pub fn parse_currency(raw: &str) -> Result<f64> {
    let mut chars = raw.chars();
    if chars.next().is_none() {
        return Err(anyhow!("empty currency value"));
    }
    chars
        .as_str()
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Failed parsing currency value '{raw}'"))
}

pub fn parse_currency_fields(rows: Vec<JoinedRecord>) -> Result<Vec<JoinedRow>> {
    rows.into_iter()
        .map(|row| {
            Ok(JoinedRow {
                average_covered_charges: parse_currency(&row.average_covered_charges)
                    .context("Average Covered Charges")?,
                average_total_payments: parse_currency(&row.average_total_payments)
                    .context("Average Total Payments")?,
                average_medicare_payments: parse_currency(&row.average_medicare_payments)
                    .context("Average Medicare Payments")?,
                provider_id: row.provider_id,
                provider_name: row.provider_name,
                hospital_name: row.hospital_name,
                city: row.city,
                overall_rating: row.overall_rating,
                emergency_services: row.emergency_services,
                ownership: row.ownership,
                beds: row.beds,
                trauma: row.trauma,
                latitude: row.latitude,
                longitude: row.longitude,
            })
        })
        .collect()
}
