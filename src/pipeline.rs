//! Orchestrates one full render: load the five sources, scope them to the
//! region, clean, join, and parse. Runs to completion or fails; nothing is
//! cached between invocations.

use anyhow::{Context, Result};

use crate::datasets::doctors::{DoctorRecord, load_doctors};
use crate::datasets::facilities::{FacilityRecord, load_facility_properties};
use crate::datasets::inpatient::load_inpatient_charges;
use crate::datasets::locations::load_hospital_locations;
use crate::datasets::ratings::{extract_ratings, load_rating_table};
use crate::storage::DatasetPaths;
use crate::transform::{
    JoinedRow, RegionFilter, clean_facilities, dedup_rows, filter_charges_by_state,
    filter_doctors_by_county, filter_locations_by_city, join_charges_with_ratings,
    join_with_locations, normalize_city_names, parse_currency_fields,
};

/// Everything the presentation layer consumes.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub facilities: Vec<FacilityRecord>,
    pub joined: Vec<JoinedRow>,
    pub doctors: Vec<DoctorRecord>,
}

pub fn run(paths: &DatasetPaths, region: &RegionFilter) -> Result<PipelineOutput> {
    tracing::info!("Step 1/6: load source datasets");
    let t0 = std::time::Instant::now();
    let facility_props = load_facility_properties(&paths.facilities_geojson)?;
    let charges = load_inpatient_charges(&paths.inpatient_csv)?;
    let locations = load_hospital_locations(&paths.locations_csv)?;
    let ratings = load_rating_table(&paths.ratings_csv)?;
    let doctors = load_doctors(&paths.doctors_csv)?;
    tracing::info!(
        "Loaded in {:.1}s: facilities={} charges={} locations={} ratings={} doctors={}",
        t0.elapsed().as_secs_f64(),
        facility_props.len(),
        charges.len(),
        locations.len(),
        ratings.rows.len(),
        doctors.len()
    );

    tracing::info!(
        "Step 2/6: region filter (state={} city={} county={})",
        region.provider_state,
        region.city,
        region.county
    );
    let charges = filter_charges_by_state(charges, &region.provider_state);
    let locations = filter_locations_by_city(locations, &region.city);
    let ratings = ratings
        .filter_rows("City", &region.city)
        .context("filter ratings by city")?;
    let doctors = filter_doctors_by_county(doctors, &region.county);
    tracing::info!(
        "In region: charges={} locations={} ratings={} doctors={}",
        charges.len(),
        locations.len(),
        ratings.rows.len(),
        doctors.len()
    );

    tracing::info!("Step 3/6: deduplicate charges and locations");
    let charges = dedup_rows(&charges);
    let locations = dedup_rows(&locations);

    tracing::info!("Step 4/6: clean facilities and ratings");
    let facilities = clean_facilities(facility_props).context("clean facilities")?;
    let ratings = extract_ratings(&ratings.drop_fully_null_columns())
        .context("extract rating fields")?;
    tracing::info!(
        "Cleaned: facilities={} ratings={}",
        facilities.len(),
        ratings.len()
    );

    tracing::info!("Step 5/6: join charges with ratings, then locations");
    let pairs = join_charges_with_ratings(&charges, &ratings);
    let mut joined = join_with_locations(pairs, &locations);
    tracing::info!("Joined rows: {}", joined.len());

    tracing::info!("Step 6/6: normalize city names, parse currency fields");
    normalize_city_names(&mut joined);
    let joined = parse_currency_fields(joined).context("parse currency fields")?;

    Ok(PipelineOutput {
        facilities,
        joined,
        doctors,
    })
}
