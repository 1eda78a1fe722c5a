use std::path::PathBuf;

use hospital_dashboard::charts::build_dashboard;
use hospital_dashboard::pipeline;
use hospital_dashboard::storage::DatasetPaths;
use hospital_dashboard::transform::RegionFilter;

fn write_fixture_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "hospital-dashboard-pipeline-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();

    // Two CA charge rows for the same provider (one an exact duplicate), one
    // out-of-state row, one CA provider without a rating.
    std::fs::write(
        dir.join("inpatientCharges.csv"),
        "DRG Definition,Provider Id,Provider Name,Provider State, Average Covered Charges , Average Total Payments ,Average Medicare Payments\n\
039 - EXTRACRANIAL PROCEDURES,50001,GOOD SAMARITAN HOSPITAL,CA,$32963.07,$5777.24,$4763.73\n\
039 - EXTRACRANIAL PROCEDURES,50001,GOOD SAMARITAN HOSPITAL,CA,$32963.07,$5777.24,$4763.73\n\
039 - EXTRACRANIAL PROCEDURES,10005,MARSHALL MEDICAL CENTER,AL,$15131.85,$5787.57,$4976.71\n\
057 - DEGENERATIVE DISORDERS,50777,UNRATED HOSPITAL,CA,$20000.00,$4000.00,$3000.00\n",
    )
    .unwrap();

    std::fs::write(
        dir.join("us_hospital_locations.csv"),
        "NAME,CITY,STATE,LATITUDE,LONGITUDE,BEDS,TRAUMA\n\
GOOD SAMARITAN HOSPITAL,LOS ANGELES,CA,34.0522,-118.2637,408,LEVEL I\n\
SF GENERAL,SAN FRANCISCO,CA,37.7749,-122.4194,300,LEVEL I\n",
    )
    .unwrap();

    // `Meets criteria` is null in every row and must be dropped before use.
    std::fs::write(
        dir.join("Hospital_rating.csv"),
        "Provider ID,Hospital Name,City,Hospital overall rating,Emergency Services,Hospital Ownership,Meets criteria\n\
50001,GOOD SAMARITAN HOSPITAL,LOS ANGELES,3,Yes,Proprietary,\n\
50002,OTHER CITY HOSPITAL,PASADENA,4,Yes,Voluntary non-profit,\n",
    )
    .unwrap();

    std::fs::write(
        dir.join("doctors.csv"),
        "County,Activities in Medicine,Primary Area of Practice\n\
Los Angeles,Patient Care,Internal Medicine\n\
Los Angeles,Patient Care,Pediatrics\n\
Orange,Research,Cardiology\n",
    )
    .unwrap();

    std::fs::write(
        dir.join("Hospitals_and_Medical_Centers.geojson"),
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-118.2637, 34.0522]},
                    "properties": {
                        "Name": "Good Samaritan Hospital",
                        "cat3": "Hospitals",
                        "org_name": "Good Samaritan Hospital",
                        "addrln1": "1225 Wilshire Blvd",
                        "city": "Los Angeles",
                        "state": "CA",
                        "hours": "24 hours",
                        "zip": "90017",
                        "latitude": 34.0522,
                        "longitude": -118.2637,
                        "email": "info@example.org"
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-118.3, 34.1]},
                    "properties": {
                        "Name": "Incomplete Center",
                        "cat3": "Clinics",
                        "org_name": "Incomplete Center",
                        "addrln1": "1 Main St",
                        "city": "Los Angeles",
                        "state": "CA",
                        "hours": null,
                        "zip": "90001",
                        "latitude": 34.1,
                        "longitude": -118.3
                    }
                }
            ]
        }"#,
    )
    .unwrap();

    dir
}

fn la_region() -> RegionFilter {
    RegionFilter {
        provider_state: "CA".to_string(),
        city: "LOS ANGELES".to_string(),
        county: "Los Angeles".to_string(),
    }
}

#[test]
fn pipeline_produces_the_joined_view_and_cleaned_facilities() {
    let dir = write_fixture_dir();
    let paths = DatasetPaths::new(&dir);

    let output = pipeline::run(&paths, &la_region()).unwrap();

    // The duplicate charge row collapses; the AL row, the unrated CA
    // provider, and the PASADENA rating all drop out of the join.
    assert_eq!(output.joined.len(), 1);
    let row = &output.joined[0];
    assert_eq!(row.provider_id, "50001");
    assert_eq!(row.provider_name, "GOOD SAMARITAN HOSPITAL");
    assert_eq!(row.city, "Los Angeles");
    assert_eq!(row.beds, 408);
    assert_eq!(row.average_covered_charges, 32963.07);

    // Facility cleaning keeps only the feature with every required field.
    assert_eq!(output.facilities.len(), 1);
    assert_eq!(output.facilities[0].name, "Good Samaritan Hospital");

    // Doctors are county-scoped.
    assert_eq!(output.doctors.len(), 2);

    let data = build_dashboard(&output).unwrap();
    assert_eq!(data.map.markers.len(), 1);
    assert_eq!(data.covered_charges_by_provider.len(), 1);
    assert_eq!(
        data.covered_charges_by_provider[0].average_covered_charges,
        32963.07
    );
}

#[test]
fn pipeline_fails_when_a_source_file_is_missing() {
    let dir = write_fixture_dir();
    let mut paths = DatasetPaths::new(&dir);
    paths.doctors_csv = dir.join("no-such-file.csv");
    assert!(pipeline::run(&paths, &la_region()).is_err());
}
