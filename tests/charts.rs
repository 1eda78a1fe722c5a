use hospital_dashboard::charts::{
    BEDS_HISTOGRAM_BINS, MAP_CENTER, MAP_ZOOM, build_dashboard, count_by_first_seen,
    covered_charges_by_provider, histogram, value_counts_desc,
};
use hospital_dashboard::datasets::doctors::DoctorRecord;
use hospital_dashboard::datasets::facilities::FacilityRecord;
use hospital_dashboard::pipeline::PipelineOutput;
use hospital_dashboard::transform::JoinedRow;

fn joined_row(provider_name: &str, beds: i64, covered: f64) -> JoinedRow {
    JoinedRow {
        provider_id: "50001".to_string(),
        provider_name: provider_name.to_string(),
        hospital_name: provider_name.to_string(),
        city: "Los Angeles".to_string(),
        overall_rating: "3".to_string(),
        emergency_services: "Yes".to_string(),
        ownership: "Proprietary".to_string(),
        beds,
        trauma: "LEVEL I".to_string(),
        latitude: 34.05,
        longitude: -118.24,
        average_covered_charges: covered,
        average_total_payments: 5777.24,
        average_medicare_payments: 4763.73,
    }
}

fn doctor(activity: &str, practice: &str) -> DoctorRecord {
    DoctorRecord {
        county: "Los Angeles".to_string(),
        activities_in_medicine: activity.to_string(),
        primary_area_of_practice: practice.to_string(),
    }
}

fn facility(name: &str) -> FacilityRecord {
    FacilityRecord {
        name: name.to_string(),
        category: "Hospitals".to_string(),
        org_name: name.to_string(),
        addrln1: "1225 Wilshire Blvd".to_string(),
        city: "Los Angeles".to_string(),
        state: "CA".to_string(),
        hours: "24 hours".to_string(),
        zip: "90017".to_string(),
        latitude: 34.0522,
        longitude: -118.2637,
    }
}

#[test]
fn histogram_counts_cover_every_value() {
    let values: Vec<f64> = (0..8).map(f64::from).collect();
    let hist = histogram(&values, 4).unwrap();
    assert_eq!(hist.bin_edges.len(), 5);
    assert_eq!(hist.counts.len(), 4);
    assert_eq!(hist.counts.iter().sum::<u64>(), 8);
    // The maximum lands in the last (right-closed) bin.
    assert!(hist.counts[3] >= 1);
    assert_eq!(hist.bin_edges[0], 0.0);
    assert_eq!(hist.bin_edges[4], 7.0);
}

#[test]
fn histogram_over_empty_input_is_an_error() {
    assert!(histogram(&[], BEDS_HISTOGRAM_BINS).is_err());
}

#[test]
fn histogram_of_a_single_value_spans_a_unit_range() {
    let hist = histogram(&[200.0, 200.0], 4).unwrap();
    assert_eq!(hist.bin_edges[0], 199.5);
    assert_eq!(hist.bin_edges[4], 200.5);
    assert_eq!(hist.counts.iter().sum::<u64>(), 2);
}

#[test]
fn category_counts_keep_first_seen_order_and_skip_nulls() {
    let values = ["Yes", "No", "", "Yes", "Yes"];
    let counts = count_by_first_seen(values.into_iter());
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].label, "Yes");
    assert_eq!(counts[0].count, 3);
    assert_eq!(counts[1].label, "No");
    assert_eq!(counts[1].count, 1);
}

#[test]
fn value_counts_sort_descending_with_stable_ties() {
    let values = ["b", "a", "a", "c", "b", "a"];
    let counts = value_counts_desc(values.into_iter());
    assert_eq!(counts[0].label, "a");
    assert_eq!(counts[0].count, 3);
    assert_eq!(counts[1].label, "b");
    assert_eq!(counts[2].label, "c");
}

#[test]
fn covered_charges_group_by_provider_and_sort_descending() {
    let rows = vec![
        joined_row("LOW HOSPITAL", 100, 1000.0),
        joined_row("HIGH HOSPITAL", 200, 9000.0),
        joined_row("HIGH HOSPITAL", 200, 7000.0),
    ];
    let summary = covered_charges_by_provider(&rows);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].provider_name, "HIGH HOSPITAL");
    assert_eq!(summary[0].average_covered_charges, 8000.0);
    assert_eq!(summary[1].provider_name, "LOW HOSPITAL");
}

#[test]
fn dashboard_payload_carries_every_artifact() {
    let output = PipelineOutput {
        facilities: vec![facility("Good Samaritan Hospital")],
        joined: vec![
            joined_row("GOOD SAMARITAN HOSPITAL", 408, 32963.07),
            joined_row("CEDARS SINAI MEDICAL CENTER", 886, 51000.00),
        ],
        doctors: vec![
            doctor("Patient Care", "Internal Medicine"),
            doctor("Patient Care", "Pediatrics"),
            doctor("Research", "Internal Medicine"),
        ],
    };

    let data = build_dashboard(&output).unwrap();
    assert_eq!(data.beds_histogram.counts.len(), BEDS_HISTOGRAM_BINS);
    assert_eq!(data.beds_by_hospital.len(), 2);
    assert_eq!(data.rating_counts[0].count, 2);
    assert_eq!(data.covered_charges_by_provider.len(), 2);
    assert_eq!(data.doctor_activity_counts[0].label, "Patient Care");
    assert_eq!(data.doctor_activity_counts[0].count, 2);
    assert_eq!(data.map.center, MAP_CENTER);
    assert_eq!(data.map.zoom, MAP_ZOOM);
    assert_eq!(data.map.markers.len(), 1);
    assert_eq!(data.map.markers[0].name, "Good Samaritan Hospital");
}

#[test]
fn dashboard_build_fails_on_an_empty_working_table() {
    let output = PipelineOutput {
        facilities: vec![facility("Good Samaritan Hospital")],
        joined: vec![],
        doctors: vec![doctor("Patient Care", "Internal Medicine")],
    };
    assert!(build_dashboard(&output).is_err());
}
