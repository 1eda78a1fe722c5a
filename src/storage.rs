use std::path::{Path, PathBuf};

/// Fixed file names of the five source datasets under the data directory.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub facilities_geojson: PathBuf,
    pub inpatient_csv: PathBuf,
    pub locations_csv: PathBuf,
    pub ratings_csv: PathBuf,
    pub doctors_csv: PathBuf,
}

impl DatasetPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir: PathBuf = data_dir.into();
        Self {
            facilities_geojson: data_dir.join("Hospitals_and_Medical_Centers.geojson"),
            inpatient_csv: data_dir.join("inpatientCharges.csv"),
            locations_csv: data_dir.join("us_hospital_locations.csv"),
            ratings_csv: data_dir.join("Hospital_rating.csv"),
            doctors_csv: data_dir.join("doctors.csv"),
        }
    }

    pub fn all(&self) -> [&Path; 5] {
        [
            &self.facilities_geojson,
            &self.inpatient_csv,
            &self.locations_csv,
            &self.ratings_csv,
            &self.doctors_csv,
        ]
    }
}

pub fn file_present_nonempty(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(m) => m.is_file() && m.len() > 0,
        Err(_) => false,
    }
}
