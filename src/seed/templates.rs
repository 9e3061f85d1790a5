//! Input templates for population.
//!
//! A `SeedPlan` is plain data: it can be built in code, loaded from JSON,
//! or taken from `SeedPlan::demo()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SeedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalTemplate {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorTemplate {
    pub name: String,
    pub specialization: String,
    pub experience_years: u32,
    /// Index into `SeedPlan::hospitals`.
    pub hospital_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPlan {
    pub hospitals: Vec<HospitalTemplate>,
    pub doctors: Vec<DoctorTemplate>,
    pub patient_names: Vec<String>,
}

impl SeedPlan {
    /// The fixed demo data set: two hospitals, four doctors, ten patient names.
    pub fn demo() -> Self {
        let hospital = |name: &str, address: &str, latitude, longitude| HospitalTemplate {
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
        };
        let doctor = |name: &str, specialization: &str, experience_years, hospital_index| {
            DoctorTemplate {
                name: name.into(),
                specialization: specialization.into(),
                experience_years,
                hospital_index,
            }
        };

        Self {
            hospitals: vec![
                hospital("Demo Hospital 1 - Bengaluru", "MG Road, Bengaluru", 12.9716, 77.5946),
                hospital("Demo Hospital 2 - Pune", "Koregaon Park, Pune", 18.5204, 73.8567),
            ],
            doctors: vec![
                doctor("Dr. Eva Heinemann", "General Physician", 12, 0),
                doctor("Dr. Johan Liebert", "Cardiologist", 15, 0),
                doctor("Dr. Nina Fortner", "Dermatologist", 8, 1),
                doctor("Dr. Kenzo Tenma", "Orthopedic", 10, 1),
            ],
            patient_names: [
                "Eren Yeager",
                "Mikasa Ackerman",
                "Armin Arlert",
                "Annie Leonhart",
                "Erwin Smith",
                "Historia Reiss",
                "Levi Ackerman",
                "Sasha Braus",
                "Jean Kirstein",
                "Hange Zoë",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Reject plans that cannot be populated, before any write happens.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.doctors.is_empty() {
            return Err(SeedError::InvalidTemplate(
                "at least one doctor template is required".into(),
            ));
        }
        if self.patient_names.is_empty() {
            return Err(SeedError::InvalidTemplate(
                "at least one patient name is required".into(),
            ));
        }
        for (i, doctor) in self.doctors.iter().enumerate() {
            if doctor.hospital_index >= self.hospitals.len() {
                return Err(SeedError::InvalidTemplate(format!(
                    "doctor template {i} ({}) references hospital {} but only {} hospitals exist",
                    doctor.name,
                    doctor.hospital_index,
                    self.hospitals.len()
                )));
            }
        }
        Ok(())
    }

    /// Name for the patient at `index`, cycling when the list is shorter
    /// than the patient count.
    pub fn patient_name(&self, index: usize) -> &str {
        &self.patient_names[index % self.patient_names.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_plan_is_valid() {
        let plan = SeedPlan::demo();
        assert!(plan.validate().is_ok());
        assert_eq!(plan.hospitals.len(), 2);
        assert_eq!(plan.doctors.len(), 4);
        assert_eq!(plan.patient_names.len(), 10);
    }

    #[test]
    fn out_of_range_hospital_index_rejected() {
        let mut plan = SeedPlan::demo();
        plan.doctors[3].hospital_index = 2;
        let err = plan.validate().unwrap_err();
        assert!(matches!(err, SeedError::InvalidTemplate(_)));
        assert!(err.to_string().contains("Dr. Kenzo Tenma"));
    }

    #[test]
    fn empty_doctor_list_rejected() {
        let mut plan = SeedPlan::demo();
        plan.doctors.clear();
        assert!(matches!(plan.validate(), Err(SeedError::InvalidTemplate(_))));
    }

    #[test]
    fn patient_names_cycle() {
        let plan = SeedPlan::demo();
        assert_eq!(plan.patient_name(0), "Eren Yeager");
        assert_eq!(plan.patient_name(10), "Eren Yeager");
        assert_eq!(plan.patient_name(12), "Armin Arlert");
    }

    #[test]
    fn plan_loads_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let plan = SeedPlan::demo();
        std::fs::write(&path, serde_json::to_string_pretty(&plan).unwrap()).unwrap();

        let loaded = SeedPlan::from_json_file(&path).unwrap();
        assert_eq!(loaded, plan);
    }

    #[test]
    fn malformed_plan_reports_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, r#"{"hospitals": []}"#).unwrap();

        assert!(matches!(
            SeedPlan::from_json_file(&path),
            Err(SeedError::PlanFormat(_))
        ));
    }
}
