use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{BloodGroup, HealthRecordType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    /// Backing user, role must be `UserRole::Patient`.
    pub user_id: Uuid,
}

/// At most one per patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSummary {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub blood_group: BloodGroup,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub notes: Option<String>,
}

/// Authorship is attributed to the creating user, not just a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub created_by_user_id: Uuid,
    pub record_type: HealthRecordType,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
