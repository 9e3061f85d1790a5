use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::DayPeriod;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineSchedule {
    pub id: Uuid,
    pub medicine_id: Uuid,
    pub period: DayPeriod,
}

/// A concrete instant at which one dose is due.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineScheduleSlot {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
    pub time: DateTime<Utc>,
}
