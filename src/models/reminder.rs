use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ReminderType;

/// What a reminder points at. The variant fixes the reminder type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ReminderTarget {
    ScheduleSlot(Uuid),
    Appointment(Uuid),
}

impl ReminderTarget {
    pub fn kind(&self) -> ReminderType {
        match self {
            Self::ScheduleSlot(_) => ReminderType::Medicine,
            Self::Appointment(_) => ReminderType::Appointment,
        }
    }

    pub fn schedule_slot_id(&self) -> Option<Uuid> {
        match self {
            Self::ScheduleSlot(id) => Some(*id),
            Self::Appointment(_) => None,
        }
    }

    pub fn appointment_id(&self) -> Option<Uuid> {
        match self {
            Self::Appointment(id) => Some(*id),
            Self::ScheduleSlot(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: ReminderTarget,
    pub message: String,
    pub remind_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn kind(&self) -> ReminderType {
        self.target.kind()
    }
}
