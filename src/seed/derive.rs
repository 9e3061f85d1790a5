//! Derived records: medicine schedule → slot → reminder, and
//! appointment → reminder.
//!
//! Everything here is a pure function of its inputs and the generation
//! instant, so the same inputs always derive the same timestamps.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SeedError;
use crate::db::Record;
use crate::models::enums::{AppointmentStatus, DayPeriod};
use crate::models::*;

/// Offset of a demo dose slot from the generation instant.
pub const DEMO_SLOT_OFFSET_HOURS: i64 = 8;

/// How far ahead of an appointment its reminder fires.
pub const APPOINTMENT_REMINDER_LEAD_HOURS: i64 = 1;

pub const APPOINTMENT_REMINDER_MESSAGE: &str = "Upcoming appointment reminder";

/// How a dose slot's instant is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Generation instant plus a flat offset, regardless of period.
    #[default]
    FixedOffset,
    /// Next due hour of the period strictly after the generation instant (UTC).
    NextOccurrence,
}

impl SlotPolicy {
    pub fn slot_time(&self, period: DayPeriod, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::FixedOffset => now + Duration::hours(DEMO_SLOT_OFFSET_HOURS),
            Self::NextOccurrence => next_occurrence(period, now),
        }
    }
}

/// First instant at `period`'s due hour strictly after `after`.
pub fn next_occurrence(period: DayPeriod, after: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = after.date_naive().and_time(NaiveTime::MIN).and_utc();
    let candidate = midnight + Duration::hours(i64::from(period.due_hour()));
    if candidate > after {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// Schedule, slot and reminder derived from one medicine.
#[derive(Debug, Clone)]
pub struct MedicineChain {
    pub schedule: MedicineSchedule,
    pub slot: MedicineScheduleSlot,
    pub reminder: Reminder,
}

impl MedicineChain {
    /// Records in write order (each depends on the previous one).
    pub fn into_records(self) -> [Record; 3] {
        [
            Record::MedicineSchedule(self.schedule),
            Record::ScheduleSlot(self.slot),
            Record::Reminder(self.reminder),
        ]
    }
}

/// Derive the schedule chain for `medicine`.
///
/// The period keys on the patient's sequence number, so every medicine of
/// one patient shares a period. The reminder fires exactly at the slot.
pub fn derive_medicine_chain(
    medicine: &Medicine,
    patient: &Patient,
    patient_index: usize,
    policy: SlotPolicy,
    now: DateTime<Utc>,
) -> Result<MedicineChain, SeedError> {
    let period = DayPeriod::for_index(patient_index);
    let schedule = MedicineSchedule {
        id: Uuid::new_v4(),
        medicine_id: medicine.id,
        period,
    };

    let time = policy.slot_time(period, now);
    if time < medicine.created_at {
        return Err(SeedError::Invariant(format!(
            "slot for {} at {time} predates medicine creation at {}",
            medicine.name, medicine.created_at
        )));
    }
    let slot = MedicineScheduleSlot {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        schedule_id: schedule.id,
        time,
    };

    let reminder = Reminder {
        id: Uuid::new_v4(),
        user_id: patient.user_id,
        target: ReminderTarget::ScheduleSlot(slot.id),
        message: format!("Time to take {}", medicine.name),
        remind_at: slot.time,
        created_at: now,
    };

    Ok(MedicineChain { schedule, slot, reminder })
}

/// Appointment instant for the patient with sequence number `index`:
/// whole days after the generation instant, starting at one.
pub fn appointment_time(now: DateTime<Utc>, index: usize) -> DateTime<Utc> {
    now + Duration::days(index as i64 + 1)
}

pub fn scheduled_appointment(
    patient: &Patient,
    doctor: &Doctor,
    index: usize,
    now: DateTime<Utc>,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        doctor_id: doctor.id,
        date_time: appointment_time(now, index),
        status: AppointmentStatus::Scheduled,
    }
}

/// Reminder one lead time before `appointment`.
///
/// Not clamped: an appointment closer than the lead time still gets a
/// reminder in the past.
pub fn derive_appointment_reminder(
    appointment: &Appointment,
    patient_user_id: Uuid,
    now: DateTime<Utc>,
) -> Reminder {
    let remind_at = appointment.date_time - Duration::hours(APPOINTMENT_REMINDER_LEAD_HOURS);
    if remind_at < now {
        tracing::debug!(
            appointment_id = %appointment.id,
            %remind_at,
            "Appointment reminder falls before generation time"
        );
    }

    Reminder {
        id: Uuid::new_v4(),
        user_id: patient_user_id,
        target: ReminderTarget::Appointment(appointment.id),
        message: APPOINTMENT_REMINDER_MESSAGE.into(),
        remind_at,
        created_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::ReminderType;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 14, 0, 0).unwrap()
    }

    fn patient() -> Patient {
        Patient { id: Uuid::new_v4(), user_id: Uuid::new_v4() }
    }

    fn medicine(name: &str, created_at: DateTime<Utc>) -> Medicine {
        Medicine {
            id: Uuid::new_v4(),
            prescription_id: Uuid::new_v4(),
            name: name.into(),
            dosage: "1 pill".into(),
            is_active: true,
            created_at,
        }
    }

    #[test]
    fn fixed_offset_slot_is_eight_hours_out() {
        let chain = derive_medicine_chain(
            &medicine("Medicine A1", now()),
            &patient(),
            0,
            SlotPolicy::FixedOffset,
            now(),
        )
        .unwrap();
        assert_eq!(chain.slot.time, now() + Duration::hours(8));
    }

    #[test]
    fn medicine_reminder_matches_slot_exactly() {
        let p = patient();
        let med = medicine("Medicine B3", now());
        let chain = derive_medicine_chain(&med, &p, 2, SlotPolicy::FixedOffset, now()).unwrap();

        assert_eq!(chain.reminder.remind_at, chain.slot.time);
        assert_eq!(chain.reminder.kind(), ReminderType::Medicine);
        assert_eq!(chain.reminder.target, ReminderTarget::ScheduleSlot(chain.slot.id));
        assert_eq!(chain.reminder.user_id, p.user_id);
        assert_eq!(chain.reminder.message, "Time to take Medicine B3");
        assert_eq!(chain.slot.schedule_id, chain.schedule.id);
        assert_eq!(chain.schedule.medicine_id, med.id);
    }

    #[test]
    fn period_keys_on_patient_index() {
        let p = patient();
        let a = derive_medicine_chain(&medicine("A", now()), &p, 4, SlotPolicy::FixedOffset, now())
            .unwrap();
        let b = derive_medicine_chain(&medicine("B", now()), &p, 4, SlotPolicy::FixedOffset, now())
            .unwrap();
        assert_eq!(a.schedule.period, DayPeriod::Evening);
        assert_eq!(a.schedule.period, b.schedule.period);
    }

    #[test]
    fn slot_cannot_predate_medicine() {
        let later = now() + Duration::days(1);
        let result = derive_medicine_chain(
            &medicine("Medicine A1", later),
            &patient(),
            0,
            SlotPolicy::FixedOffset,
            now(),
        );
        assert!(matches!(result, Err(SeedError::Invariant(_))));
    }

    #[test]
    fn next_occurrence_same_day_or_next() {
        // 14:00 → evening at 18:00 today, morning at 08:00 tomorrow
        assert_eq!(
            next_occurrence(DayPeriod::Evening, now()),
            Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
        );
        assert_eq!(
            next_occurrence(DayPeriod::Morning, now()),
            Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap()
        );
        // Exactly at the due hour rolls to the next day
        let at_night = Utc.with_ymd_and_hms(2026, 10, 16, 21, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(DayPeriod::Night, at_night),
            Utc.with_ymd_and_hms(2026, 10, 17, 21, 0, 0).unwrap()
        );
    }

    #[test]
    fn next_occurrence_policy_uses_period() {
        let chain = derive_medicine_chain(
            &medicine("Medicine A3", now()),
            &patient(),
            2,
            SlotPolicy::NextOccurrence,
            now(),
        )
        .unwrap();
        assert_eq!(chain.schedule.period, DayPeriod::Night);
        assert_eq!(chain.slot.time, Utc.with_ymd_and_hms(2026, 10, 16, 21, 0, 0).unwrap());
        assert_eq!(chain.reminder.remind_at, chain.slot.time);
    }

    #[test]
    fn appointment_reminder_one_hour_before() {
        let p = patient();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            hospital_id: Uuid::new_v4(),
            specialization: "Orthopedic".into(),
            experience_years: 10,
            license_number: "DEMO-LIC-4".into(),
        };
        let appointment = scheduled_appointment(&p, &doctor, 2, now());
        assert_eq!(appointment.date_time, now() + Duration::days(3));
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);

        let reminder = derive_appointment_reminder(&appointment, p.user_id, now());
        assert_eq!(reminder.remind_at, appointment.date_time - Duration::hours(1));
        assert_eq!(reminder.kind(), ReminderType::Appointment);
        assert_eq!(reminder.target.schedule_slot_id(), None);
        assert_eq!(reminder.message, APPOINTMENT_REMINDER_MESSAGE);
    }

    #[test]
    fn past_appointment_reminder_not_clamped() {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            date_time: now() + Duration::minutes(30),
            status: AppointmentStatus::Scheduled,
        };
        let reminder = derive_appointment_reminder(&appointment, Uuid::new_v4(), now());
        assert_eq!(reminder.remind_at, now() - Duration::minutes(30));
    }

    #[test]
    fn chain_records_in_dependency_order() {
        let chain = derive_medicine_chain(
            &medicine("Medicine A1", now()),
            &patient(),
            0,
            SlotPolicy::FixedOffset,
            now(),
        )
        .unwrap();
        let kinds: Vec<_> = chain.into_records().iter().map(Record::kind).collect();
        assert_eq!(kinds, vec!["medicine_schedule", "schedule_slot", "reminder"]);
    }
}
