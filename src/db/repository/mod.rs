//! Repository layer: entity-scoped database operations.
//!
//! One sub-module per entity group. Every function takes a plain
//! `&Connection`, so the same code runs inside or outside a transaction.

mod appointment;
mod hospital;
mod patient;
mod prescription;
mod reminder;
mod schedule;
mod user;

use uuid::Uuid;

use super::DatabaseError;

pub use appointment::*;
pub use hospital::*;
pub use patient::*;
pub use prescription::*;
pub use reminder::*;
pub use schedule::*;
pub use user::*;

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::*;
    use crate::models::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rusqlite::Connection;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn make_user(conn: &Connection, email: &str, role: UserRole, is_demo: bool) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: "pbkdf2-sha256$4$c2FsdA$aGFzaA".into(),
            role,
            is_demo,
            created_at: t0(),
        };
        insert_user(conn, &user).unwrap();
        user
    }

    fn make_patient(conn: &Connection) -> (User, Patient) {
        let user = make_user(conn, "p@example.com", UserRole::Patient, false);
        let patient = Patient { id: Uuid::new_v4(), user_id: user.id };
        insert_patient(conn, &patient).unwrap();
        (user, patient)
    }

    fn make_doctor(conn: &Connection) -> (User, Doctor) {
        let user = make_user(conn, "d@example.com", UserRole::Doctor, false);
        let hospital = Hospital {
            id: Uuid::new_v4(),
            name: "General".into(),
            address: "Main St".into(),
            latitude: 12.9716,
            longitude: 77.5946,
            is_demo: false,
            created_at: t0(),
        };
        insert_hospital(conn, &hospital).unwrap();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            user_id: user.id,
            hospital_id: hospital.id,
            specialization: "Cardiologist".into(),
            experience_years: 15,
            license_number: "LIC-42".into(),
        };
        insert_doctor(conn, &doctor).unwrap();
        (user, doctor)
    }

    #[test]
    fn user_insert_and_lookup_by_email() {
        let conn = test_db();
        let user = make_user(&conn, "a@example.com", UserRole::Patient, false);

        let found = get_user_by_email(&conn, "a@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, UserRole::Patient);
        assert_eq!(found.created_at, t0());
        assert!(get_user_by_email(&conn, "missing@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_rejected() {
        let conn = test_db();
        make_user(&conn, "a@example.com", UserRole::Patient, false);
        let dup = User {
            id: Uuid::new_v4(),
            email: "a@example.com".into(),
            password_hash: "x".into(),
            role: UserRole::Doctor,
            is_demo: false,
            created_at: t0(),
        };
        assert!(insert_user(&conn, &dup).is_err());
    }

    #[test]
    fn first_demo_user_ignores_real_users() {
        let conn = test_db();
        make_user(&conn, "real@example.com", UserRole::Patient, false);
        assert!(first_demo_user(&conn).unwrap().is_none());

        let demo = make_user(&conn, "demo@example.com", UserRole::Doctor, true);
        assert_eq!(first_demo_user(&conn).unwrap().unwrap().id, demo.id);
    }

    #[test]
    fn profile_round_trip() {
        let conn = test_db();
        let user = make_user(&conn, "a@example.com", UserRole::Patient, false);
        insert_profile(&conn, &Profile {
            id: Uuid::new_v4(),
            user_id: user.id,
            name: "Armin Arlert".into(),
            age: 29,
            gender: Gender::Male,
        })
        .unwrap();

        let profile = get_profile_for_user(&conn, &user.id).unwrap().unwrap();
        assert_eq!(profile.name, "Armin Arlert");
        assert_eq!(profile.gender, Gender::Male);
    }

    #[test]
    fn health_summary_is_one_per_patient() {
        let conn = test_db();
        let (_, patient) = make_patient(&conn);
        let summary = HealthSummary {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            blood_group: BloodGroup::AbNeg,
            height_cm: 170.0,
            weight_kg: 60.0,
            notes: None,
        };
        insert_health_summary(&conn, &summary).unwrap();

        let second = HealthSummary { id: Uuid::new_v4(), ..summary.clone() };
        assert!(insert_health_summary(&conn, &second).is_err());

        let stored = get_health_summary(&conn, &patient.id).unwrap().unwrap();
        assert_eq!(stored.id, summary.id);
        assert_eq!(stored.blood_group, summary.blood_group);
    }

    #[test]
    fn health_record_keeps_author() {
        let conn = test_db();
        let (_, patient) = make_patient(&conn);
        let (doctor_user, _) = make_doctor(&conn);

        insert_health_record(&conn, &HealthRecord {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            created_by_user_id: doctor_user.id,
            record_type: HealthRecordType::Lab,
            title: "Initial Consultation".into(),
            description: Some("Routine".into()),
            created_at: t0(),
        })
        .unwrap();

        let records = list_health_records(&conn, &patient.id).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].created_by_user_id, doctor_user.id);
        assert_eq!(records[0].record_type, HealthRecordType::Lab);
    }

    #[test]
    fn reminder_target_survives_storage() {
        let conn = test_db();
        let (user, patient) = make_patient(&conn);
        let (_, doctor) = make_doctor(&conn);

        let prescription = Prescription {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            doctor_id: doctor.id,
            notes: None,
            created_at: t0(),
        };
        insert_prescription(&conn, &prescription).unwrap();
        let medicine = Medicine {
            id: Uuid::new_v4(),
            prescription_id: prescription.id,
            name: "Medicine A1".into(),
            dosage: "1 pill".into(),
            is_active: true,
            created_at: t0(),
        };
        insert_medicine(&conn, &medicine).unwrap();
        let schedule = MedicineSchedule {
            id: Uuid::new_v4(),
            medicine_id: medicine.id,
            period: DayPeriod::Night,
        };
        insert_medicine_schedule(&conn, &schedule).unwrap();
        let slot = MedicineScheduleSlot {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            schedule_id: schedule.id,
            time: t0() + Duration::hours(8),
        };
        insert_schedule_slot(&conn, &slot).unwrap();

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            doctor_id: doctor.id,
            date_time: t0() + Duration::days(1),
            status: AppointmentStatus::Scheduled,
        };
        insert_appointment(&conn, &appointment).unwrap();

        for target in [
            ReminderTarget::ScheduleSlot(slot.id),
            ReminderTarget::Appointment(appointment.id),
        ] {
            insert_reminder(&conn, &Reminder {
                id: Uuid::new_v4(),
                user_id: user.id,
                target,
                message: "m".into(),
                remind_at: slot.time,
                created_at: t0(),
            })
            .unwrap();
        }

        let reminders = list_reminders_for_user(&conn, &user.id).unwrap();
        assert_eq!(reminders.len(), 2);
        let kinds: Vec<_> = reminders.iter().map(|r| r.kind()).collect();
        assert!(kinds.contains(&ReminderType::Medicine));
        assert!(kinds.contains(&ReminderType::Appointment));

        let stored_slot = get_schedule_slot(&conn, &slot.id).unwrap().unwrap();
        assert_eq!(stored_slot.time, slot.time);
        assert_eq!(list_medicines(&conn, &prescription.id).unwrap().len(), 1);
        assert_eq!(
            list_schedules_for_medicine(&conn, &medicine.id).unwrap()[0].period,
            DayPeriod::Night
        );
        assert_eq!(get_appointment(&conn, &appointment.id).unwrap().unwrap().date_time, appointment.date_time);
    }

    #[test]
    fn corrupted_reminder_reference_is_reported() {
        let conn = test_db();
        let (user, _) = make_patient(&conn);
        // Bypass the CHECK constraint to simulate a row written by another tool
        conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
        conn.execute(
            "INSERT INTO reminders (id, user_id, reminder_type, message, remind_at, created_at)
             VALUES (?1, ?2, 'medicine', 'm', ?3, ?3)",
            rusqlite::params![Uuid::new_v4().to_string(), user.id.to_string(), t0()],
        )
        .unwrap();

        let result = list_reminders(&conn);
        assert!(matches!(result, Err(DatabaseError::ConstraintViolation(_))));
    }

    #[test]
    fn doctors_listed_by_license() {
        let conn = test_db();
        let (_, doctor) = make_doctor(&conn);
        let doctors = list_doctors(&conn).unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].license_number, doctor.license_number);
        assert_eq!(list_hospitals(&conn).unwrap().len(), 1);
    }
}
