//! Storage handle injected into the seed generator.
//!
//! `Store` is the only seam between population logic and persistence.
//! `SqliteStore` is the production implementation; tests wrap it to count
//! or intercept writes.

use std::path::Path;

use rusqlite::Connection;

use super::repository::*;
use super::sqlite::{open_database, open_memory_database};
use super::DatabaseError;
use crate::models::*;

/// One insertable row of any entity type.
///
/// Nested variants (`User`, `Prescription`) are written as one unit.
#[derive(Debug, Clone)]
pub enum Record {
    Hospital(Hospital),
    User { user: User, profile: Profile },
    Doctor(Doctor),
    Patient(Patient),
    HealthSummary(HealthSummary),
    HealthRecord(HealthRecord),
    Prescription { prescription: Prescription, medicines: Vec<Medicine> },
    MedicineSchedule(MedicineSchedule),
    ScheduleSlot(MedicineScheduleSlot),
    Reminder(Reminder),
    Appointment(Appointment),
}

impl Record {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hospital(_) => "hospital",
            Self::User { .. } => "user",
            Self::Doctor(_) => "doctor",
            Self::Patient(_) => "patient",
            Self::HealthSummary(_) => "health_summary",
            Self::HealthRecord(_) => "health_record",
            Self::Prescription { .. } => "prescription",
            Self::MedicineSchedule(_) => "medicine_schedule",
            Self::ScheduleSlot(_) => "schedule_slot",
            Self::Reminder(_) => "reminder",
            Self::Appointment(_) => "appointment",
        }
    }
}

/// Write `record` through `conn`. Nested rows are written in parent-first order.
fn write_record(conn: &Connection, record: &Record) -> Result<(), DatabaseError> {
    match record {
        Record::Hospital(h) => insert_hospital(conn, h),
        Record::User { user, profile } => {
            insert_user(conn, user)?;
            insert_profile(conn, profile)
        }
        Record::Doctor(d) => insert_doctor(conn, d),
        Record::Patient(p) => insert_patient(conn, p),
        Record::HealthSummary(s) => insert_health_summary(conn, s),
        Record::HealthRecord(r) => insert_health_record(conn, r),
        Record::Prescription { prescription, medicines } => {
            insert_prescription(conn, prescription)?;
            for medicine in medicines {
                insert_medicine(conn, medicine)?;
            }
            Ok(())
        }
        Record::MedicineSchedule(s) => insert_medicine_schedule(conn, s),
        Record::ScheduleSlot(s) => insert_schedule_slot(conn, s),
        Record::Reminder(r) => insert_reminder(conn, r),
        Record::Appointment(a) => insert_appointment(conn, a),
    }
}

/// Storage collaborator for population.
pub trait Store {
    /// First user carrying the demo flag. Read-only.
    fn first_demo_user(&self) -> Result<Option<User>, DatabaseError>;

    /// Write one record (nested records atomically).
    fn insert(&mut self, record: &Record) -> Result<(), DatabaseError>;

    /// Write all records in order inside one transaction.
    /// Either every record is committed or none is.
    fn run_atomic(&mut self, records: Vec<Record>) -> Result<Vec<Record>, DatabaseError>;

    fn create_hospital(&mut self, hospital: Hospital) -> Result<Hospital, DatabaseError> {
        self.insert(&Record::Hospital(hospital.clone()))?;
        Ok(hospital)
    }

    fn create_user(&mut self, user: User, profile: Profile) -> Result<(User, Profile), DatabaseError> {
        self.insert(&Record::User { user: user.clone(), profile: profile.clone() })?;
        Ok((user, profile))
    }

    fn create_doctor(&mut self, doctor: Doctor) -> Result<Doctor, DatabaseError> {
        self.insert(&Record::Doctor(doctor.clone()))?;
        Ok(doctor)
    }

    fn create_appointment(&mut self, appointment: Appointment) -> Result<Appointment, DatabaseError> {
        self.insert(&Record::Appointment(appointment.clone()))?;
        Ok(appointment)
    }

    fn create_reminder(&mut self, reminder: Reminder) -> Result<Reminder, DatabaseError> {
        self.insert(&Record::Reminder(reminder.clone()))?;
        Ok(reminder)
    }
}

/// SQLite-backed store owning its connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self { conn: open_database(path)? })
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self { conn: open_memory_database()? })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Read access for queries outside the `Store` surface.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Release the connection, surfacing any close failure.
    pub fn close(self) -> Result<(), DatabaseError> {
        self.conn.close().map_err(|(_, e)| DatabaseError::Sqlite(e))
    }
}

impl Store for SqliteStore {
    fn first_demo_user(&self) -> Result<Option<User>, DatabaseError> {
        first_demo_user(&self.conn)
    }

    fn insert(&mut self, record: &Record) -> Result<(), DatabaseError> {
        match record {
            Record::User { .. } | Record::Prescription { .. } => {
                let tx = self.conn.transaction()?;
                write_record(&tx, record)?;
                tx.commit()?;
                Ok(())
            }
            _ => write_record(&self.conn, record),
        }
    }

    fn run_atomic(&mut self, records: Vec<Record>) -> Result<Vec<Record>, DatabaseError> {
        let tx = self.conn.transaction()?;
        for record in &records {
            write_record(&tx, record)?;
        }
        tx.commit()?;
        tracing::debug!(count = records.len(), "Atomic batch committed");
        Ok(records)
    }
}
