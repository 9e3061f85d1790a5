use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::parse_id;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_appointment(
    conn: &Connection,
    appointment: &Appointment,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, patient_id, doctor_id, date_time, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            appointment.id.to_string(),
            appointment.patient_id.to_string(),
            appointment.doctor_id.to_string(),
            appointment.date_time,
            appointment.status.as_str(),
        ],
    )?;
    Ok(())
}

pub fn get_appointment(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, patient_id, doctor_id, date_time, status FROM appointments WHERE id = ?1",
            params![id.to_string()],
            appointment_tuple,
        )
        .optional()?;
    row.map(appointment_from_tuple).transpose()
}

pub fn list_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, date_time, status FROM appointments ORDER BY date_time",
    )?;
    let rows = stmt.query_map([], appointment_tuple)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_tuple(row?)?);
    }
    Ok(appointments)
}

type AppointmentTuple = (String, String, String, DateTime<Utc>, String);

fn appointment_tuple(row: &rusqlite::Row<'_>) -> Result<AppointmentTuple, rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn appointment_from_tuple(
    (id, patient_id, doctor_id, date_time, status): AppointmentTuple,
) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: parse_id(&id)?,
        patient_id: parse_id(&patient_id)?,
        doctor_id: parse_id(&doctor_id)?,
        date_time,
        status: AppointmentStatus::from_str(&status)?,
    })
}
