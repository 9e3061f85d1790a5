use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::parse_id;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, user_id) VALUES (?1, ?2)",
        params![patient.id.to_string(), patient.user_id.to_string()],
    )?;
    Ok(())
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, user_id FROM patients")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut patients = Vec::new();
    for row in rows {
        let (id, user_id) = row?;
        patients.push(Patient {
            id: parse_id(&id)?,
            user_id: parse_id(&user_id)?,
        });
    }
    Ok(patients)
}

pub fn get_patient_by_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, user_id FROM patients WHERE user_id = ?1",
            params![user_id.to_string()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    match row {
        Some((id, user_id)) => Ok(Some(Patient {
            id: parse_id(&id)?,
            user_id: parse_id(&user_id)?,
        })),
        None => Ok(None),
    }
}

pub fn insert_health_summary(
    conn: &Connection,
    summary: &HealthSummary,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_summaries (id, patient_id, blood_group, height_cm, weight_kg, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            summary.id.to_string(),
            summary.patient_id.to_string(),
            summary.blood_group.as_str(),
            summary.height_cm,
            summary.weight_kg,
            summary.notes,
        ],
    )?;
    Ok(())
}

pub fn get_health_summary(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<HealthSummary>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, patient_id, blood_group, height_cm, weight_kg, notes
             FROM health_summaries WHERE patient_id = ?1",
            params![patient_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((id, patient_id, blood_group, height_cm, weight_kg, notes)) => {
            Ok(Some(HealthSummary {
                id: parse_id(&id)?,
                patient_id: parse_id(&patient_id)?,
                blood_group: BloodGroup::from_str(&blood_group)?,
                height_cm,
                weight_kg,
                notes,
            }))
        }
        None => Ok(None),
    }
}

pub fn insert_health_record(conn: &Connection, record: &HealthRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_records (id, patient_id, created_by_user_id, record_type, title,
         description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id.to_string(),
            record.patient_id.to_string(),
            record.created_by_user_id.to_string(),
            record.record_type.as_str(),
            record.title,
            record.description,
            record.created_at,
        ],
    )?;
    Ok(())
}

pub fn list_health_records(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<HealthRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, created_by_user_id, record_type, title, description, created_at
         FROM health_records WHERE patient_id = ?1 ORDER BY created_at",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, DateTime<Utc>>(6)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (id, patient_id, author, record_type, title, description, created_at) = row?;
        records.push(HealthRecord {
            id: parse_id(&id)?,
            patient_id: parse_id(&patient_id)?,
            created_by_user_id: parse_id(&author)?,
            record_type: HealthRecordType::from_str(&record_type)?,
            title,
            description,
            created_at,
        });
    }
    Ok(records)
}
