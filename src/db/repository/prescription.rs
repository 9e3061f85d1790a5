use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_id;
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_prescription(
    conn: &Connection,
    prescription: &Prescription,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id, patient_id, doctor_id, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            prescription.id.to_string(),
            prescription.patient_id.to_string(),
            prescription.doctor_id.to_string(),
            prescription.notes,
            prescription.created_at,
        ],
    )?;
    Ok(())
}

pub fn insert_medicine(conn: &Connection, medicine: &Medicine) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicines (id, prescription_id, name, dosage, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            medicine.id.to_string(),
            medicine.prescription_id.to_string(),
            medicine.name,
            medicine.dosage,
            medicine.is_active as i32,
            medicine.created_at,
        ],
    )?;
    Ok(())
}

pub fn list_prescriptions_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, notes, created_at
         FROM prescriptions WHERE patient_id = ?1 ORDER BY created_at",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, DateTime<Utc>>(4)?,
        ))
    })?;

    let mut prescriptions = Vec::new();
    for row in rows {
        let (id, patient_id, doctor_id, notes, created_at) = row?;
        prescriptions.push(Prescription {
            id: parse_id(&id)?,
            patient_id: parse_id(&patient_id)?,
            doctor_id: parse_id(&doctor_id)?,
            notes,
            created_at,
        });
    }
    Ok(prescriptions)
}

/// Medicines of one prescription, by name.
pub fn list_medicines(
    conn: &Connection,
    prescription_id: &Uuid,
) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, prescription_id, name, dosage, is_active, created_at
         FROM medicines WHERE prescription_id = ?1 ORDER BY name",
    )?;

    let rows = stmt.query_map(params![prescription_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i32>(4)?,
            row.get::<_, DateTime<Utc>>(5)?,
        ))
    })?;

    let mut medicines = Vec::new();
    for row in rows {
        let (id, prescription_id, name, dosage, is_active, created_at) = row?;
        medicines.push(Medicine {
            id: parse_id(&id)?,
            prescription_id: parse_id(&prescription_id)?,
            name,
            dosage,
            is_active: is_active != 0,
            created_at,
        });
    }
    Ok(medicines)
}
