use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::parse_id;
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_hospital(conn: &Connection, hospital: &Hospital) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO hospitals (id, name, address, latitude, longitude, is_demo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            hospital.id.to_string(),
            hospital.name,
            hospital.address,
            hospital.latitude,
            hospital.longitude,
            hospital.is_demo as i32,
            hospital.created_at,
        ],
    )?;
    Ok(())
}

pub fn list_hospitals(conn: &Connection) -> Result<Vec<Hospital>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, address, latitude, longitude, is_demo, created_at
         FROM hospitals ORDER BY name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, f64>(3)?,
            row.get::<_, f64>(4)?,
            row.get::<_, i32>(5)?,
            row.get::<_, DateTime<Utc>>(6)?,
        ))
    })?;

    let mut hospitals = Vec::new();
    for row in rows {
        let (id, name, address, latitude, longitude, is_demo, created_at) = row?;
        hospitals.push(Hospital {
            id: parse_id(&id)?,
            name,
            address,
            latitude,
            longitude,
            is_demo: is_demo != 0,
            created_at,
        });
    }
    Ok(hospitals)
}

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, user_id, hospital_id, specialization, experience_years, license_number)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            doctor.id.to_string(),
            doctor.user_id.to_string(),
            doctor.hospital_id.to_string(),
            doctor.specialization,
            doctor.experience_years,
            doctor.license_number,
        ],
    )?;
    Ok(())
}

/// All doctors, ordered by license number.
pub fn list_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, hospital_id, specialization, experience_years, license_number
         FROM doctors ORDER BY license_number",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, u32>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut doctors = Vec::new();
    for row in rows {
        let (id, user_id, hospital_id, specialization, experience_years, license_number) = row?;
        doctors.push(Doctor {
            id: parse_id(&id)?,
            user_id: parse_id(&user_id)?,
            hospital_id: parse_id(&hospital_id)?,
            specialization,
            experience_years,
            license_number,
        });
    }
    Ok(doctors)
}
