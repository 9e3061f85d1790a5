use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::parse_id;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_medicine_schedule(
    conn: &Connection,
    schedule: &MedicineSchedule,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicine_schedules (id, medicine_id, period) VALUES (?1, ?2, ?3)",
        params![
            schedule.id.to_string(),
            schedule.medicine_id.to_string(),
            schedule.period.as_str(),
        ],
    )?;
    Ok(())
}

pub fn list_schedules_for_medicine(
    conn: &Connection,
    medicine_id: &Uuid,
) -> Result<Vec<MedicineSchedule>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medicine_id, period FROM medicine_schedules WHERE medicine_id = ?1",
    )?;

    let rows = stmt.query_map(params![medicine_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut schedules = Vec::new();
    for row in rows {
        let (id, medicine_id, period) = row?;
        schedules.push(MedicineSchedule {
            id: parse_id(&id)?,
            medicine_id: parse_id(&medicine_id)?,
            period: DayPeriod::from_str(&period)?,
        });
    }
    Ok(schedules)
}

pub fn insert_schedule_slot(
    conn: &Connection,
    slot: &MedicineScheduleSlot,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicine_schedule_slots (id, patient_id, schedule_id, time)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            slot.id.to_string(),
            slot.patient_id.to_string(),
            slot.schedule_id.to_string(),
            slot.time,
        ],
    )?;
    Ok(())
}

pub fn get_schedule_slot(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<MedicineScheduleSlot>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, patient_id, schedule_id, time FROM medicine_schedule_slots WHERE id = ?1",
            params![id.to_string()],
            slot_tuple,
        )
        .optional()?;
    row.map(slot_from_tuple).transpose()
}

pub fn list_slots_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<MedicineScheduleSlot>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, schedule_id, time
         FROM medicine_schedule_slots WHERE patient_id = ?1 ORDER BY time",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], slot_tuple)?;

    let mut slots = Vec::new();
    for row in rows {
        slots.push(slot_from_tuple(row?)?);
    }
    Ok(slots)
}

type SlotTuple = (String, String, String, DateTime<Utc>);

fn slot_tuple(row: &rusqlite::Row<'_>) -> Result<SlotTuple, rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn slot_from_tuple(
    (id, patient_id, schedule_id, time): SlotTuple,
) -> Result<MedicineScheduleSlot, DatabaseError> {
    Ok(MedicineScheduleSlot {
        id: parse_id(&id)?,
        patient_id: parse_id(&patient_id)?,
        schedule_id: parse_id(&schedule_id)?,
        time,
    })
}
