use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_id;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_reminder(conn: &Connection, reminder: &Reminder) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO reminders (id, user_id, reminder_type, message, remind_at,
         schedule_slot_id, appointment_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            reminder.id.to_string(),
            reminder.user_id.to_string(),
            reminder.kind().as_str(),
            reminder.message,
            reminder.remind_at,
            reminder.target.schedule_slot_id().map(|id| id.to_string()),
            reminder.target.appointment_id().map(|id| id.to_string()),
            reminder.created_at,
        ],
    )?;
    Ok(())
}

pub fn list_reminders_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Vec<Reminder>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, reminder_type, message, remind_at, schedule_slot_id,
         appointment_id, created_at
         FROM reminders WHERE user_id = ?1 ORDER BY remind_at",
    )?;
    let rows = stmt.query_map(params![user_id.to_string()], reminder_row_from_rusqlite)?;

    let mut reminders = Vec::new();
    for row in rows {
        reminders.push(reminder_from_row(row?)?);
    }
    Ok(reminders)
}

pub fn list_reminders(conn: &Connection) -> Result<Vec<Reminder>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, reminder_type, message, remind_at, schedule_slot_id,
         appointment_id, created_at
         FROM reminders ORDER BY remind_at",
    )?;
    let rows = stmt.query_map([], reminder_row_from_rusqlite)?;

    let mut reminders = Vec::new();
    for row in rows {
        reminders.push(reminder_from_row(row?)?);
    }
    Ok(reminders)
}

// Internal row type for Reminder mapping
struct ReminderRow {
    id: String,
    user_id: String,
    reminder_type: String,
    message: String,
    remind_at: DateTime<Utc>,
    schedule_slot_id: Option<String>,
    appointment_id: Option<String>,
    created_at: DateTime<Utc>,
}

fn reminder_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<ReminderRow, rusqlite::Error> {
    Ok(ReminderRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        reminder_type: row.get(2)?,
        message: row.get(3)?,
        remind_at: row.get(4)?,
        schedule_slot_id: row.get(5)?,
        appointment_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn reminder_from_row(row: ReminderRow) -> Result<Reminder, DatabaseError> {
    let kind = ReminderType::from_str(&row.reminder_type)?;
    let target = match (kind, row.schedule_slot_id, row.appointment_id) {
        (ReminderType::Medicine, Some(slot), None) => ReminderTarget::ScheduleSlot(parse_id(&slot)?),
        (ReminderType::Appointment, None, Some(appt)) => {
            ReminderTarget::Appointment(parse_id(&appt)?)
        }
        _ => {
            return Err(DatabaseError::ConstraintViolation(format!(
                "reminder {} reference does not match type {}",
                row.id,
                kind.as_str()
            )))
        }
    };

    Ok(Reminder {
        id: parse_id(&row.id)?,
        user_id: parse_id(&row.user_id)?,
        target,
        message: row.message,
        remind_at: row.remind_at,
        created_at: row.created_at,
    })
}
