use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::parse_id;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, email, password_hash, role, is_demo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.id.to_string(),
            user.email,
            user.password_hash,
            user.role.as_str(),
            user.is_demo as i32,
            user.created_at,
        ],
    )?;
    Ok(())
}

pub fn insert_profile(conn: &Connection, profile: &Profile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO profiles (id, user_id, name, age, gender) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            profile.id.to_string(),
            profile.user_id.to_string(),
            profile.name,
            profile.age,
            profile.gender.as_str(),
        ],
    )?;
    Ok(())
}

/// First user carrying the demo flag, if any. Used as the population marker.
pub fn first_demo_user(conn: &Connection) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, email, password_hash, role, is_demo, created_at
             FROM users WHERE is_demo = 1 ORDER BY created_at LIMIT 1",
            [],
            user_row_from_rusqlite,
        )
        .optional()?;
    row.map(user_from_row).transpose()
}

pub fn get_user(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, email, password_hash, role, is_demo, created_at
             FROM users WHERE id = ?1",
            params![id.to_string()],
            user_row_from_rusqlite,
        )
        .optional()?;
    row.map(user_from_row).transpose()
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, email, password_hash, role, is_demo, created_at
             FROM users WHERE email = ?1",
            params![email],
            user_row_from_rusqlite,
        )
        .optional()?;
    row.map(user_from_row).transpose()
}

pub fn list_users_by_role(conn: &Connection, role: UserRole) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password_hash, role, is_demo, created_at
         FROM users WHERE role = ?1 ORDER BY email",
    )?;
    let rows = stmt.query_map(params![role.as_str()], user_row_from_rusqlite)?;

    let mut users = Vec::new();
    for row in rows {
        users.push(user_from_row(row?)?);
    }
    Ok(users)
}

pub fn get_profile_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<Profile>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, user_id, name, age, gender FROM profiles WHERE user_id = ?1",
            params![user_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((id, user_id, name, age, gender)) => Ok(Some(Profile {
            id: parse_id(&id)?,
            user_id: parse_id(&user_id)?,
            name,
            age,
            gender: Gender::from_str(&gender)?,
        })),
        None => Ok(None),
    }
}

// Internal row type for User mapping
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    role: String,
    is_demo: i32,
    created_at: DateTime<Utc>,
}

fn user_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: row.get(3)?,
        is_demo: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn user_from_row(row: UserRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: parse_id(&row.id)?,
        email: row.email,
        password_hash: row.password_hash,
        role: UserRole::from_str(&row.role)?,
        is_demo: row.is_demo != 0,
        created_at: row.created_at,
    })
}
