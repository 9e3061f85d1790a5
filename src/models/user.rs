use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Gender, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Encoded hash, never the plaintext.
    pub password_hash: String,
    pub role: UserRole,
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
}

/// Exactly one per user, created together with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}
