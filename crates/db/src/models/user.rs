//! User entity model for the `user_data` table.

use prodev_core::types::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `user_data` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Seed-time input for a user row.
///
/// A missing `user_id` gets a fresh v4 UUID at insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub age: i64,
}
