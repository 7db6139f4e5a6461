//! Repository for the `user_data` table.

use prodev_core::types::UserId;
use uuid::Uuid;

use crate::models::user::{NewUser, User};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "user_id, name, email, age";

/// Provides query operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn insert(pool: &DbPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let user_id = input.user_id.unwrap_or_else(Uuid::new_v4);
        let query = format!(
            "INSERT INTO user_data (user_id, name, email, age)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user_id.to_string())
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.age)
            .fetch_one(pool)
            .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(pool: &DbPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_data WHERE user_id = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(id.to_string())
            .fetch_optional(pool)
            .await
    }

    /// Total number of rows in `user_data`.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_data")
            .fetch_one(pool)
            .await
    }

    /// Bulk-load every user in primary-key order.
    ///
    /// The streaming operations use this as their ground truth in tests;
    /// production paths should prefer [`crate::repositories::stream`].
    pub async fn list_all(pool: &DbPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_data ORDER BY user_id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Fetch one `LIMIT/OFFSET` page of users in primary-key order.
    pub async fn fetch_page(
        pool: &DbPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_data ORDER BY user_id LIMIT ?1 OFFSET ?2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Users strictly older than `min_age`, in primary-key order.
    pub async fn older_than(pool: &DbPool, min_age: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_data WHERE age > ?1 ORDER BY user_id");
        sqlx::query_as::<_, User>(&query)
            .bind(min_age)
            .fetch_all(pool)
            .await
    }

    /// Update a user's email inside an explicit transaction.
    ///
    /// Returns `true` if the row existed. The transaction rolls back on
    /// any failure before the commit.
    pub async fn update_email(
        pool: &DbPool,
        id: UserId,
        new_email: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("UPDATE user_data SET email = ?1 WHERE user_id = ?2")
            .bind(new_email)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
