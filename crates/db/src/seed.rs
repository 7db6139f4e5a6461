//! CSV seeding for the `user_data` table.

use std::path::Path;

use prodev_core::types::UserId;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::DbError;
use crate::repositories::UserRepo;
use crate::DbPool;

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows inserted by this run.
    pub inserted: usize,
    /// True when the table already had rows and the CSV was not read.
    pub skipped_existing: bool,
}

/// One CSV record. A blank `user_id` field gets a fresh UUID at insert.
#[derive(Debug, Deserialize)]
struct CsvUser {
    #[serde(default)]
    user_id: Option<UserId>,
    name: String,
    email: String,
    age: i64,
}

/// Seed `user_data` from a CSV file with `user_id,name,email,age` headers.
///
/// A table that already contains rows is left untouched. All inserts run
/// in a single transaction; a malformed row aborts the whole run and
/// leaves the table empty.
pub async fn seed_from_csv(pool: &DbPool, path: &Path) -> Result<SeedReport, DbError> {
    let existing = UserRepo::count(pool).await?;
    if existing > 0 {
        tracing::info!(rows = existing, "user_data already seeded, skipping CSV import");
        return Ok(SeedReport {
            inserted: 0,
            skipped_existing: true,
        });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| DbError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tx = pool.begin().await?;
    let mut inserted = 0usize;

    for record in reader.deserialize::<CsvUser>() {
        let record = record.map_err(|source| DbError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let user_id = record.user_id.unwrap_or_else(Uuid::new_v4);

        sqlx::query("INSERT INTO user_data (user_id, name, email, age) VALUES (?1, ?2, ?3, ?4)")
            .bind(user_id.to_string())
            .bind(&record.name)
            .bind(&record.email)
            .bind(record.age)
            .execute(&mut *tx)
            .await?;
        inserted += 1;
    }

    tx.commit().await?;

    tracing::info!(inserted, csv = %path.display(), "seeded user_data from CSV");
    Ok(SeedReport {
        inserted,
        skipped_existing: false,
    })
}
