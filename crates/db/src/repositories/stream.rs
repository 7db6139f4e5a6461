//! Constant-memory streaming over the `user_data` table.
//!
//! Row streams ride a sqlx cursor; page streams fetch one `LIMIT/OFFSET`
//! window at a time as the consumer pulls. Nothing here materializes the
//! full table. All streams follow primary-key order.

use futures::future::{self, Either};
use futures::stream::{self, Stream};
use futures::TryStreamExt;

use crate::models::user::User;
use crate::repositories::UserRepo;
use crate::DbPool;

/// Stream users one row at a time.
pub fn stream_users(
    pool: &DbPool,
) -> impl Stream<Item = Result<User, sqlx::Error>> + Unpin + '_ {
    sqlx::query_as::<_, User>("SELECT user_id, name, email, age FROM user_data ORDER BY user_id")
        .fetch(pool)
}

/// Stream users in fixed-size batches off the row cursor.
///
/// Every batch has exactly `batch_size` rows except possibly the last.
/// A `batch_size` of 0 yields an empty stream.
pub fn stream_users_in_batches(
    pool: &DbPool,
    batch_size: u32,
) -> impl Stream<Item = Result<Vec<User>, sqlx::Error>> + '_ {
    if batch_size == 0 {
        return Either::Left(stream::empty::<Result<Vec<User>, sqlx::Error>>());
    }
    Either::Right(
        stream_users(pool)
            .try_chunks(batch_size as usize)
            .map_err(|err| err.1),
    )
}

/// Fetch a single page of users at the given offset.
pub async fn paginate_users(
    pool: &DbPool,
    page_size: u32,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    UserRepo::fetch_page(pool, i64::from(page_size), offset).await
}

/// Lazily paginate the table: the offset starts at 0 and the next page
/// is fetched only when the consumer asks for it.
///
/// Terminates on the first empty page. A `page_size` of 0 yields an
/// empty stream.
pub fn lazy_paginate(
    pool: &DbPool,
    page_size: u32,
) -> impl Stream<Item = Result<Vec<User>, sqlx::Error>> + '_ {
    stream::try_unfold(0i64, move |offset| async move {
        if page_size == 0 {
            return Ok(None);
        }
        let page = paginate_users(pool, page_size, offset).await?;
        if page.is_empty() {
            Ok(None)
        } else {
            let next = offset + i64::from(page_size);
            Ok(Some((page, next)))
        }
    })
}

/// Stream ages only.
pub fn stream_user_ages(
    pool: &DbPool,
) -> impl Stream<Item = Result<i64, sqlx::Error>> + Unpin + '_ {
    sqlx::query_scalar::<_, i64>("SELECT age FROM user_data ORDER BY user_id").fetch(pool)
}

/// Average age over a single streaming pass.
///
/// Keeps a running sum and count over the age stream instead of SQL
/// aggregation or a bulk load. Returns `None` for an empty table.
pub async fn average_age(pool: &DbPool) -> Result<Option<f64>, sqlx::Error> {
    let mut ages = stream_user_ages(pool);
    let mut sum = 0i64;
    let mut count = 0u64;
    while let Some(age) = ages.try_next().await? {
        sum += age;
        count += 1;
    }
    Ok((count > 0).then(|| sum as f64 / count as f64))
}

/// Batch stream retaining only users strictly older than `min_age`.
///
/// Batches left empty by the filter are dropped.
pub fn stream_users_over(
    pool: &DbPool,
    batch_size: u32,
    min_age: i64,
) -> impl Stream<Item = Result<Vec<User>, sqlx::Error>> + '_ {
    stream_users_in_batches(pool, batch_size)
        .map_ok(move |batch| {
            batch
                .into_iter()
                .filter(|user| user.age > min_age)
                .collect::<Vec<_>>()
        })
        .try_filter(|batch| future::ready(!batch.is_empty()))
}
