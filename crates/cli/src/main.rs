//! `prodev` -- seed and stream the `user_data` table from the command line.
//!
//! # Environment variables
//!
//! | Variable             | Default              | Description                  |
//! |----------------------|----------------------|------------------------------|
//! | `DATABASE_URL`       | `sqlite://prodev.db` | SQLite database location     |
//! | `SEED_CSV_PATH`      | `user_data.csv`      | CSV used by `prodev seed`    |
//! | `DEFAULT_BATCH_SIZE` | `50`                 | Batch size when not given    |
//! | `DEFAULT_PAGE_SIZE`  | `100`                | Page size when not given     |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures::{pin_mut, TryStreamExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prodev_core::config::Settings;
use prodev_db::models::user::User;
use prodev_db::repositories::{stream, UserRepo};
use prodev_db::seed;
use prodev_db::DbPool;

#[derive(Parser)]
#[command(name = "prodev")]
#[command(about = "Seed and stream the user_data table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema and load users from a CSV file
    Seed {
        /// CSV path (default: SEED_CSV_PATH)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print users one row at a time
    Stream {
        /// Stop after this many rows
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Print users in fixed-size batches
    Batches {
        /// Rows per batch (default: DEFAULT_BATCH_SIZE)
        #[arg(long)]
        batch_size: Option<u32>,
    },

    /// Print users one lazily-fetched page at a time
    Paginate {
        /// Rows per page (default: DEFAULT_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Stream all ages and print their average
    Average,

    /// Print users over 25, fetched in batches
    Adults {
        /// Rows per batch (default: DEFAULT_BATCH_SIZE)
        #[arg(long)]
        batch_size: Option<u32>,
    },

    /// Fetch row count, average age, and adult count concurrently
    Report,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prodev=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let pool = prodev_db::create_pool(&settings.database_url).await?;
    prodev_db::health_check(&pool).await?;
    prodev_db::run_migrations(&pool).await?;
    tracing::debug!(database_url = %settings.database_url, "database ready");

    match cli.command {
        Commands::Seed { csv } => {
            let path = csv.unwrap_or(settings.seed_csv_path);
            let report = seed::seed_from_csv(&pool, &path).await?;
            if report.skipped_existing {
                println!("Data already exists in the table");
            } else {
                println!("Seeded {} users from {}", report.inserted, path.display());
            }
        }

        Commands::Stream { limit } => {
            let mut rows = stream::stream_users(&pool);
            let mut printed = 0u64;
            while let Some(user) = rows.try_next().await? {
                print_user(&user);
                printed += 1;
                if limit.is_some_and(|l| printed >= l) {
                    break;
                }
            }
        }

        Commands::Batches { batch_size } => {
            let batch_size = batch_size.unwrap_or(settings.default_batch_size);
            let batches = stream::stream_users_in_batches(&pool, batch_size);
            pin_mut!(batches);
            let mut index = 0usize;
            while let Some(batch) = batches.try_next().await? {
                println!("batch {index} ({} users):", batch.len());
                for user in &batch {
                    print_user(user);
                }
                index += 1;
            }
        }

        Commands::Paginate { page_size } => {
            let page_size = page_size.unwrap_or(settings.default_page_size);
            let pages = stream::lazy_paginate(&pool, page_size);
            pin_mut!(pages);
            let mut page_number = 0usize;
            while let Some(page) = pages.try_next().await? {
                println!("page {page_number} ({} users):", page.len());
                for user in &page {
                    print_user(user);
                }
                page_number += 1;
            }
        }

        Commands::Average => match stream::average_age(&pool).await? {
            Some(average) => println!("Average age of users: {average}"),
            None => println!("No users found in database"),
        },

        Commands::Adults { batch_size } => {
            let batch_size = batch_size.unwrap_or(settings.default_batch_size);
            let batches = stream::stream_users_over(&pool, batch_size, 25);
            pin_mut!(batches);
            while let Some(batch) = batches.try_next().await? {
                for user in &batch {
                    print_user(user);
                }
            }
        }

        Commands::Report => {
            report(&pool).await?;
        }
    }

    Ok(())
}

/// One user per line, as JSON.
fn print_user(user: &User) {
    match serde_json::to_string(user) {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::error!(%err, "failed to serialize user"),
    }
}

/// Fetch the row count, the streamed average age, and the adult rows in
/// one concurrent pass, then print a short summary.
async fn report(pool: &DbPool) -> anyhow::Result<()> {
    let (count, average, adults) = tokio::try_join!(
        UserRepo::count(pool),
        stream::average_age(pool),
        UserRepo::older_than(pool, 25),
    )?;

    println!("users: {count}");
    match average {
        Some(average) => println!("average age: {average:.2}"),
        None => println!("average age: n/a"),
    }
    println!("over 25: {}", adults.len());
    Ok(())
}
