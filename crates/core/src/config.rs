//! Environment-driven configuration.

use std::path::PathBuf;

/// Workspace configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use; override via the
/// environment (a `.env` file is honored by the binaries).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Database URL (default: `sqlite://prodev.db`).
    pub database_url: String,
    /// Path to the seed CSV (default: `user_data.csv`).
    pub seed_csv_path: PathBuf,
    /// Batch size used when none is given on the command line (default: `50`).
    pub default_batch_size: u32,
    /// Page size used when none is given on the command line (default: `100`).
    pub default_page_size: u32,
}

impl Settings {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default              |
    /// |----------------------|----------------------|
    /// | `DATABASE_URL`       | `sqlite://prodev.db` |
    /// | `SEED_CSV_PATH`      | `user_data.csv`      |
    /// | `DEFAULT_BATCH_SIZE` | `50`                 |
    /// | `DEFAULT_PAGE_SIZE`  | `100`                |
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://prodev.db".into());

        let seed_csv_path: PathBuf = std::env::var("SEED_CSV_PATH")
            .unwrap_or_else(|_| "user_data.csv".into())
            .into();

        let default_batch_size: u32 = std::env::var("DEFAULT_BATCH_SIZE")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("DEFAULT_BATCH_SIZE must be a valid u32");

        let default_page_size: u32 = std::env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("DEFAULT_PAGE_SIZE must be a valid u32");

        Self {
            database_url,
            seed_csv_path,
            default_batch_size,
            default_page_size,
        }
    }
}
