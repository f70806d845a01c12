pub mod activity;
pub mod bulk;
pub mod config;
pub mod del;
pub mod department;
pub mod init;
pub mod intervals;
pub mod log;
pub mod punch;
pub mod report;
pub mod status;
pub mod user;

use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Pretty JSON on stdout for `--json` outputs.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::InvalidInput(format!("cannot serialize output: {}", e)))?;
    println!("{}", out);
    Ok(())
}
