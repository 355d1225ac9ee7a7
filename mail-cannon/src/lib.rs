//! mail-cannon turns a CSV of recipients and per-SKU quantities into one
//! warehouse order per row.
//!
//! Overview
//! - Loads a JSON config (API base URL, key, tags, and the 12 SKU columns).
//! - Reads the CSV, drops records with a blank email, and validates every row
//!   before anything is sent. A single bad row aborts the whole run.
//! - Dry run: logs what each row would send and stops.
//! - Otherwise posts each row in file order, pausing after every request,
//!   records per-row outcomes, and writes a JSON results file next to the log.
//!
//! ```rust,ignore
//! use std::path::Path;
//! use mail_cannon::{LogSinks, MailCannon, RunLogger};
//!
//! let logger = RunLogger::new("logs", LogSinks::default())?;
//! let cannon = MailCannon::builder().logger(logger).dry_run(true).build()?;
//! let report = cannon.run(Path::new("orders.csv"), Path::new("config.json")).await?;
//! std::process::exit(report.exit_code().into());
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod logging;
mod summary;

pub use core::{
    DEFAULT_REQUEST_DELAY, MailCannon, MailCannonBuilder, RunReport, exit, exit_code_for,
};
pub use logging::{LogSinks, RunLogger};
pub use summary::write_summary;

// Re-export core types for convenience
pub use mail_cannon_core::{
    Config, ConfigError, InputError, MailCannonError, OrderClient, OrderError, OrderStatus,
    RunResult, RunSummary, ValidationError,
};
