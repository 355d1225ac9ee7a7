//! mail-cannon-core
//!
//! The pure and file-reading stages of the order pipeline:
//!
//! - `config`: load and validate the JSON configuration.
//! - `source`: read the order CSV into [`OrderRow`] records.
//! - `validate`: check rows before anything is sent.
//! - `payload`: turn a valid row into an [`OrderPayload`].
//! - `client`: the [`OrderClient`] trait implemented by connectors.
#![warn(missing_docs)]

/// The `OrderClient` trait implemented by order API connectors.
pub mod client;
/// JSON configuration loading.
pub mod config;
/// Request body construction.
pub mod payload;
/// Order CSV reading.
pub mod source;
/// Row validation.
pub mod validate;

pub use client::OrderClient;
pub use config::{REQUIRED_KEYS, load_config, parse_config};
pub use payload::build_payload;
pub use source::{FIRST_ROW_NUMBER, OrderSource, parse_orders, read_orders};
pub use validate::{validate_row, validate_rows};

// Consolidated re-exports so downstream crates can depend on `mail-cannon-core` only
pub use mail_cannon_types::*;

/// Parse a raw quantity cell. Blank cells yield `None`.
pub(crate) fn parse_quantity(raw: &str) -> Option<Result<i64, std::num::ParseIntError>> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.parse::<i64>())
    }
}
