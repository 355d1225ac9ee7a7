use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::order::AddressColumn;

/// The configuration file is missing, malformed, or fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// No file exists at the given path.
    #[error("config file not found: {path}")]
    NotFound {
        /// Path as given on the command line.
        path: String,
    },

    /// The file exists but could not be read.
    #[error("could not read config {path}: {reason}")]
    Unreadable {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O error text.
        reason: String,
    },

    /// The file is not a JSON object, or a value has the wrong type.
    #[error("malformed config: {0}")]
    Malformed(String),

    /// One or more required keys are absent.
    #[error("config missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// The `skus` list does not have the fixed length.
    #[error("config must list exactly {expected} SKUs, got {found}")]
    SkuCount {
        /// Required SKU count.
        expected: usize,
        /// Number of SKUs in the file.
        found: usize,
    },

    /// The API key still holds the example placeholder.
    #[error("set your real API key in the config before running")]
    PlaceholderApiKey,

    /// The base URL is not an absolute URL.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        url: String,
        /// Parser error text.
        reason: String,
    },

    /// The HTTP client could not be constructed from the configuration.
    #[error("could not build http client: {0}")]
    HttpClient(String),
}

/// The order CSV is missing or structurally unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    /// No file exists at the given path.
    #[error("CSV file not found: {path}")]
    NotFound {
        /// Path as given on the command line.
        path: String,
    },

    /// The file exists but could not be read or is not UTF-8.
    #[error("could not read CSV {path}: {reason}")]
    Unreadable {
        /// Path as given on the command line.
        path: String,
        /// Underlying error text.
        reason: String,
    },

    /// The header row lacks expected columns.
    #[error("CSV is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A record could not be parsed.
    #[error("malformed CSV at line {line}: {reason}")]
    Malformed {
        /// Physical line of the record.
        line: u64,
        /// Parser error text.
        reason: String,
    },
}

/// What is wrong with a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ValidationIssue {
    /// A required address column is blank.
    MissingField(AddressColumn),
    /// A SKU quantity is below zero.
    NegativeQuantity {
        /// SKU column name.
        sku: String,
    },
    /// A non-blank SKU cell does not parse as an integer.
    NonInteger {
        /// SKU column name.
        sku: String,
        /// Trimmed cell text.
        raw: String,
    },
    /// A SKU cell holds an integer too large to order.
    QuantityTooLarge {
        /// SKU column name.
        sku: String,
        /// Trimmed cell text.
        raw: String,
    },
    /// No SKU on the row has a positive quantity.
    NoItems,
}

/// A single content defect found on one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Row number (first kept data row is 2).
    pub row: u64,
    /// The defect.
    pub issue: ValidationIssue,
}

impl ValidationError {
    /// Build a validation error for `row`.
    #[must_use]
    pub const fn new(row: u64, issue: ValidationIssue) -> Self {
        Self { row, issue }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.row;
        match &self.issue {
            ValidationIssue::MissingField(col) => {
                write!(f, "Row {row}: missing required field '{col}'")
            }
            ValidationIssue::NegativeQuantity { sku } => {
                write!(f, "Row {row}: negative quantity in '{sku}'")
            }
            ValidationIssue::NonInteger { sku, raw } => {
                write!(f, "Row {row}: non-integer value '{raw}' in '{sku}'")
            }
            ValidationIssue::QuantityTooLarge { sku, raw } => {
                write!(f, "Row {row}: quantity '{raw}' in '{sku}' is too large")
            }
            ValidationIssue::NoItems => write!(f, "Row {row}: no SKUs with quantity > 0"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Why a single order could not be created.
///
/// These never abort a run; each one is recorded against its row.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrderError {
    /// The API answered with a non-success status.
    #[error("HTTP {status} | {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// JSON error body, or `{"raw": ...}` when the body was not JSON.
        body: serde_json::Value,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("{reason}")]
    Transport {
        /// Human readable cause.
        reason: String,
    },
}

impl OrderError {
    /// Helper: build an `Http` error.
    #[must_use]
    pub const fn http(status: u16, body: serde_json::Value) -> Self {
        Self::Http { status, body }
    }

    /// Helper: build a `Transport` error.
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Status code for HTTP-level failures.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Errors that stop a run before (or instead of) sending anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailCannonError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The order CSV could not be read.
    #[error(transparent)]
    Input(#[from] InputError),

    /// One or more rows failed validation; nothing was sent.
    #[error("validation failed with {} error(s). Fix the CSV and retry.", .0.len())]
    Validation(Vec<ValidationError>),

    /// The log or results file could not be written.
    #[error("output error: {0}")]
    Output(String),
}
