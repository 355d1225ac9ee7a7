//! Records and error types shared by the mail-cannon pipeline crates.
//!
//! Nothing in this crate performs I/O; loaders, validation, and the HTTP
//! client live in `mail-cannon-core` and the connector crates.
#![warn(missing_docs)]

mod config;
mod error;
mod order;
mod report;

pub use config::{Config, PLACEHOLDER_API_KEY, SKU_COUNT, SkuList};
pub use error::{
    ConfigError, InputError, MailCannonError, OrderError, ValidationError, ValidationIssue,
};
pub use order::{
    ADDRESS_COLUMNS, AddressColumn, ContentLine, OrderPayload, OrderRow, REQUIRED_ADDRESS_COLUMNS,
    ShippingAddress, WarehouseOrder,
};
pub use report::{OrderStatus, RunResult, RunSummary};
