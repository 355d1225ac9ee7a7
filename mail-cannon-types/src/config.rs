//! Validated run configuration.

use serde::{Deserialize, Serialize};

/// Number of SKU quantity columns every order sheet carries.
pub const SKU_COUNT: usize = 12;

/// API key value shipped in the example config; a run refuses to start with it.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// The configured SKU identifiers, in column order.
pub type SkuList = [String; SKU_COUNT];

/// Settings loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the order API, e.g. `https://theseus.example.com`.
    pub base_url: String,
    /// Bearer credential sent with every request.
    pub api_key: String,
    /// Tags attached to every created order.
    pub tags: Vec<String>,
    /// SKU identifiers; each names one quantity column in the CSV.
    pub skus: SkuList,
}

impl Config {
    /// SKU identifiers as a slice.
    #[must_use]
    pub fn sku_names(&self) -> &[String] {
        &self.skus
    }
}
