//! CSV order rows and the wire body used to create a warehouse order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed address columns every order sheet must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressColumn {
    /// Recipient given name.
    FirstName,
    /// Recipient family name (optional).
    LastName,
    /// Recipient email; rows with a blank email are not data rows.
    Email,
    /// First street line.
    Line1,
    /// Second street line (optional).
    Line2,
    /// City.
    City,
    /// State or region.
    State,
    /// Postal code.
    PostalCode,
    /// Country.
    Country,
}

/// All address columns, in sheet order.
pub const ADDRESS_COLUMNS: [AddressColumn; 9] = [
    AddressColumn::FirstName,
    AddressColumn::LastName,
    AddressColumn::Email,
    AddressColumn::Line1,
    AddressColumn::Line2,
    AddressColumn::City,
    AddressColumn::State,
    AddressColumn::PostalCode,
    AddressColumn::Country,
];

/// Address columns that must be non-blank on every row.
pub const REQUIRED_ADDRESS_COLUMNS: [AddressColumn; 7] = [
    AddressColumn::FirstName,
    AddressColumn::Email,
    AddressColumn::Line1,
    AddressColumn::City,
    AddressColumn::State,
    AddressColumn::PostalCode,
    AddressColumn::Country,
];

impl AddressColumn {
    /// Header name of the column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Line1 => "line_1",
            Self::Line2 => "line_2",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postal_code",
            Self::Country => "country",
        }
    }
}

impl fmt::Display for AddressColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recipient record as read from the CSV.
///
/// Cells are kept as raw text; trimming and quantity parsing happen in the
/// validator and payload builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    /// Row number as reported to the user: the first data row kept after
    /// blank-email records are dropped is 2, the next 3, and so on.
    pub number: u64,
    /// Address cells keyed by column.
    pub address: BTreeMap<AddressColumn, String>,
    /// Raw quantity cell for each configured SKU.
    pub quantities: BTreeMap<String, String>,
}

impl OrderRow {
    /// Empty row numbered `number`.
    #[must_use]
    pub fn new(number: u64) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Builder-style setter for an address cell.
    #[must_use]
    pub fn with_field(mut self, column: AddressColumn, value: impl Into<String>) -> Self {
        self.address.insert(column, value.into());
        self
    }

    /// Builder-style setter for a SKU quantity cell.
    #[must_use]
    pub fn with_quantity(mut self, sku: impl Into<String>, raw: impl Into<String>) -> Self {
        self.quantities.insert(sku.into(), raw.into());
        self
    }

    /// Raw address cell; absent cells read as blank.
    #[must_use]
    pub fn field(&self, column: AddressColumn) -> &str {
        self.address.get(&column).map_or("", String::as_str)
    }

    /// Raw quantity cell for `sku`; absent cells read as blank.
    #[must_use]
    pub fn quantity(&self, sku: &str) -> &str {
        self.quantities.get(sku).map_or("", String::as_str)
    }

    /// Recipient email, trimmed.
    #[must_use]
    pub fn email(&self) -> &str {
        self.field(AddressColumn::Email).trim()
    }
}

/// Request body for `POST /api/v1/warehouse_orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Order envelope.
    pub warehouse_order: WarehouseOrder,
    /// Shipping address.
    pub address: ShippingAddress,
    /// One line per SKU with a positive quantity; never empty for a valid row.
    pub contents: Vec<ContentLine>,
}

/// Order-level fields of the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseOrder {
    /// Trimmed recipient email.
    pub recipient_email: String,
    /// Tags from the config.
    pub tags: Vec<String>,
}

/// Shipping address of the request body.
///
/// `last_name` and `line_2` are omitted from the JSON when blank; the API
/// treats an empty string differently from an absent key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Given name.
    pub first_name: String,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// First street line.
    pub line_1: String,
    /// Second street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_2: Option<String>,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

/// A single SKU line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLine {
    /// SKU identifier.
    pub sku: String,
    /// Units to ship; always positive.
    pub quantity: u64,
}
