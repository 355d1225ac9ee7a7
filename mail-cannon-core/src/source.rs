use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use mail_cannon_types::{ADDRESS_COLUMNS, AddressColumn, InputError, OrderRow};

/// Number given to the first kept data row; the header counts as row 1.
pub const FIRST_ROW_NUMBER: u64 = 2;

/// Data rows read from an order CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSource {
    /// Rows with a non-blank email, in file order.
    pub rows: Vec<OrderRow>,
    /// Records dropped because their email was blank.
    pub skipped: usize,
}

/// Read the order CSV at `path`.
///
/// # Errors
/// Returns an [`InputError`] when the file is missing, not UTF-8, lacks an
/// expected column, or contains an unparseable record.
pub fn read_orders(path: &Path, skus: &[String]) -> Result<OrderSource, InputError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InputError::NotFound {
            path: path.display().to_string(),
        },
        _ => InputError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|e| InputError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_orders(&text, skus)
}

/// Parse order CSV text.
///
/// The header must contain every address column plus one column per SKU;
/// other columns are ignored. A leading byte-order mark is stripped and
/// short records read their missing cells as blank. Records with a blank
/// email are dropped before numbering, so kept rows are numbered
/// consecutively from [`FIRST_ROW_NUMBER`].
///
/// # Errors
/// See [`read_orders`].
pub fn parse_orders(text: &str, skus: &[String]) -> Result<OrderSource, InputError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(malformed)?.clone();
    let index_of = |name: &str| headers.iter().position(|h| h == name);

    let expected = ADDRESS_COLUMNS
        .iter()
        .map(|c| c.as_str())
        .chain(skus.iter().map(String::as_str));
    let missing: Vec<String> = expected
        .filter(|name| index_of(*name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(InputError::MissingColumns(missing));
    }

    let address_idx: Vec<(AddressColumn, Option<usize>)> = ADDRESS_COLUMNS
        .iter()
        .map(|c| (*c, index_of(c.as_str())))
        .collect();
    let sku_idx: Vec<(&String, Option<usize>)> =
        skus.iter().map(|s| (s, index_of(s.as_str()))).collect();

    let mut out = OrderSource::default();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        // Kept rows are numbered 2, 3, ... so dropped records leave no gaps.
        let number = FIRST_ROW_NUMBER + out.rows.len() as u64;
        let mut row = OrderRow::new(number);
        for (column, idx) in &address_idx {
            row.address.insert(*column, cell(*idx).to_string());
        }
        for (sku, idx) in &sku_idx {
            row.quantities.insert((*sku).clone(), cell(*idx).to_string());
        }

        if row.email().is_empty() {
            out.skipped += 1;
        } else {
            out.rows.push(row);
        }
    }
    Ok(out)
}

fn malformed(e: csv::Error) -> InputError {
    InputError::Malformed {
        line: e.position().map_or(0, csv::Position::line),
        reason: e.to_string(),
    }
}
