use std::num::IntErrorKind;

use mail_cannon_types::{
    OrderRow, REQUIRED_ADDRESS_COLUMNS, ValidationError, ValidationIssue,
};

use crate::parse_quantity;

/// Check one row; every rule is evaluated so a row can report several errors.
///
/// - each required address column must be non-blank after trimming;
/// - each non-blank SKU cell must be a non-negative integer that fits in an
///   `i64` (blank cells are skipped);
/// - at least one SKU must have a positive quantity.
#[must_use]
pub fn validate_row(row: &OrderRow, row_number: u64, skus: &[String]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let err = |issue| ValidationError::new(row_number, issue);

    for column in REQUIRED_ADDRESS_COLUMNS {
        if row.field(column).trim().is_empty() {
            errors.push(err(ValidationIssue::MissingField(column)));
        }
    }

    let mut has_items = false;
    for sku in skus {
        match parse_quantity(row.quantity(sku)) {
            None => {}
            Some(Ok(qty)) if qty < 0 => {
                errors.push(err(ValidationIssue::NegativeQuantity { sku: sku.clone() }));
            }
            Some(Ok(qty)) => has_items |= qty > 0,
            Some(Err(e)) => {
                let raw = row.quantity(sku).trim().to_string();
                let sku = sku.clone();
                errors.push(err(match e.kind() {
                    // Still a positive quantity, so the row is not also "empty".
                    IntErrorKind::PosOverflow => {
                        has_items = true;
                        ValidationIssue::QuantityTooLarge { sku, raw }
                    }
                    IntErrorKind::NegOverflow => ValidationIssue::NegativeQuantity { sku },
                    _ => ValidationIssue::NonInteger { sku, raw },
                }));
            }
        }
    }

    if !has_items {
        errors.push(err(ValidationIssue::NoItems));
    }
    errors
}

/// Validate every row, numbering each by [`OrderRow::number`].
#[must_use]
pub fn validate_rows(rows: &[OrderRow], skus: &[String]) -> Vec<ValidationError> {
    rows.iter()
        .flat_map(|row| validate_row(row, row.number, skus))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mail_cannon_types::AddressColumn;

    fn full_row() -> OrderRow {
        OrderRow::new(2)
            .with_field(AddressColumn::FirstName, "Ada")
            .with_field(AddressColumn::Email, "ada@example.com")
            .with_field(AddressColumn::Line1, "1 Main St")
            .with_field(AddressColumn::City, "Springfield")
            .with_field(AddressColumn::State, "IL")
            .with_field(AddressColumn::PostalCode, "62701")
            .with_field(AddressColumn::Country, "US")
    }

    fn skus() -> Vec<String> {
        vec!["TEE-S".into(), "TEE-M".into(), "MUG".into()]
    }

    #[test]
    fn valid_row_has_no_errors() {
        let row = full_row().with_quantity("TEE-M", " 3 ");
        assert!(validate_row(&row, 2, &skus()).is_empty());
    }

    #[test]
    fn reports_every_problem_on_the_row() {
        let row = full_row()
            .with_field(AddressColumn::City, "  ")
            .with_quantity("TEE-S", "-1")
            .with_quantity("TEE-M", "lots");
        let errors = validate_row(&row, 5, &skus());
        let issues: Vec<_> = errors.iter().map(|e| e.issue.clone()).collect();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingField(AddressColumn::City),
                ValidationIssue::NegativeQuantity {
                    sku: "TEE-S".into()
                },
                ValidationIssue::NonInteger {
                    sku: "TEE-M".into(),
                    raw: "lots".into()
                },
                ValidationIssue::NoItems,
            ]
        );
        assert!(errors.iter().all(|e| e.row == 5));
    }

    #[test]
    fn blank_cells_are_skipped_but_junk_is_not() {
        let row = full_row()
            .with_quantity("TEE-S", "")
            .with_quantity("TEE-M", "2")
            .with_quantity("MUG", "x");
        let errors = validate_row(&row, 2, &skus());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "Row 2: non-integer value 'x' in 'MUG'");
    }

    #[test]
    fn oversized_quantity_is_not_called_non_integer() {
        let row = full_row().with_quantity("MUG", "99999999999999999999");
        let errors = validate_row(&row, 4, &skus());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Row 4: quantity '99999999999999999999' in 'MUG' is too large"
        );

        let row = full_row().with_quantity("MUG", "-99999999999999999999");
        let issues: Vec<_> = validate_row(&row, 4, &skus())
            .into_iter()
            .map(|e| e.issue)
            .collect();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::NegativeQuantity { sku: "MUG".into() },
                ValidationIssue::NoItems
            ]
        );
    }

    #[test]
    fn all_zero_quantities_is_no_items() {
        let row = full_row()
            .with_quantity("TEE-S", "0")
            .with_quantity("TEE-M", "0");
        let errors = validate_row(&row, 2, &skus());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].issue, ValidationIssue::NoItems);
    }

    #[test]
    fn optional_columns_may_be_blank() {
        let row = full_row()
            .with_field(AddressColumn::LastName, "")
            .with_field(AddressColumn::Line2, "")
            .with_quantity("MUG", "1");
        assert!(validate_row(&row, 2, &skus()).is_empty());
    }
}
