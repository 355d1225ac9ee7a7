use mail_cannon_types::{
    AddressColumn, ContentLine, OrderPayload, OrderRow, ShippingAddress, WarehouseOrder,
};

use crate::parse_quantity;

/// Build the request body for a validated row.
///
/// One content line per SKU with a positive quantity, in SKU order. Cells that
/// are blank, zero, or unparseable are left out, so the result never carries a
/// non-positive quantity even for rows that skipped validation.
#[must_use]
pub fn build_payload(row: &OrderRow, skus: &[String], tags: &[String]) -> OrderPayload {
    let contents = skus
        .iter()
        .filter_map(|sku| {
            let qty = parse_quantity(row.quantity(sku))?.ok()?;
            let quantity = u64::try_from(qty).ok().filter(|q| *q > 0)?;
            Some(ContentLine {
                sku: sku.clone(),
                quantity,
            })
        })
        .collect();

    let trimmed = |column| row.field(column).trim().to_string();
    let optional = |column| Some(trimmed(column)).filter(|v: &String| !v.is_empty());

    OrderPayload {
        warehouse_order: WarehouseOrder {
            recipient_email: row.email().to_string(),
            tags: tags.to_vec(),
        },
        address: ShippingAddress {
            first_name: trimmed(AddressColumn::FirstName),
            last_name: optional(AddressColumn::LastName),
            line_1: trimmed(AddressColumn::Line1),
            line_2: optional(AddressColumn::Line2),
            city: trimmed(AddressColumn::City),
            state: trimmed(AddressColumn::State),
            postal_code: trimmed(AddressColumn::PostalCode),
            country: trimmed(AddressColumn::Country),
        },
        contents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_wire_body_in_sku_order() {
        let skus = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let row = OrderRow::new(2)
            .with_field(AddressColumn::FirstName, " Ada ")
            .with_field(AddressColumn::LastName, "Lovelace")
            .with_field(AddressColumn::Email, " ada@example.com ")
            .with_field(AddressColumn::Line1, "1 Main St")
            .with_field(AddressColumn::Line2, "   ")
            .with_field(AddressColumn::City, "London")
            .with_field(AddressColumn::State, "LDN")
            .with_field(AddressColumn::PostalCode, "N1")
            .with_field(AddressColumn::Country, "GB")
            .with_quantity("A", "0")
            .with_quantity("B", "2")
            .with_quantity("C", "1");

        let payload = build_payload(&row, &skus, &["promo".to_string()]);
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            v,
            json!({
                "warehouse_order": {"recipient_email": "ada@example.com", "tags": ["promo"]},
                "address": {
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "line_1": "1 Main St",
                    "city": "London",
                    "state": "LDN",
                    "postal_code": "N1",
                    "country": "GB"
                },
                "contents": [{"sku": "B", "quantity": 2}, {"sku": "C", "quantity": 1}]
            })
        );
    }
}
