//! Document totals arithmetic.
//!
//! Pure functions over line items and the settings-level tax percentage.
//! All values are full precision; rounding to two decimals happens only at
//! display time.

use crate::domain::commands::invoices::LineItemRecord;

/// Totals of a document derived from its current line item set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Total of a single line: quantity times unit price. Tax is applied at the
/// document level, not per line.
pub fn line_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Fold the line totals into document totals. The tax percentage comes from
/// the settings row and is applied to the whole subtotal.
pub fn document_totals(items: &[LineItemRecord], tax_percentage: f64) -> DocumentTotals {
    let subtotal: f64 = items.iter().map(|item| item.total).sum();
    let tax = subtotal * tax_percentage / 100.0;
    DocumentTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, unit_price: f64) -> LineItemRecord {
        LineItemRecord {
            product_id: None,
            description: "item".to_string(),
            quantity,
            unit_price,
            tax_rate: 0.0,
            total: line_total(quantity, unit_price),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.001,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn line_total_is_quantity_times_price() {
        assert_eq!(line_total(2.0, 50.0), 100.0);
        assert_eq!(line_total(0.0, 99.99), 0.0);
        assert_eq!(line_total(2.5, 4.0), 10.0);
    }

    #[test]
    fn empty_item_list_yields_zero_totals() {
        let totals = document_totals(&[], 16.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn totals_match_hand_computed_document() {
        // 2 x 50 + 1 x 30 at 16% tax
        let items = vec![item(2.0, 50.0), item(1.0, 30.0)];
        let totals = document_totals(&items, 16.0);
        assert_close(totals.subtotal, 130.0);
        assert_close(totals.tax, 20.8);
        assert_close(totals.total, 150.8);
    }

    #[test]
    fn total_is_always_subtotal_plus_tax() {
        let items = vec![item(3.0, 19.99), item(7.0, 0.5), item(1.0, 1200.0)];
        for pct in [0.0, 5.0, 16.0, 17.5] {
            let totals = document_totals(&items, pct);
            assert_close(totals.total, totals.subtotal + totals.tax);
            assert_close(totals.subtotal, items.iter().map(|i| i.total).sum());
        }
    }

    #[test]
    fn zero_tax_percentage_means_total_equals_subtotal() {
        let items = vec![item(4.0, 25.0)];
        let totals = document_totals(&items, 0.0);
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 100.0);
    }
}
