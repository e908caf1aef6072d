//! Cash journal balance.
//!
//! The balance is never stored. Every read folds the full entry set from
//! scratch, so callers pay O(n) per query and can never observe a stale
//! cached value.

use shared::{EntryKind, JournalEntry};

/// Net cash position: inflows add, outflows subtract. The fold is
/// commutative, so entry order does not affect the result.
pub fn balance(entries: &[JournalEntry]) -> f64 {
    entries.iter().fold(0.0, |acc, entry| match entry.kind {
        EntryKind::Entry => acc + entry.amount,
        EntryKind::Exit => acc - entry.amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: EntryKind, amount: f64) -> JournalEntry {
        JournalEntry {
            id: 0,
            kind,
            amount,
            description: "entry".to_string(),
            date: "2025-06-01T10:00:00Z".to_string(),
            category: None,
            document_type: None,
            invoice_id: None,
        }
    }

    #[test]
    fn empty_journal_balances_to_zero() {
        assert_eq!(balance(&[]), 0.0);
    }

    #[test]
    fn single_inflow_is_its_amount() {
        assert_eq!(balance(&[entry(EntryKind::Entry, 100.0)]), 100.0);
    }

    #[test]
    fn outflows_subtract() {
        let entries = vec![entry(EntryKind::Entry, 100.0), entry(EntryKind::Exit, 40.0)];
        assert_eq!(balance(&entries), 60.0);
    }

    #[test]
    fn balance_is_order_independent() {
        let entries = vec![
            entry(EntryKind::Entry, 250.0),
            entry(EntryKind::Exit, 99.5),
            entry(EntryKind::Entry, 12.25),
            entry(EntryKind::Exit, 3.0),
        ];
        let expected = balance(&entries);

        let mut reversed = entries.clone();
        reversed.reverse();
        assert_eq!(balance(&reversed), expected);

        let mut rotated = entries;
        rotated.rotate_left(2);
        assert_eq!(balance(&rotated), expected);
    }

    #[test]
    fn balance_can_go_negative() {
        let entries = vec![entry(EntryKind::Entry, 10.0), entry(EntryKind::Exit, 25.0)];
        assert_eq!(balance(&entries), -15.0);
    }
}
