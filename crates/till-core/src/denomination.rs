//! # Denomination Table
//!
//! The fixed, ordered list of notes and coins a till works with, each row
//! carrying a face value, a display label, and a target quantity for the
//! float.
//!
//! ## Table Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Denomination Table (AUD default)                       │
//! │                                                                         │
//! │   key    label   value(¢)  target  kind                                │
//! │   ────   ─────   ────────  ──────  ────                                │
//! │   n100   $100     10000       0    note   ◄─ kept at zero: $100s go   │
//! │   n50    $50       5000       1    note      straight to takings       │
//! │   n20    $20       2000      10    note                                │
//! │   n10    $10       1000      10    note                                │
//! │   n5     $5         500      10    note                                │
//! │   c2     $2         200      15    coin                                │
//! │   c1     $1         100      11    coin                                │
//! │   c50    50c         50      10    coin                                │
//! │   c20    20c         20      10    coin                                │
//! │   c10    10c         10      10    coin                                │
//! │   c5     5c           5      20    coin   ◄─ smallest tradable unit    │
//! │                                                                         │
//! │   Rows are DESCENDING by face value. Every component leans on this:    │
//! │   greedy breakdowns walk top-to-bottom, the smallest-single-deposit    │
//! │   scan walks bottom-to-top.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is immutable configuration data shared read-only by the
//! snapshot, the planner, and the summary. It is validated once at
//! construction so the planner never has to re-check ordering.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Denomination Kind
// =============================================================================

/// Whether a denomination is a banknote or a coin.
///
/// The core algorithm treats both identically; the tag exists so hosts can
/// group rows ("Notes" / "Coins" sections) without re-deriving it from value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DenomKind {
    Note,
    Coin,
}

// =============================================================================
// Denomination
// =============================================================================

/// A single note or coin denomination.
///
/// ## Dual-Key Identity Pattern
/// - `key`: stable machine identifier ("n50") — used in count maps and steps
/// - `label`: human-readable ("$50") — used by hosts for display only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Denomination {
    /// Stable key, e.g. "n50" or "c20".
    pub key: String,

    /// Display label, e.g. "$50" or "20c".
    pub label: String,

    /// Face value in cents. Always positive.
    pub value: Money,

    /// Target quantity for the float (how many should remain after banking).
    pub target: u32,

    /// Note or coin.
    pub kind: DenomKind,
}

impl Denomination {
    /// Total value of the target holding for this row.
    #[inline]
    pub fn target_value(&self) -> Money {
        self.value.multiply_quantity(self.target as i64)
    }
}

// =============================================================================
// Denomination Table
// =============================================================================

/// The full, ordered denomination set.
///
/// ## Invariants (enforced by [`DenominationTable::new`])
/// - Non-empty
/// - Strictly descending by face value (which also implies unique values)
/// - Unique keys
/// - Positive face values
///
/// Components address denominations by index into this table; the index is
/// the one source of truth for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DenominationTable {
    denominations: Vec<Denomination>,
}

impl DenominationTable {
    /// Builds a validated table from rows listed in descending value order.
    pub fn new(denominations: Vec<Denomination>) -> CoreResult<Self> {
        if denominations.is_empty() {
            return Err(CoreError::EmptyTable);
        }

        for denom in &denominations {
            if !denom.value.is_positive() {
                return Err(CoreError::NonPositiveValue {
                    key: denom.key.clone(),
                    cents: denom.value.cents(),
                });
            }
        }

        for pair in denominations.windows(2) {
            if pair[1].value >= pair[0].value {
                return Err(CoreError::MisorderedTable {
                    key: pair[1].key.clone(),
                });
            }
        }

        for (i, denom) in denominations.iter().enumerate() {
            if denominations[..i].iter().any(|d| d.key == denom.key) {
                return Err(CoreError::DuplicateKey {
                    key: denom.key.clone(),
                });
            }
        }

        Ok(DenominationTable { denominations })
    }

    /// The standard AUD till table.
    ///
    /// The $100 note carries a target of zero: it is legal tender the till
    /// may receive, but none of it belongs in the float.
    pub fn aud() -> Self {
        let rows = [
            ("n100", "$100", 10000, 0, DenomKind::Note),
            ("n50", "$50", 5000, 1, DenomKind::Note),
            ("n20", "$20", 2000, 10, DenomKind::Note),
            ("n10", "$10", 1000, 10, DenomKind::Note),
            ("n5", "$5", 500, 10, DenomKind::Note),
            ("c2", "$2", 200, 15, DenomKind::Coin),
            ("c1", "$1", 100, 11, DenomKind::Coin),
            ("c50", "50c", 50, 10, DenomKind::Coin),
            ("c20", "20c", 20, 10, DenomKind::Coin),
            ("c10", "10c", 10, 10, DenomKind::Coin),
            ("c5", "5c", 5, 20, DenomKind::Coin),
        ];

        let denominations = rows
            .into_iter()
            .map(|(key, label, cents, target, kind)| Denomination {
                key: key.to_string(),
                label: label.to_string(),
                value: Money::from_cents(cents),
                target,
                kind,
            })
            .collect();

        // The hardcoded table satisfies every constructor invariant.
        DenominationTable::new(denominations).expect("built-in AUD table is valid")
    }

    /// Number of denominations.
    #[inline]
    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    /// Always false: `new` rejects empty tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    /// Row at `index`. Indices come from this table, so out-of-range access
    /// is a programming error and panics like slice indexing.
    #[inline]
    pub fn denom(&self, index: usize) -> &Denomination {
        &self.denominations[index]
    }

    /// Index of the denomination with `key`, if the table defines it.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.denominations.iter().position(|d| d.key == key)
    }

    /// Iterate largest-to-smallest face value (declaration order).
    ///
    /// Used by: surplus extraction, greedy change breakdown, largest-first
    /// deposit combination fallback.
    pub fn iter_desc(&self) -> impl Iterator<Item = (usize, &Denomination)> {
        self.denominations.iter().enumerate()
    }

    /// Iterate smallest-to-largest face value.
    ///
    /// Used by: the smallest-single-deposit scan (first match wins).
    pub fn iter_asc(&self) -> impl Iterator<Item = (usize, &Denomination)> {
        self.denominations.iter().enumerate().rev()
    }

    /// Total value of a full target float.
    pub fn target_total(&self) -> Money {
        self.denominations.iter().map(|d| d.target_value()).sum()
    }

    /// Face value of the smallest denomination, in cents.
    ///
    /// This is the smallest tradable unit: the planner rounds needed-exchange
    /// values up to it before selecting a deposit.
    pub fn smallest_unit(&self) -> i64 {
        // Table is non-empty and descending, so the last row is smallest.
        self.denominations[self.denominations.len() - 1].value.cents()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, cents: i64, target: u32) -> Denomination {
        Denomination {
            key: key.to_string(),
            label: key.to_string(),
            value: Money::from_cents(cents),
            target,
            kind: DenomKind::Coin,
        }
    }

    #[test]
    fn test_aud_table_shape() {
        let table = DenominationTable::aud();
        assert_eq!(table.len(), 11);
        assert_eq!(table.denom(0).key, "n100");
        assert_eq!(table.denom(0).target, 0);
        assert_eq!(table.denom(10).key, "c5");
        assert_eq!(table.smallest_unit(), 5);
    }

    #[test]
    fn test_aud_target_total() {
        // 1×$50 + 10×$20 + 10×$10 + 10×$5 + 15×$2 + 11×$1 + 10×50c
        // + 10×20c + 10×10c + 20×5c = $500.00 exactly.
        let table = DenominationTable::aud();
        assert_eq!(table.target_total().cents(), 50000);
    }

    #[test]
    fn test_iter_orders() {
        let table = DenominationTable::aud();
        let desc: Vec<i64> = table.iter_desc().map(|(_, d)| d.value.cents()).collect();
        let mut asc: Vec<i64> = table.iter_asc().map(|(_, d)| d.value.cents()).collect();
        asc.reverse();
        assert_eq!(desc, asc);
        assert!(desc.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_index_of() {
        let table = DenominationTable::aud();
        assert_eq!(table.index_of("n50"), Some(1));
        assert_eq!(table.index_of("c5"), Some(10));
        assert_eq!(table.index_of("bogus"), None);
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            DenominationTable::new(vec![]),
            Err(CoreError::EmptyTable)
        ));
    }

    #[test]
    fn test_rejects_misordered_table() {
        let result = DenominationTable::new(vec![row("a", 100, 0), row("b", 200, 0)]);
        assert!(matches!(
            result,
            Err(CoreError::MisorderedTable { key }) if key == "b"
        ));
    }

    #[test]
    fn test_rejects_equal_values() {
        let result = DenominationTable::new(vec![row("a", 100, 0), row("b", 100, 0)]);
        assert!(matches!(result, Err(CoreError::MisorderedTable { .. })));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let result = DenominationTable::new(vec![row("a", 200, 0), row("a", 100, 0)]);
        assert!(matches!(
            result,
            Err(CoreError::DuplicateKey { key }) if key == "a"
        ));
    }

    #[test]
    fn test_rejects_non_positive_value() {
        let result = DenominationTable::new(vec![row("a", 0, 0)]);
        assert!(matches!(result, Err(CoreError::NonPositiveValue { .. })));
    }
}
