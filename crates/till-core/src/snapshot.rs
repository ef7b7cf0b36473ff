//! # Ledger Snapshot
//!
//! Turns raw counted quantities into the deficit/surplus view everything
//! downstream works from: signed per-denomination deltas, exact integer
//! totals, and the three-state status column hosts display.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw counts ──► resolve against table ──► LedgerSnapshot::take          │
//! │                                                │                        │
//! │                   ┌────────────────────────────┼─────────────────┐      │
//! │                   ▼                            ▼                 ▼      │
//! │            DeficitVector              total_actual /      status rows   │
//! │            (planner input)            total_target        (display)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure function of its input: no side effects, no retained state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::counts::{CountVector, DeficitVector};
use crate::denomination::DenominationTable;
use crate::money::Money;

// =============================================================================
// Denomination Status
// =============================================================================

/// Display status for one denomination row: the three states of the status
/// column on the cash-up sheet.
///
/// Statuses describe the ORIGINAL count against target, not the post-plan
/// state — the cashier reads them before touching any cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DenomStatus {
    /// Counted exactly matches target.
    Perfect,
    /// Counted exceeds target by `extra` units (they must leave the float).
    Surplus { extra: u32 },
    /// Counted falls short of target by `missing` units.
    Short { missing: u32 },
}

/// One row of the status column, ready for host rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusLine {
    pub key: String,
    pub label: String,
    pub counted: u32,
    pub target: u32,
    pub status: DenomStatus,
}

// =============================================================================
// Ledger Snapshot
// =============================================================================

/// The counted till resolved against the target float.
///
/// Owns the counted vector plus everything derived from it. Created fresh
/// per calculation and handed to the planner; never persisted.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    /// The counted till, untouched (the planner clones it to mutate).
    pub counted: CountVector,

    /// Signed counted-minus-target per denomination.
    pub deficits: DeficitVector,

    /// Exact value of everything counted.
    pub total_actual: Money,

    /// Exact value of a full target float.
    pub total_target: Money,
}

impl LedgerSnapshot {
    /// Computes deficits and totals for `counted`.
    pub fn take(table: &DenominationTable, counted: CountVector) -> Self {
        let deficits = DeficitVector::compute(table, &counted);
        let total_actual = counted.total_value(table);
        let total_target = table.target_total();

        // The conserved identity the whole plan hangs off.
        debug_assert_eq!(deficits.net_value(table), total_actual - total_target);

        LedgerSnapshot {
            counted,
            deficits,
            total_actual,
            total_target,
        }
    }

    /// Expected cash takings: what should leave for banking.
    ///
    /// Negative means the till itself is short — reported as-is, never
    /// clamped.
    #[inline]
    pub fn expected_takings(&self) -> Money {
        self.total_actual - self.total_target
    }

    /// Status column rows in table order.
    pub fn status_lines(&self, table: &DenominationTable) -> Vec<StatusLine> {
        table
            .iter_desc()
            .map(|(i, d)| {
                let delta = self.deficits.delta(i);
                let status = if delta == 0 {
                    DenomStatus::Perfect
                } else if delta > 0 {
                    DenomStatus::Surplus { extra: delta as u32 }
                } else {
                    DenomStatus::Short {
                        missing: (-delta) as u32,
                    }
                };
                StatusLine {
                    key: d.key.clone(),
                    label: d.label.clone(),
                    counted: self.counted.get(i),
                    target: d.target,
                    status,
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::RawCounts;

    fn snapshot_of(pairs: &[(&str, i64)]) -> (DenominationTable, LedgerSnapshot) {
        let table = DenominationTable::aud();
        let mut raw: RawCounts = pairs.iter().map(|&(k, v)| (k, v)).collect();
        // Fill every unmentioned denomination with its target quantity.
        for (_, d) in table.iter_desc() {
            raw.0.entry(d.key.clone()).or_insert(d.target as i64);
        }
        let counted = raw.resolve(&table).unwrap();
        let snapshot = LedgerSnapshot::take(&table, counted);
        (table, snapshot)
    }

    #[test]
    fn test_perfect_till() {
        let (table, snapshot) = snapshot_of(&[]);
        assert!(snapshot.deficits.is_balanced());
        assert_eq!(snapshot.total_actual.cents(), 50000);
        assert_eq!(snapshot.total_target.cents(), 50000);
        assert!(snapshot.expected_takings().is_zero());
        assert!(snapshot
            .status_lines(&table)
            .iter()
            .all(|line| line.status == DenomStatus::Perfect));
    }

    #[test]
    fn test_surplus_and_shortage_statuses() {
        let (table, snapshot) = snapshot_of(&[("n20", 12), ("c50", 7)]);
        let lines = snapshot.status_lines(&table);

        let n20 = lines.iter().find(|l| l.key == "n20").unwrap();
        assert_eq!(n20.status, DenomStatus::Surplus { extra: 2 });
        assert_eq!(n20.counted, 12);
        assert_eq!(n20.target, 10);

        let c50 = lines.iter().find(|l| l.key == "c50").unwrap();
        assert_eq!(c50.status, DenomStatus::Short { missing: 3 });
    }

    #[test]
    fn test_expected_takings_signed() {
        // Two extra $20 notes and three missing 50c coins: +4000 - 150.
        let (_, snapshot) = snapshot_of(&[("n20", 12), ("c50", 7)]);
        assert_eq!(snapshot.expected_takings().cents(), 3850);

        // A till that is simply short reports negative takings.
        let (_, short) = snapshot_of(&[("n50", 0)]);
        assert_eq!(short.expected_takings().cents(), -5000);
    }

    #[test]
    fn test_totals_are_exact_sums() {
        let (table, snapshot) = snapshot_of(&[("n100", 3)]);
        assert_eq!(
            snapshot.total_actual,
            snapshot.counted.total_value(&table)
        );
        assert_eq!(snapshot.total_actual.cents(), 50000 + 30000);
    }
}
