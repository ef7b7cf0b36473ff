//! # Reconciliation Summary
//!
//! The banking figures derived from a snapshot, the one-call `reconcile`
//! entry point hosts use per calculation, and the independent takings
//! double-check.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier counts till ──► reconcile() ──► statuses + steps + summary     │
//! │                                               │                         │
//! │  Cashier follows steps, bags takings          │  expected_takings       │
//! │                                               ▼                         │
//! │  Cashier recounts the bag ──► check_takings() ──► Match / Mismatch      │
//! │                                                   (exact cents, signed  │
//! │                                                    difference on miss)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each `reconcile` call builds everything from scratch and returns an
//! independent report; the core caches nothing between calls, so rapid
//! repeated calculations can never bleed into each other.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::counts::{CountLine, RawCounts};
use crate::denomination::DenominationTable;
use crate::error::CoreResult;
use crate::money::Money;
use crate::planner::{plan_exchanges, ExchangeStep};
use crate::snapshot::{LedgerSnapshot, StatusLine};

// =============================================================================
// Reconciliation Summary
// =============================================================================

/// The three figures every cash-up ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    /// Value of everything counted in the till.
    pub total_actual: Money,

    /// Value of a full target float.
    pub total_target: Money,

    /// `total_actual − total_target`. Negative means the till itself is
    /// short and nothing can be banked — reported signed, never clamped.
    pub expected_takings: Money,
}

impl ReconciliationSummary {
    /// Derives the summary from a snapshot.
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        ReconciliationSummary {
            total_actual: snapshot.total_actual,
            total_target: snapshot.total_target,
            expected_takings: snapshot.expected_takings(),
        }
    }
}

// =============================================================================
// Till Report (the full calculation output)
// =============================================================================

/// Everything one calculation produces, ready for host rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TillReport {
    /// Status column rows, in table order.
    pub statuses: Vec<StatusLine>,

    /// Exchange steps in execution order (empty for a perfect float).
    pub steps: Vec<ExchangeStep>,

    /// The takings inventory after all steps: the bank bag contents.
    pub takings_after: Vec<CountLine>,

    /// The banking figures.
    pub summary: ReconciliationSummary,

    /// False when the plan ends in an unresolved-shortage warning.
    pub fully_resolved: bool,
}

/// Runs one full reconciliation: counts in, report out.
///
/// ## Example
/// ```rust
/// use till_core::{reconcile, DenominationTable, RawCounts};
///
/// let table = DenominationTable::aud();
/// let mut counts = RawCounts::new();
/// for (_, d) in table.iter_desc() {
///     counts.set(d.key.clone(), d.target as i64);
/// }
///
/// let report = reconcile(&table, &counts).unwrap();
/// assert!(report.steps.is_empty());
/// assert!(report.summary.expected_takings.is_zero());
/// ```
pub fn reconcile(table: &DenominationTable, counts: &RawCounts) -> CoreResult<TillReport> {
    let counted = counts.resolve(table)?;
    let snapshot = LedgerSnapshot::take(table, counted);
    let plan = plan_exchanges(table, &snapshot)?;

    Ok(TillReport {
        statuses: snapshot.status_lines(table),
        steps: plan.steps,
        takings_after: plan.takings_after,
        summary: ReconciliationSummary::from_snapshot(&snapshot),
        fully_resolved: plan.fully_resolved,
    })
}

// =============================================================================
// Takings Double-Check
// =============================================================================

/// Outcome of recounting the takings bag against the expected figure.
///
/// Comparison is exact integer cents — there is no tolerance in a cash-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum TakingsCheck {
    /// The recount matches to the cent.
    Match { amount: Money },

    /// The recount disagrees; `difference` is `counted − expected`, signed.
    Mismatch {
        counted: Money,
        expected: Money,
        difference: Money,
    },
}

/// Cross-checks a manually recounted takings bag against `expected`.
///
/// Independent of `reconcile`: the host holds on to the last report's
/// `expected_takings` and passes it back in, so the core stays stateless.
pub fn check_takings(
    table: &DenominationTable,
    recount: &RawCounts,
    expected: Money,
) -> CoreResult<TakingsCheck> {
    let counted = recount.resolve(table)?.total_value(table);

    if counted == expected {
        Ok(TakingsCheck::Match { amount: counted })
    } else {
        Ok(TakingsCheck::Mismatch {
            counted,
            expected,
            difference: counted - expected,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::StepAction;
    use crate::snapshot::DenomStatus;

    fn counts_of(pairs: &[(&str, i64)]) -> (DenominationTable, RawCounts) {
        let table = DenominationTable::aud();
        let mut raw: RawCounts = pairs.iter().map(|&(k, v)| (k, v)).collect();
        for (_, d) in table.iter_desc() {
            raw.0.entry(d.key.clone()).or_insert(d.target as i64);
        }
        (table, raw)
    }

    #[test]
    fn test_reconcile_perfect_till() {
        let (table, counts) = counts_of(&[]);
        let report = reconcile(&table, &counts).unwrap();

        assert!(report.steps.is_empty());
        assert!(report.fully_resolved);
        assert!(report.summary.expected_takings.is_zero());
        assert!(report
            .statuses
            .iter()
            .all(|line| line.status == DenomStatus::Perfect));
    }

    #[test]
    fn test_reconcile_end_to_end() {
        // A spare $100 note and a 50c shortage: one removal, one exchange.
        let (table, counts) = counts_of(&[("n100", 1), ("c50", 9)]);
        let report = reconcile(&table, &counts).unwrap();

        assert!(report.fully_resolved);
        assert_eq!(report.summary.total_target.cents(), 50000);
        assert_eq!(report.summary.expected_takings.cents(), 10000 - 50);
        assert_eq!(report.steps.len(), 2);
        assert!(matches!(
            &report.steps[0].action,
            StepAction::MoveToTakings { line } if line.key == "n100"
        ));
        assert!(matches!(
            &report.steps[1].action,
            StepAction::ChangeBagExchange { .. }
        ));

        // Bank bag value equals the expected takings figure.
        let banked: i64 = report
            .takings_after
            .iter()
            .map(|line| {
                let index = table.index_of(&line.key).unwrap();
                table.denom(index).value.cents() * line.quantity as i64
            })
            .sum();
        assert_eq!(banked, report.summary.expected_takings.cents());
    }

    #[test]
    fn test_reconcile_short_till_reports_negative_takings() {
        let (table, counts) = counts_of(&[("n50", 0)]);
        let report = reconcile(&table, &counts).unwrap();

        assert_eq!(report.summary.expected_takings.cents(), -5000);
        assert!(!report.fully_resolved);
    }

    #[test]
    fn test_reconcile_independent_invocations() {
        // Two different counts through the same table must not influence
        // each other.
        let (table, messy) = counts_of(&[("n20", 12)]);
        let (_, perfect) = counts_of(&[]);

        let first = reconcile(&table, &messy).unwrap();
        let second = reconcile(&table, &perfect).unwrap();
        let again = reconcile(&table, &messy).unwrap();

        assert!(second.steps.is_empty());
        assert_eq!(first, again);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        // The report is the host-facing contract; field names are part of it.
        let (table, counts) = counts_of(&[("n20", 11)]);
        let report = reconcile(&table, &counts).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("takingsAfter").is_some());
        assert!(json.get("fullyResolved").is_some());
        assert_eq!(
            json["summary"]["expectedTakings"],
            serde_json::json!(2000)
        );
        assert_eq!(json["steps"][0]["action"]["kind"], "moveToTakings");

        // And it round-trips.
        let back: TillReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_takings_check_match() {
        let table = DenominationTable::aud();
        // Recount summing to $12.50.
        let recount: RawCounts = [("n10", 1i64), ("c2", 1), ("c50", 1)].into_iter().collect();

        let result = check_takings(&table, &recount, Money::from_cents(1250)).unwrap();
        assert_eq!(
            result,
            TakingsCheck::Match {
                amount: Money::from_cents(1250)
            }
        );
    }

    #[test]
    fn test_takings_check_mismatch_reports_signed_difference() {
        let table = DenominationTable::aud();
        // Recount summing to $13.00 against an expected $12.50.
        let recount: RawCounts = [("n10", 1i64), ("c2", 1), ("c1", 1)].into_iter().collect();

        let result = check_takings(&table, &recount, Money::from_cents(1250)).unwrap();
        match result {
            TakingsCheck::Mismatch {
                counted,
                expected,
                difference,
            } => {
                assert_eq!(counted.cents(), 1300);
                assert_eq!(expected.cents(), 1250);
                assert_eq!(difference.cents(), 50);
            }
            other => panic!("expected Mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_takings_check_against_short_till() {
        // Expected takings can be negative; an empty bag then mismatches by
        // the shortfall.
        let table = DenominationTable::aud();
        let result =
            check_takings(&table, &RawCounts::new(), Money::from_cents(-5000)).unwrap();
        match result {
            TakingsCheck::Mismatch { difference, .. } => {
                assert_eq!(difference.cents(), 5000);
            }
            other => panic!("expected Mismatch, got {other:?}"),
        }
    }
}
