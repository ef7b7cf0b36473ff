//! # Exchange Planner
//!
//! Produces the ordered, physically performable exchange steps that turn a
//! counted till into exactly the target float while conserving every cent.
//!
//! ## The Three Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Planning Pass                                 │
//! │                                                                         │
//! │  Phase 1: SURPLUS EXTRACTION                                            │
//! │     every over-target denomination ──► TakingsPool                      │
//! │     (one step per denomination, like the paper sheet)                   │
//! │                                                                         │
//! │  Phase 2: DIRECT SAME-DENOMINATION FILL                                 │
//! │     shortage covered by the same denomination already sitting in        │
//! │     the takings inventory ──► straight back into the float              │
//! │     (one batched step, only if anything moved)                          │
//! │                                                                         │
//! │  Phase 3: CHANGE-BAG EXCHANGE                                           │
//! │     remaining shortages priced up ──► pick ONE takings denomination     │
//! │     (smallest single that covers it; else combine largest-first)        │
//! │     ──► deposit into the change bag ──► withdraw the exact missing      │
//! │     units for the float + greedy-broken leftovers back to takings       │
//! │                                                                         │
//! │  Can't cover it? Emit an UnresolvedShortage warning step. Phases 1-2    │
//! │  results are still returned — partial progress is never discarded.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - **Value conservation**: the plan as a whole moves exactly
//!   `total_actual − total_target` cents into takings, no more, no less
//! - **Physical realizability**: no step removes more units from a pool than
//!   the pool holds at that moment (checked removals, never floored)
//!
//! Everything here is pure: fresh pools per call, nothing shared, nothing
//! retained.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::counts::{CountLine, CountVector};
use crate::denomination::DenominationTable;
use crate::error::CoreResult;
use crate::money::Money;
use crate::snapshot::LedgerSnapshot;

// =============================================================================
// Exchange Steps
// =============================================================================

/// What one step physically does.
///
/// Steps expose structured quantity groups, never rendered text: the host
/// decides how "put 1 × $20 into the change bag" reads on its screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StepAction {
    /// Remove surplus units of one denomination from the float into takings.
    MoveToTakings { line: CountLine },

    /// Move units from the takings inventory straight into the float — the
    /// needed denominations were already sitting there, no breaking required.
    FillFromTakings { moves: Vec<CountLine> },

    /// The change-bag exchange, decomposed into the four display groups.
    ///
    /// Value identity: `deposit` = `withdraw` = `into_float` + `leftovers`
    /// (the bag neither creates nor destroys money).
    ChangeBagExchange {
        /// Put into the change bag, from takings.
        deposit: Vec<CountLine>,
        /// Taken back out of the change bag (fill + leftovers, summed per
        /// denomination when they overlap).
        withdraw: Vec<CountLine>,
        /// Delivered to the float to zero the remaining shortages.
        into_float: Vec<CountLine>,
        /// Returned to takings as leftovers.
        leftovers: Vec<CountLine>,
    },

    /// The takings inventory cannot cover the remaining shortages, even by
    /// combining everything it holds. Nothing is fabricated; the outstanding
    /// shortage list is reported in full.
    UnresolvedShortage {
        /// Value still needed (rounded up to the smallest tradable unit).
        needed: Money,
        /// Total value the takings inventory could offer.
        available: Money,
        /// The shortages left unfilled.
        outstanding: Vec<CountLine>,
    },
}

/// One numbered instruction in the plan.
///
/// `done` exists purely for host-side checklist tracking; the core always
/// emits it false and never reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeStep {
    /// 1-based position in the plan.
    pub number: u32,

    /// Host checklist flag. Always false when emitted.
    pub done: bool,

    /// The physical action.
    pub action: StepAction,
}

// =============================================================================
// Exchange Plan
// =============================================================================

/// The planner's full output for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePlan {
    /// Steps in execution order.
    pub steps: Vec<ExchangeStep>,

    /// The takings inventory after every step: what actually goes to the
    /// bank bag.
    pub takings_after: Vec<CountLine>,

    /// False when the plan ends in an [`StepAction::UnresolvedShortage`].
    pub fully_resolved: bool,
}

impl ExchangePlan {
    /// True when the plan needs no physical action at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Plans exchanges for a snapshot, starting from an empty takings inventory.
///
/// This is the everyday case: the only cash available to break is whatever
/// the float itself gives up as surplus in phase 1.
pub fn plan_exchanges(
    table: &DenominationTable,
    snapshot: &LedgerSnapshot,
) -> CoreResult<ExchangePlan> {
    plan_with_inventory(table, snapshot, CountVector::zeroed(table))
}

/// Plans exchanges with a pre-seeded takings inventory.
///
/// `opening_takings` models cash already out of the float but still on the
/// counter (e.g. a takings bag counted earlier in the shift). Phase 2 can
/// then fill a shortage from the same denomination without any breaking,
/// which is impossible when the inventory starts empty — a denomination is
/// never both over and under target in one count.
pub fn plan_with_inventory(
    table: &DenominationTable,
    snapshot: &LedgerSnapshot,
    opening_takings: CountVector,
) -> CoreResult<ExchangePlan> {
    let mut float = snapshot.counted.clone();
    let mut takings = opening_takings;
    let mut steps: Vec<ExchangeStep> = Vec::new();
    let mut fully_resolved = true;

    let push = |steps: &mut Vec<ExchangeStep>, action: StepAction| {
        let number = steps.len() as u32 + 1;
        steps.push(ExchangeStep {
            number,
            done: false,
            action,
        });
    };

    // ------------------------------------------------------------------
    // Phase 1: surplus extraction — extras leave the float
    // ------------------------------------------------------------------
    for (index, extra) in snapshot.deficits.surpluses() {
        float.remove(table, index, extra)?;
        takings.add(index, extra);

        let denom = table.denom(index);
        push(
            &mut steps,
            StepAction::MoveToTakings {
                line: CountLine {
                    key: denom.key.clone(),
                    label: denom.label.clone(),
                    quantity: extra,
                },
            },
        );
    }

    // Remaining shortages, as a pool of their own.
    let mut needs = CountVector::zeroed(table);
    for (index, missing) in snapshot.deficits.shortages() {
        needs.set(index, missing);
    }

    // ------------------------------------------------------------------
    // Phase 2: direct same-denomination fill from the takings inventory
    // ------------------------------------------------------------------
    let mut direct = CountVector::zeroed(table);
    for (index, _) in table.iter_desc() {
        let fill = needs.get(index).min(takings.get(index));
        if fill > 0 {
            direct.set(index, fill);
            takings.remove(table, index, fill)?;
            needs.remove(table, index, fill)?;
            float.add(index, fill);
        }
    }
    if direct.any_positive() {
        push(
            &mut steps,
            StepAction::FillFromTakings {
                moves: direct.lines(table),
            },
        );
    }

    // ------------------------------------------------------------------
    // Phase 3: change-bag exchange for whatever is still short
    // ------------------------------------------------------------------
    if needs.any_positive() {
        let needed_exact = needs.total_value(table);
        // Round up to the smallest coin before picking a deposit. With a
        // sane table every shortage value is already a multiple of it.
        let needed = needed_exact.round_up_to(table.smallest_unit());

        match choose_deposit(table, &takings, needed) {
            None => {
                fully_resolved = false;
                push(
                    &mut steps,
                    StepAction::UnresolvedShortage {
                        needed,
                        available: takings.total_value(table),
                        outstanding: needs.lines(table),
                    },
                );
            }
            Some((deposit, deposit_value)) => {
                // Leftovers conserve the EXACT shortage value; the rounded
                // figure only gated deposit selection.
                let leftover_value = deposit_value - needed_exact;
                let (leftovers, residue) = break_down(table, leftover_value);

                if !residue.is_zero() {
                    // The table cannot represent the remainder exactly
                    // (only possible with exotic custom tables). Report
                    // rather than swallow the difference.
                    fully_resolved = false;
                    push(
                        &mut steps,
                        StepAction::UnresolvedShortage {
                            needed,
                            available: takings.total_value(table),
                            outstanding: needs.lines(table),
                        },
                    );
                } else {
                    takings.remove_all(table, &deposit)?;

                    let withdraw = needs.merged_with(&leftovers);
                    float.add_all(&needs);
                    takings.add_all(&leftovers);

                    // The bag's books must balance to the cent.
                    debug_assert_eq!(
                        deposit.total_value(table),
                        withdraw.total_value(table)
                    );

                    push(
                        &mut steps,
                        StepAction::ChangeBagExchange {
                            deposit: deposit.lines(table),
                            withdraw: withdraw.lines(table),
                            into_float: needs.lines(table),
                            leftovers: leftovers.lines(table),
                        },
                    );
                }
            }
        }
    }

    // A fully resolved plan leaves the float exactly on target.
    debug_assert!(!fully_resolved || float == CountVector::target_float(table));

    Ok(ExchangePlan {
        steps,
        takings_after: takings.lines(table),
        fully_resolved,
    })
}

// =============================================================================
// Deposit Selection
// =============================================================================

/// Picks what to deposit into the change bag to cover `needed`.
///
/// Preference order:
/// 1. The SINGLE held denomination with the smallest face value that still
///    covers `needed` (ascending scan, first match wins) — break exactly one
///    larger unit rather than shovelling in a handful.
/// 2. Fallback: combine held units largest-first until covered.
///
/// Returns `None` when even the whole inventory falls short.
fn choose_deposit(
    table: &DenominationTable,
    takings: &CountVector,
    needed: Money,
) -> Option<(CountVector, Money)> {
    for (index, denom) in table.iter_asc() {
        if takings.get(index) > 0 && denom.value >= needed {
            let mut deposit = CountVector::zeroed(table);
            deposit.set(index, 1);
            return Some((deposit, denom.value));
        }
    }

    let mut deposit = CountVector::zeroed(table);
    let mut total = Money::zero();
    'outer: for (index, denom) in table.iter_desc() {
        let mut available = takings.get(index);
        while available > 0 && total < needed {
            deposit.add(index, 1);
            available -= 1;
            total += denom.value;
        }
        if total >= needed {
            break 'outer;
        }
    }

    if total < needed {
        return None;
    }
    Some((deposit, total))
}

// =============================================================================
// Greedy Breakdown
// =============================================================================

/// Breaks a value into denominations, greedy high-to-low.
///
/// Returns the breakdown plus any residue the table could not represent
/// (zero for every table whose smallest unit divides the value).
fn break_down(table: &DenominationTable, value: Money) -> (CountVector, Money) {
    debug_assert!(!value.is_negative());

    let mut out = CountVector::zeroed(table);
    let mut remaining = value.cents();

    for (index, denom) in table.iter_desc() {
        let count = remaining / denom.value.cents();
        if count > 0 {
            out.set(index, count as u32);
            remaining -= count * denom.value.cents();
        }
    }

    (out, Money::from_cents(remaining))
}

// =============================================================================
// Unit Tests
// =============================================================================
