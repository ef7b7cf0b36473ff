//! # Count Vectors
//!
//! Per-denomination quantity bookkeeping: the raw host input, the physical
//! pools the planner mutates, and the signed counted-vs-target deficits.
//!
//! ## The Three Pools
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pools During One Planning Pass                       │
//! │                                                                         │
//! │   Till (counted)      TakingsPool            ChangeBag                  │
//! │   ─────────────       ───────────            ─────────                  │
//! │   what the cashier    surplus removed        transient: cash            │
//! │   physically counted  from the float,        mid-exchange, always       │
//! │   mutated as steps    an INVENTORY           emptied by the step        │
//! │   are planned         available to break     that filled it             │
//! │                                                                         │
//! │   All three are CountVectors created fresh per calculation and          │
//! │   discarded afterwards. Nothing survives between invocations.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities are indexed parallel to the [`DenominationTable`]; the index is
//! the denomination's position in the table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::denomination::DenominationTable;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Raw Counts (host-facing input)
// =============================================================================

/// The host-facing input map: denomination key → counted quantity.
///
/// Hosts source this however they like (form fields, JSON file, API
/// payload). Negative quantities clamp to zero when converted — a garbled
/// count is a zero count, never an error (the cashier just sees "Short").
/// Unknown keys ARE an error: they indicate a host/table mismatch, not a
/// counting mistake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawCounts(pub BTreeMap<String, i64>);

impl RawCounts {
    /// Empty input (every denomination counts as zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the counted quantity for `key`.
    pub fn set(&mut self, key: impl Into<String>, quantity: i64) -> &mut Self {
        self.0.insert(key.into(), quantity);
        self
    }

    /// Resolves the map against `table` into an indexed vector.
    ///
    /// Missing keys become zero; negatives clamp to zero; unknown keys are
    /// rejected with [`CoreError::UnknownDenomination`].
    pub fn resolve(&self, table: &DenominationTable) -> CoreResult<CountVector> {
        for key in self.0.keys() {
            if table.index_of(key).is_none() {
                return Err(CoreError::UnknownDenomination { key: key.clone() });
            }
        }

        let mut vector = CountVector::zeroed(table);
        for (key, &quantity) in &self.0 {
            // Checked above, so index_of cannot miss here.
            if let Some(index) = table.index_of(key) {
                vector.set(index, crate::validation::normalize_quantity(quantity));
            }
        }
        Ok(vector)
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for RawCounts {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        RawCounts(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// =============================================================================
// Count Line (display group entry)
// =============================================================================

/// One "N × $X" row inside a step's display group.
///
/// Carries both the stable key (for hosts that cross-reference the table)
/// and the label (so simple hosts can render without a lookup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CountLine {
    /// Denomination key, e.g. "n20".
    pub key: String,

    /// Denomination label, e.g. "$20".
    pub label: String,

    /// Number of physical units. Always positive (zero rows are omitted).
    pub quantity: u32,
}

// =============================================================================
// Count Vector (a physical pool)
// =============================================================================

/// Non-negative per-denomination quantities for one physical pool.
///
/// ## Invariants
/// - Length equals the table length it was created from
/// - `remove` never drives a quantity negative: over-withdrawal is a typed
///   error, because you cannot hand over a note you do not hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountVector {
    quantities: Vec<u32>,
}

impl CountVector {
    /// A pool holding nothing, sized for `table`.
    pub fn zeroed(table: &DenominationTable) -> Self {
        CountVector {
            quantities: vec![0; table.len()],
        }
    }

    /// A pool holding exactly the target float quantities.
    pub fn target_float(table: &DenominationTable) -> Self {
        CountVector {
            quantities: table.iter_desc().map(|(_, d)| d.target).collect(),
        }
    }

    /// Units held at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        self.quantities[index]
    }

    /// Overwrites the quantity at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, quantity: u32) {
        self.quantities[index] = quantity;
    }

    /// Adds `quantity` units at `index`.
    #[inline]
    pub fn add(&mut self, index: usize, quantity: u32) {
        self.quantities[index] += quantity;
    }

    /// Removes `quantity` units at `index`, refusing to go negative.
    pub fn remove(
        &mut self,
        table: &DenominationTable,
        index: usize,
        quantity: u32,
    ) -> CoreResult<()> {
        let held = self.quantities[index];
        if quantity > held {
            return Err(CoreError::InsufficientUnits {
                key: table.denom(index).key.clone(),
                held,
                requested: quantity,
            });
        }
        self.quantities[index] = held - quantity;
        Ok(())
    }

    /// True if any denomination has at least one unit.
    pub fn any_positive(&self) -> bool {
        self.quantities.iter().any(|&q| q > 0)
    }

    /// Total monetary value of the pool.
    pub fn total_value(&self, table: &DenominationTable) -> Money {
        table
            .iter_desc()
            .map(|(i, d)| d.value.multiply_quantity(self.quantities[i] as i64))
            .sum()
    }

    /// Non-zero rows as display lines, in table (descending value) order.
    pub fn lines(&self, table: &DenominationTable) -> Vec<CountLine> {
        table
            .iter_desc()
            .filter(|(i, _)| self.quantities[*i] > 0)
            .map(|(i, d)| CountLine {
                key: d.key.clone(),
                label: d.label.clone(),
                quantity: self.quantities[i],
            })
            .collect()
    }

    /// Adds every line of `other` into this pool.
    pub fn add_all(&mut self, other: &CountVector) {
        debug_assert_eq!(self.quantities.len(), other.quantities.len());
        for (slot, &extra) in self.quantities.iter_mut().zip(&other.quantities) {
            *slot += extra;
        }
    }

    /// Removes every line of `other` from this pool, or fails atomically.
    pub fn remove_all(&mut self, table: &DenominationTable, other: &CountVector) -> CoreResult<()> {
        debug_assert_eq!(self.quantities.len(), other.quantities.len());
        for (index, &wanted) in other.quantities.iter().enumerate() {
            let held = self.quantities[index];
            if wanted > held {
                return Err(CoreError::InsufficientUnits {
                    key: table.denom(index).key.clone(),
                    held,
                    requested: wanted,
                });
            }
        }
        for (slot, &wanted) in self.quantities.iter_mut().zip(&other.quantities) {
            *slot -= wanted;
        }
        Ok(())
    }

    /// Sum of this pool and `other`, element-wise.
    pub fn merged_with(&self, other: &CountVector) -> CountVector {
        debug_assert_eq!(self.quantities.len(), other.quantities.len());
        CountVector {
            quantities: self
                .quantities
                .iter()
                .zip(&other.quantities)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

// =============================================================================
// Deficit Vector
// =============================================================================

/// Signed counted-minus-target difference per denomination.
///
/// Positive = surplus (must leave the float), negative = shortage (must be
/// filled). The identity `Σ delta×value = total_actual − total_target` is
/// what the whole exchange plan must conserve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeficitVector {
    deltas: Vec<i64>,
}

impl DeficitVector {
    /// Computes `counted − target` for every table row.
    pub fn compute(table: &DenominationTable, counted: &CountVector) -> Self {
        DeficitVector {
            deltas: table
                .iter_desc()
                .map(|(i, d)| counted.get(i) as i64 - d.target as i64)
                .collect(),
        }
    }

    /// Signed delta at `index`.
    #[inline]
    pub fn delta(&self, index: usize) -> i64 {
        self.deltas[index]
    }

    /// Denominations over target, as `(index, surplus_quantity)`.
    pub fn surpluses(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.deltas
            .iter()
            .enumerate()
            .filter(|(_, &d)| d > 0)
            .map(|(i, &d)| (i, d as u32))
    }

    /// Denominations under target, as `(index, shortage_quantity)`.
    pub fn shortages(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.deltas
            .iter()
            .enumerate()
            .filter(|(_, &d)| d < 0)
            .map(|(i, &d)| (i, (-d) as u32))
    }

    /// True when every denomination is exactly on target.
    pub fn is_balanced(&self) -> bool {
        self.deltas.iter().all(|&d| d == 0)
    }

    /// Net value of all deltas: `total_actual − total_target`.
    pub fn net_value(&self, table: &DenominationTable) -> Money {
        table
            .iter_desc()
            .map(|(i, d)| d.value.multiply_quantity(self.deltas[i]))
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn aud() -> DenominationTable {
        DenominationTable::aud()
    }

    #[test]
    fn test_raw_counts_resolution() {
        let table = aud();
        let raw: RawCounts = [("n50", 2i64), ("c5", 20)].into_iter().collect();
        let counts = raw.resolve(&table).unwrap();
        assert_eq!(counts.get(table.index_of("n50").unwrap()), 2);
        assert_eq!(counts.get(table.index_of("c5").unwrap()), 20);
        assert_eq!(counts.get(table.index_of("n20").unwrap()), 0);
    }

    #[test]
    fn test_raw_counts_clamps_negative() {
        let table = aud();
        let raw: RawCounts = [("n50", -3i64)].into_iter().collect();
        let counts = raw.resolve(&table).unwrap();
        assert_eq!(counts.get(table.index_of("n50").unwrap()), 0);
    }

    #[test]
    fn test_raw_counts_rejects_unknown_key() {
        let table = aud();
        let raw: RawCounts = [("n500", 1i64)].into_iter().collect();
        assert!(matches!(
            raw.resolve(&table),
            Err(CoreError::UnknownDenomination { key }) if key == "n500"
        ));
    }

    #[test]
    fn test_target_float_totals() {
        let table = aud();
        let float = CountVector::target_float(&table);
        assert_eq!(float.total_value(&table).cents(), 50000);
    }

    #[test]
    fn test_remove_refuses_overdraw() {
        let table = aud();
        let mut pool = CountVector::zeroed(&table);
        let n50 = table.index_of("n50").unwrap();
        pool.add(n50, 1);

        assert!(pool.remove(&table, n50, 1).is_ok());
        assert!(matches!(
            pool.remove(&table, n50, 1),
            Err(CoreError::InsufficientUnits { held: 0, requested: 1, .. })
        ));
    }

    #[test]
    fn test_remove_all_is_atomic() {
        let table = aud();
        let mut pool = CountVector::zeroed(&table);
        let n50 = table.index_of("n50").unwrap();
        let n20 = table.index_of("n20").unwrap();
        pool.add(n50, 1);

        let mut wanted = CountVector::zeroed(&table);
        wanted.add(n50, 1);
        wanted.add(n20, 1);

        // n20 is missing, so nothing may change.
        assert!(pool.remove_all(&table, &wanted).is_err());
        assert_eq!(pool.get(n50), 1);
    }

    #[test]
    fn test_lines_skip_zero_rows_and_keep_order() {
        let table = aud();
        let mut pool = CountVector::zeroed(&table);
        pool.add(table.index_of("c5").unwrap(), 3);
        pool.add(table.index_of("n20").unwrap(), 1);

        let lines = pool.lines(&table);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].key, "n20"); // descending value order
        assert_eq!(lines[1].key, "c5");
        assert_eq!(lines[1].quantity, 3);
    }

    #[test]
    fn test_deficit_identity() {
        let table = aud();
        let mut raw = RawCounts::new();
        raw.set("n50", 2); // surplus 1 (+5000)
        raw.set("n20", 9); // short 1 (-2000)
        let counted = raw.resolve(&table).unwrap();

        let deficits = DeficitVector::compute(&table, &counted);
        let actual = counted.total_value(&table);
        let target = table.target_total();
        assert_eq!(deficits.net_value(&table), actual - target);
    }

    #[test]
    fn test_balanced_deficits() {
        let table = aud();
        let float = CountVector::target_float(&table);
        let deficits = DeficitVector::compute(&table, &float);
        assert!(deficits.is_balanced());
        assert_eq!(deficits.surpluses().count(), 0);
        assert_eq!(deficits.shortages().count(), 0);
        assert!(deficits.net_value(&table).is_zero());
    }
}
