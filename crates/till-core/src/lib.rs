//! # till-core: Pure Reconciliation Logic for Till Float
//!
//! This crate is the **heart** of Till Float. It contains the whole cash-up
//! algorithm as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Till Float Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host / Presentation Layer                       │   │
//! │  │   count entry ──► step checklist ──► banking summary            │   │
//! │  │   (terminal, web, API — anything that can read JSON)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RawCounts in / TillReport out          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────┐  │   │
//! │  │   │denomination│ │ snapshot │ │  planner  │ │   summary    │  │   │
//! │  │   │ the table  │ │ deficits │ │ exchanges │ │ takings check│  │   │
//! │  │   └────────────┘ └──────────┘ └───────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`denomination`] - The fixed note/coin table with float targets
//! - [`counts`] - Count vectors, pools, and signed deficits
//! - [`snapshot`] - Counted till resolved against the target float
//! - [`planner`] - The exchange planner (the hard part)
//! - [`summary`] - Banking figures and the takings double-check
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Count input normalization
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic - same counts,
//!    same plan
//! 2. **No Retained State**: Each `reconcile` call builds fresh pools and
//!    discards them; concurrent calculations cannot interfere
//! 3. **Integer Money**: All monetary values are cents (i64) to avoid float
//!    drift - a cash-up must balance to the cent
//! 4. **Structured Output**: Steps expose grouped quantity lists, never
//!    pre-rendered text; the host owns all formatting
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{reconcile, DenominationTable, RawCounts};
//!
//! let table = DenominationTable::aud();
//!
//! // A perfect till, except one spare $20 note.
//! let mut counts = RawCounts::new();
//! for (_, d) in table.iter_desc() {
//!     counts.set(d.key.clone(), d.target as i64);
//! }
//! counts.set("n20", 11);
//!
//! let report = reconcile(&table, &counts).unwrap();
//! assert_eq!(report.summary.expected_takings.cents(), 2000);
//! assert_eq!(report.steps.len(), 1); // move 1 × $20 to takings
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod counts;
pub mod denomination;
pub mod error;
pub mod money;
pub mod planner;
pub mod snapshot;
pub mod summary;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use counts::{CountLine, CountVector, DeficitVector, RawCounts};
pub use denomination::{DenomKind, Denomination, DenominationTable};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use planner::{plan_exchanges, plan_with_inventory, ExchangePlan, ExchangeStep, StepAction};
pub use snapshot::{DenomStatus, LedgerSnapshot, StatusLine};
pub use summary::{check_takings, reconcile, ReconciliationSummary, TakingsCheck, TillReport};
