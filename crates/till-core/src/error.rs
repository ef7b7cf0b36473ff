//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Table construction, pool access, bad keys      │
//! │  └── (clamped input)  - NOT an error: bad counts normalize to zero     │
//! │                                                                         │
//! │  Planner warnings (planner.rs)                                         │
//! │  └── UnresolvedShortage - a STEP in the plan, not an Err: the rest     │
//! │                           of the plan is still returned                │
//! │                                                                         │
//! │  Flow: CoreError → host error → user-facing message                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (denomination key, counts)
//! 3. Errors are enum variants, never String
//! 4. Invalid user *counts* are never errors — they clamp to zero upstream

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core reconciliation errors.
///
/// These cover malformed configuration (denomination tables) and physical
/// impossibilities (taking more units out of a pool than it holds). User
/// counting mistakes are *not* represented here: a short till is a planning
/// outcome, and a garbled count field clamps to zero before reaching the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A denomination table must contain at least one denomination.
    #[error("denomination table is empty")]
    EmptyTable,

    /// Table rows must be strictly descending by face value.
    ///
    /// ## When This Occurs
    /// - A custom table lists $10 before $20
    /// - Two rows share the same face value
    ///
    /// The planner's smallest-single-deposit scan and greedy breakdowns both
    /// rely on this ordering, so it is enforced at construction.
    #[error("denomination table not in descending value order at '{key}'")]
    MisorderedTable { key: String },

    /// Two table rows share a key.
    #[error("duplicate denomination key '{key}'")]
    DuplicateKey { key: String },

    /// A denomination's face value must be positive.
    #[error("denomination '{key}' has non-positive face value {cents}")]
    NonPositiveValue { key: String, cents: i64 },

    /// A count was supplied for a key the table does not define.
    #[error("unknown denomination key '{key}'")]
    UnknownDenomination { key: String },

    /// A pool was asked for more units than it holds.
    ///
    /// ## When This Occurs
    /// Never, in a correct plan — every withdrawal the planner emits is
    /// bounded by the pool's current holding. Surfacing it as a typed error
    /// rather than silently flooring at zero turns an arithmetic bug into a
    /// loud test failure.
    #[error("pool holds {held} × '{key}', cannot remove {requested}")]
    InsufficientUnits {
        key: String,
        held: u32,
        requested: u32,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientUnits {
            key: "n50".to_string(),
            held: 1,
            requested: 2,
        };
        assert_eq!(err.to_string(), "pool holds 1 × 'n50', cannot remove 2");

        let err = CoreError::UnknownDenomination {
            key: "n500".to_string(),
        };
        assert_eq!(err.to_string(), "unknown denomination key 'n500'");
    }

    #[test]
    fn test_table_error_messages() {
        let err = CoreError::MisorderedTable {
            key: "n20".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "denomination table not in descending value order at 'n20'"
        );
    }
}
