//! # Validation Module
//!
//! Input normalization for counted quantities.
//!
//! ## Normalization Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Count Input Handling                                │
//! │                                                                         │
//! │  Layer 1: Host (form field, file, API payload)                         │
//! │  ├── Free-form text from a tired cashier                               │
//! │  └── THIS MODULE: normalize to a non-negative quantity                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: RawCounts::resolve                                            │
//! │  ├── Clamps any remaining negatives                                    │
//! │  └── Rejects unknown denomination keys (host/table mismatch)           │
//! │                                                                         │
//! │  A bad COUNT is never an error. "12x", "", "-3" all mean zero: the     │
//! │  row just shows Short and the cashier recounts. Stopping the whole     │
//! │  cash-up over one garbled field helps nobody.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Count Normalizers
// =============================================================================

/// Normalizes a free-form count field to a quantity.
///
/// Trims whitespace, parses as an integer, clamps negatives to zero.
/// Anything unparseable is zero.
///
/// ## Example
/// ```rust
/// use till_core::validation::normalize_count;
///
/// assert_eq!(normalize_count(" 12 "), 12);
/// assert_eq!(normalize_count(""), 0);
/// assert_eq!(normalize_count("-3"), 0);
/// assert_eq!(normalize_count("ten"), 0);
/// ```
pub fn normalize_count(raw: &str) -> u32 {
    raw.trim().parse::<i64>().map_or(0, normalize_quantity)
}

/// Clamps a signed quantity to the valid non-negative range.
///
/// Quantities beyond `u32::MAX` cannot occur in a physical till; they clamp
/// rather than wrap.
pub fn normalize_quantity(quantity: i64) -> u32 {
    quantity.clamp(0, u32::MAX as i64) as u32
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_count() {
        assert_eq!(normalize_count("12"), 12);
        assert_eq!(normalize_count("  7  "), 7);
        assert_eq!(normalize_count("0"), 0);

        // Garbage and negatives are zero, never errors.
        assert_eq!(normalize_count(""), 0);
        assert_eq!(normalize_count("   "), 0);
        assert_eq!(normalize_count("-3"), 0);
        assert_eq!(normalize_count("12x"), 0);
        assert_eq!(normalize_count("3.5"), 0);
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(5), 5);
        assert_eq!(normalize_quantity(0), 0);
        assert_eq!(normalize_quantity(-10), 0);
        assert_eq!(normalize_quantity(i64::MAX), u32::MAX);
    }
}
