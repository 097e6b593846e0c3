//! Order number allocation
//!
//! Order numbers are human-readable sequential identifiers of the form
//! `ORD-<n>`. The next number is always computed from the most
//! recently created order (by creation time, not maximum value): strip
//! the prefix, parse the integer, increment. A missing or malformed
//! predecessor falls back to the baseline, so the first order in an
//! empty store is `ORD-101`.
//!
//! Allocation runs inside `OrderRepository::create`. Two concurrent
//! creations can both read the same latest order; the unique index on
//! `order_number` rejects the second insert and the repository retries
//! with a fresh read, up to [`MAX_ALLOCATION_ATTEMPTS`] times.

/// Order number prefix
pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Baseline when no prior (or no parseable) order number exists;
/// the first allocated number is baseline + 1.
pub const BASELINE_ORDER_NUMBER: u64 = 100;

/// Upper bound on insert attempts when racing other creations.
/// Each conflict means another create committed in between, so a
/// creator racing N others needs at most N attempts.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 8;

/// Parse the numeric part of an order number ("ORD-137" -> 137)
pub fn parse_order_number(number: &str) -> Option<u64> {
    number.strip_prefix(ORDER_NUMBER_PREFIX)?.parse().ok()
}

/// Compute the next order number from the latest persisted one
pub fn next_order_number(latest: Option<&str>) -> String {
    next_order_number_after(latest, BASELINE_ORDER_NUMBER)
}

/// Like [`next_order_number`], but never goes below `floor + 1`
///
/// The retry loop raises `floor` to the number that just conflicted:
/// the conflict proves that number is taken, even when creation-time
/// ties make the latest-order read ambiguous. Since the floor only
/// ever rises to a committed number, the sequence stays gap-free.
pub fn next_order_number_after(latest: Option<&str>, floor: u64) -> String {
    let last = latest
        .and_then(parse_order_number)
        .unwrap_or(BASELINE_ORDER_NUMBER);
    format!("{ORDER_NUMBER_PREFIX}{}", last.max(floor) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_order_starts_at_101() {
        assert_eq!(next_order_number(None), "ORD-101");
    }

    #[test]
    fn increments_latest_number() {
        assert_eq!(next_order_number(Some("ORD-137")), "ORD-138");
        assert_eq!(next_order_number(Some("ORD-101")), "ORD-102");
    }

    #[test]
    fn malformed_latest_falls_back_to_baseline() {
        assert_eq!(next_order_number(Some("")), "ORD-101");
        assert_eq!(next_order_number(Some("ORD-")), "ORD-101");
        assert_eq!(next_order_number(Some("ORD-abc")), "ORD-101");
        assert_eq!(next_order_number(Some("137")), "ORD-101");
    }

    #[test]
    fn parses_valid_numbers_only() {
        assert_eq!(parse_order_number("ORD-42"), Some(42));
        assert_eq!(parse_order_number("ord-42"), None);
        assert_eq!(parse_order_number("ORD-4x2"), None);
    }

    #[test]
    fn conflict_floor_overrides_a_stale_read() {
        // Latest read is stale (tie on creation time) but ORD-105 just
        // conflicted, so the next attempt must go past it.
        assert_eq!(next_order_number_after(Some("ORD-104"), 105), "ORD-106");
        // No conflicts yet: floor at baseline is a no-op.
        assert_eq!(next_order_number_after(Some("ORD-137"), 100), "ORD-138");
        assert_eq!(next_order_number_after(None, 100), "ORD-101");
    }
}
