//! # Delivery Estimator
//!
//! Maps an order's size and value to a simulated delivery duration.
//!
//! Every order takes at least [`BASE_DELIVERY`]. Up to [`MAX_ADDITIONAL`] more
//! is added, weighted half by item count (saturating at 10 items) and half by
//! total cost (saturating at $1000). The result is always between 10 and 20
//! minutes.

use std::time::Duration;

pub const BASE_DELIVERY: Duration = Duration::from_secs(10 * 60);
pub const MAX_ADDITIONAL: Duration = Duration::from_secs(10 * 60);

const MAX_ITEMS: f64 = 10.0;
const MAX_COST: f64 = 1000.0;
const ITEM_WEIGHT: f64 = 0.5;
const COST_WEIGHT: f64 = 0.5;

/// Delivery duration for an order of `item_count` items costing `total_cost`.
pub fn estimate(item_count: u32, total_cost: f64) -> Duration {
    let items = normalize(f64::from(item_count), MAX_ITEMS);
    let cost = normalize(total_cost, MAX_COST);
    let factor = ITEM_WEIGHT * items + COST_WEIGHT * cost;
    BASE_DELIVERY + Duration::from_secs_f64(MAX_ADDITIONAL.as_secs_f64() * factor)
}

/// `value / max` clamped to `[0, 1]`; NaN counts as zero.
fn normalize(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Duration = Duration::from_secs(10 * 60);
    const MAX: Duration = Duration::from_secs(20 * 60);

    fn assert_close(actual: Duration, expected: Duration) {
        let diff = actual.as_secs_f64() - expected.as_secs_f64();
        assert!(diff.abs() < 1e-6, "expected {expected:?}, got {actual:?}");
    }

    #[test]
    fn empty_order_takes_the_base_time() {
        assert_eq!(estimate(0, 0.0), MIN);
    }

    #[test]
    fn saturated_order_takes_the_maximum() {
        assert_eq!(estimate(10, 1000.0), MAX);
        assert_eq!(estimate(500, 1_000_000.0), MAX);
    }

    #[test]
    fn small_order_adds_a_small_delta() {
        // 2 items -> 0.2, $40 -> 0.04, weighted 0.12 of ten minutes
        assert_close(estimate(2, 40.0), MIN + Duration::from_secs(72));
    }

    #[test]
    fn each_factor_carries_half_the_weight() {
        assert_close(estimate(10, 0.0), Duration::from_secs(15 * 60));
        assert_close(estimate(0, 1000.0), Duration::from_secs(15 * 60));
    }

    #[test]
    fn out_of_range_costs_are_clamped() {
        assert_eq!(estimate(0, -250.0), MIN);
        assert_eq!(estimate(0, f64::NAN), MIN);
        assert_eq!(estimate(10, f64::INFINITY), MAX);
    }

    #[test]
    fn always_within_bounds() {
        for items in [0, 1, 3, 7, 10, 11, 1000] {
            for cost in [0.0, 0.01, 99.5, 640.0, 999.99, 1000.0, 5000.0] {
                let d = estimate(items, cost);
                assert!(d >= MIN && d <= MAX, "estimate({items}, {cost}) = {d:?}");
                assert_eq!(d, estimate(items, cost), "estimate must be deterministic");
            }
        }
    }
}
