use crate::constants::{MIN_ACK_RATE_PERCENT, MIN_ACK_RATE_SAMPLES};

use super::window::Totals;

/// Percentage (0-100) of recent packets that were acked rather than lost.
///
/// Too few samples count as perfect delivery. The result never drops below
/// [`MIN_ACK_RATE_PERCENT`].
pub fn estimate(acked_total: u64, losses_total: u64) -> u64 {
    let total = acked_total as u128 + losses_total as u128;
    if total < MIN_ACK_RATE_SAMPLES as u128 {
        return 100;
    }
    let rate = (acked_total as u128 * 100 / total) as u64;
    rate.max(MIN_ACK_RATE_PERCENT)
}

pub fn estimate_totals(totals: &Totals) -> u64 {
    estimate(totals.acked, totals.losses)
}
