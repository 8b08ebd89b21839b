use crate::constants::{DEFAULT_WINDOW_SLOTS, MAX_WINDOW_SLOTS, MIN_WINDOW_SLOTS};

/// Delivery statistics for one second.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub epoch_seconds: u64,
    pub acked: u32,
    pub losses: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub acked: u64,
    pub losses: u64,
}

/// Fixed ring of per-second delivery statistics, indexed by `epoch_seconds % SLOTS`.
///
/// There is no expiry sweep. A slot is reused when a later second maps to the
/// same index: if the stored second matches, the deltas accumulate, otherwise
/// the slot is overwritten. Stale slots are skipped when aggregating.
///
/// Slots that were never written are `None`, so the window is correct right
/// after init no matter how small the clock value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindow<const SLOTS: usize = DEFAULT_WINDOW_SLOTS> {
    slots: [Option<Slot>; SLOTS],
}

impl<const SLOTS: usize> Default for SlidingWindow<SLOTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOTS: usize> SlidingWindow<SLOTS> {
    const CAPACITY_CHECK: () = assert!(
        SLOTS >= MIN_WINDOW_SLOTS && SLOTS <= MAX_WINDOW_SLOTS,
        "window capacity must be within [3, 5] slots"
    );

    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_CHECK;
        Self {
            slots: [None; SLOTS],
        }
    }

    pub const fn capacity(&self) -> usize {
        SLOTS
    }

    pub fn reset(&mut self) {
        self.slots = [None; SLOTS];
    }

    pub fn record(&mut self, epoch_seconds: u64, acked_delta: u32, loss_delta: u32) {
        let idx = (epoch_seconds % SLOTS as u64) as usize;
        match &mut self.slots[idx] {
            Some(slot) if slot.epoch_seconds == epoch_seconds => {
                slot.acked = slot.acked.saturating_add(acked_delta);
                slot.losses = slot.losses.saturating_add(loss_delta);
            }
            other => {
                *other = Some(Slot {
                    epoch_seconds,
                    acked: acked_delta,
                    losses: loss_delta,
                });
            }
        }
    }

    /// Sums slots whose second falls within `[now_seconds - SLOTS, now_seconds]`.
    pub fn aggregate(&self, now_seconds: u64) -> Totals {
        let min_seconds = now_seconds.saturating_sub(SLOTS as u64);
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.epoch_seconds >= min_seconds && s.epoch_seconds <= now_seconds)
            .fold(Totals::default(), |acc, s| Totals {
                acked: acc.acked + s.acked as u64,
                losses: acc.losses + s.losses as u64,
            })
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.slots.iter().flatten()
    }
}
