use crate::constants::{MIN_CWND, MSEC_PER_SEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateInputs {
    /// Bytes per second the user asked for.
    pub target_rate: u64,
    pub ack_rate_percent: u64,
    pub rtt_ms: u32,
    pub segment_size: u32,
    /// Tenths, 20 == 2.0x.
    pub cwnd_gain: u32,
    pub cwnd_clamp: u32,
    pub pacing_cap: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Target rate inflated by the measured loss.
    pub actual_rate: u64,
    /// In segments.
    pub cwnd: u32,
    pub pacing_rate: u64,
}

/// Maps the target rate and the current ack rate to a pacing rate and cwnd.
///
/// The rate is divided by the ack rate so that the rate that actually gets
/// delivered approaches the target under loss. cwnd is the bandwidth-delay
/// product in segments scaled by the gain.
pub fn compute(inputs: &RateInputs) -> RateDecision {
    let ack_rate = inputs.ack_rate_percent.max(1);
    let actual_rate = inputs.target_rate.saturating_mul(100) / ack_rate;

    let rtt_ms = inputs.rtt_ms.max(1) as u64;

    let cwnd = if inputs.segment_size == 0 {
        MIN_CWND as u64
    } else {
        // Keep this order: divide as early as possible to keep the intermediates small.
        let mut cwnd = actual_rate / MSEC_PER_SEC;
        cwnd = cwnd.saturating_mul(rtt_ms);
        cwnd /= inputs.segment_size as u64;
        cwnd = cwnd.saturating_mul(inputs.cwnd_gain as u64);
        cwnd / 10
    };
    let cwnd = cwnd
        .max(MIN_CWND as u64)
        .min(inputs.cwnd_clamp as u64) as u32;

    RateDecision {
        actual_rate,
        cwnd,
        pacing_rate: actual_rate.min(inputs.pacing_cap),
    }
}
