pub mod ack_rate;
pub mod brutal;
pub mod rate;
pub mod tracing;
pub mod window;

use crate::{
    constants::{INFINITE_SSTHRESH, USEC_PER_SEC},
    error::Result,
    host::HostTransport,
    params::Params,
};

use self::{brutal::ControlPhase, rate::RateDecision};

/// A delivery-rate sample, emitted by the transport per batch of ACKs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RateSample {
    /// Packets delivered over the interval. Negative if unknown.
    pub delivered: i32,
    /// Measurement interval in microseconds. Non-positive if unknown.
    pub interval_us: i64,
    /// Packets newly acked or sacked by this batch.
    pub acked_sacked: u32,
    /// Packets newly marked lost by this batch.
    pub losses: u32,
    /// Wall clock seconds. Must be larger than the window capacity.
    pub now_seconds: u64,
}

impl RateSample {
    pub fn now_seconds_from_micros(now_us: u64) -> u64 {
        now_us / USEC_PER_SEC
    }

    pub fn is_valid(&self) -> bool {
        self.delivered >= 0 && self.interval_us > 0
    }
}

/// Per-connection congestion control strategy.
///
/// Selected when the connection is set up (see [`crate::CongestionConfig`]) and
/// driven by the transport through these hooks.
pub trait CongestionController: Send + Sync + core::fmt::Debug {
    fn init(&mut self, host: &mut dyn HostTransport) -> Result<()>;

    /// Returns None if the sample was discarded.
    fn on_rate_sample(
        &mut self,
        host: &mut dyn HostTransport,
        sample: &RateSample,
    ) -> Result<Option<RateDecision>>;

    fn on_params_update(&mut self, params: Params) -> Result<()>;

    /// cwnd to restore after a spurious loss event. Brutal never cuts it, so it's the current one.
    fn undo_cwnd(&self, host: &dyn HostTransport) -> u32 {
        host.cwnd()
    }

    fn ssthresh(&self) -> u32 {
        INFINITE_SSTHRESH
    }

    fn teardown(&mut self);

    fn phase(&self) -> ControlPhase;

    /// Currently configured params, if the controller has any.
    fn params(&self) -> Option<Params> {
        None
    }
}
