use crate::{
    constants::CONGESTION_TRACING_LOG_LEVEL, error::Result, host::HostTransport, params::Params,
};

use super::{CongestionController, RateSample, brutal::ControlPhase, rate::RateDecision};

/// Logs the inner controller's state whenever a hook changes it.
#[derive(Debug)]
pub struct TracingController<I> {
    inner: I,
}

impl<I> TracingController<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I> CongestionController for TracingController<I>
where
    I: CongestionController + PartialEq + Copy + 'static,
{
    fn init(&mut self, host: &mut dyn HostTransport) -> Result<()> {
        log_if_changed!(
            CONGESTION_TRACING_LOG_LEVEL,
            "init",
            self,
            |s| s.inner,
            |s| s.inner.init(host)
        )
    }

    fn on_rate_sample(
        &mut self,
        host: &mut dyn HostTransport,
        sample: &RateSample,
    ) -> Result<Option<RateDecision>> {
        log_every_ms_if_changed!(
            500,
            CONGESTION_TRACING_LOG_LEVEL,
            "on_rate_sample",
            self,
            |s| s.inner,
            |s| s.inner.on_rate_sample(host, sample)
        )
    }

    fn on_params_update(&mut self, params: Params) -> Result<()> {
        log_if_changed!(
            CONGESTION_TRACING_LOG_LEVEL,
            "on_params_update",
            self,
            |s| s.inner,
            |s| s.inner.on_params_update(params)
        )
    }

    fn undo_cwnd(&self, host: &dyn HostTransport) -> u32 {
        self.inner.undo_cwnd(host)
    }

    fn ssthresh(&self) -> u32 {
        self.inner.ssthresh()
    }

    fn teardown(&mut self) {
        log_if_changed!(
            CONGESTION_TRACING_LOG_LEVEL,
            "teardown",
            self,
            |s| s.inner,
            |s| s.inner.teardown()
        )
    }

    fn phase(&self) -> ControlPhase {
        self.inner.phase()
    }

    fn params(&self) -> Option<Params> {
        self.inner.params()
    }
}
