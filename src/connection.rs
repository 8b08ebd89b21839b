use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    config::CongestionConfig,
    congestion::{CongestionController, RateSample, brutal::ControlPhase, rate::RateDecision},
    error::{Error, Result},
    host::HostTransport,
    params::{Params, is_params_option},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOutcome {
    /// The option carried params and was applied.
    Handled,
    /// Not ours; the transport should apply its regular option handling.
    PassThrough,
}

struct ConnectionInner<H> {
    host: H,
    controller: Box<dyn CongestionController>,
}

/// Congestion control attached to one transport connection.
///
/// ACK processing and the control plane may call in from different threads;
/// a single lock serializes both paths so the controller only ever has one writer.
pub struct Connection<H: HostTransport> {
    inner: Mutex<ConnectionInner<H>>,
}

impl<H: HostTransport> Connection<H> {
    /// Creates the controller described by `config` and initializes it against `host`.
    pub fn new(mut host: H, config: &CongestionConfig) -> Result<Self> {
        let mut controller = config.create()?;
        controller.init(&mut host)?;
        Ok(Self {
            inner: Mutex::new(ConnectionInner { host, controller }),
        })
    }

    /// Feeds a delivery-rate sample. Returns None if it was discarded.
    pub fn on_rate_sample(&self, sample: &RateSample) -> Result<Option<RateDecision>> {
        let mut g = self.inner.lock();
        let ConnectionInner { host, controller } = &mut *g;
        controller.on_rate_sample(host, sample)
    }

    pub fn on_params_update(&self, params: Params) -> Result<()> {
        self.inner.lock().controller.on_params_update(params)
    }

    /// Routes a socket option. Params options are decoded and applied, anything
    /// else is left to the transport. A params option on a connection that is
    /// not active fails with `InvalidState` whatever the buffer holds.
    pub fn set_option(&self, level: i32, optname: i32, optval: &[u8]) -> Result<OptionOutcome> {
        if !is_params_option(level, optname) {
            trace!(level, optname, "passing through socket option");
            return Ok(OptionOutcome::PassThrough);
        }
        let mut g = self.inner.lock();
        let phase = g.controller.phase();
        if phase != ControlPhase::Active {
            return Err(Error::InvalidState {
                op: "set_option",
                phase,
            });
        }
        let params = match Params::decode(optval) {
            Ok(p) => p,
            Err(e) => {
                debug!(len = optval.len(), "rejected params option: {e:#}");
                return Err(e);
            }
        };
        g.controller.on_params_update(params)?;
        Ok(OptionOutcome::Handled)
    }

    pub fn cwnd(&self) -> u32 {
        let g = self.inner.lock();
        g.controller.undo_cwnd(&g.host)
    }

    pub fn ssthresh(&self) -> u32 {
        self.inner.lock().controller.ssthresh()
    }

    pub fn params(&self) -> Option<Params> {
        self.inner.lock().controller.params()
    }

    pub fn phase(&self) -> ControlPhase {
        self.inner.lock().controller.phase()
    }

    pub fn teardown(&self) {
        self.inner.lock().controller.teardown();
    }

    /// Runs `f` with the transport while holding the connection lock.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.inner.lock().host)
    }
}

impl<H: HostTransport> Drop for Connection<H> {
    fn drop(&mut self) {
        self.inner.get_mut().controller.teardown();
    }
}
