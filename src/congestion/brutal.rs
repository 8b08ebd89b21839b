use tracing::{debug, trace};

use crate::{
    constants::{DEFAULT_WINDOW_SLOTS, DISCARDED_SAMPLE_LOG_INTERVAL_MS},
    error::{Error, Result},
    host::HostTransport,
    metrics,
    params::Params,
};

use super::{
    CongestionController, RateSample, ack_rate,
    rate::{self, RateDecision, RateInputs},
    window::SlidingWindow,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ControlPhase {
    #[default]
    Uninitialized,
    Active,
    Terminated,
}

/// Brutal congestion control.
///
/// Sends at a fixed target rate regardless of competing flows. Loss doesn't
/// shrink the window; instead the pacing rate is inflated by the inverse of the
/// recent ack rate, so the delivered rate stays close to the target. cwnd is
/// kept at `rate * rtt * gain`, so it never limits the pacer.
///
/// `SLOTS` is how many seconds of delivery statistics are kept. More slots
/// smooth the ack rate but react slower.
#[derive(Clone, Copy)]
pub struct Brutal<const SLOTS: usize = DEFAULT_WINDOW_SLOTS> {
    phase: ControlPhase,
    initial_params: Params,
    params: Params,
    window: SlidingWindow<SLOTS>,
    ack_rate: u64,
    last_decision: Option<RateDecision>,
}

impl<const SLOTS: usize> core::fmt::Debug for Brutal<SLOTS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "phase={:?},rate={},gain={},ack_rate={}",
            self.phase, self.params.rate, self.params.cwnd_gain, self.ack_rate
        )?;
        if let Some(d) = self.last_decision {
            write!(
                f,
                ",actual_rate={},cwnd={},pacing_rate={}",
                d.actual_rate, d.cwnd, d.pacing_rate
            )?;
        }
        Ok(())
    }
}

// Only the externally visible outcome matters for change tracking, not the window contents.
impl<const SLOTS: usize> PartialEq for Brutal<SLOTS> {
    fn eq(&self, other: &Self) -> bool {
        self.phase == other.phase
            && self.params == other.params
            && self.last_decision == other.last_decision
    }
}

impl<const SLOTS: usize> Default for Brutal<SLOTS> {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl<const SLOTS: usize> Brutal<SLOTS> {
    /// `initial_params` are applied on init, which fails if they are out of range.
    pub fn new(initial_params: Params) -> Self {
        Self {
            phase: ControlPhase::Uninitialized,
            initial_params,
            params: initial_params,
            window: SlidingWindow::new(),
            ack_rate: 100,
            last_decision: None,
        }
    }

    pub fn window(&self) -> &SlidingWindow<SLOTS> {
        &self.window
    }

    pub fn last_decision(&self) -> Option<RateDecision> {
        self.last_decision
    }

    /// Ack rate used for the last decision, in percent.
    pub fn ack_rate(&self) -> u64 {
        self.ack_rate
    }

    fn ensure_active(&self, op: &'static str) -> Result<()> {
        if self.phase != ControlPhase::Active {
            return Err(Error::InvalidState {
                op,
                phase: self.phase,
            });
        }
        Ok(())
    }
}

impl<const SLOTS: usize> CongestionController for Brutal<SLOTS> {
    fn init(&mut self, host: &mut dyn HostTransport) -> Result<()> {
        if self.phase != ControlPhase::Uninitialized {
            return Err(Error::InvalidState {
                op: "init",
                phase: self.phase,
            });
        }
        self.initial_params.validate()?;
        self.params = self.initial_params;
        self.window.reset();
        self.ack_rate = 100;
        self.last_decision = None;
        self.phase = ControlPhase::Active;

        host.request_explicit_pacing();

        debug!(
            rate = self.params.rate,
            cwnd_gain = self.params.cwnd_gain,
            slots = SLOTS,
            "brutal: initialized"
        );
        Ok(())
    }

    fn on_rate_sample(
        &mut self,
        host: &mut dyn HostTransport,
        sample: &RateSample,
    ) -> Result<Option<RateDecision>> {
        self.ensure_active("on_rate_sample")?;

        if !sample.is_valid() {
            metrics::record_discarded_sample();
            trace_every_ms!(
                DISCARDED_SAMPLE_LOG_INTERVAL_MS,
                delivered = sample.delivered,
                interval_us = sample.interval_us,
                "brutal: ignoring invalid rate sample"
            );
            return Ok(None);
        }

        self.window
            .record(sample.now_seconds, sample.acked_sacked, sample.losses);
        let totals = self.window.aggregate(sample.now_seconds);
        self.ack_rate = ack_rate::estimate_totals(&totals);

        let decision = rate::compute(&RateInputs {
            target_rate: self.params.rate,
            ack_rate_percent: self.ack_rate,
            rtt_ms: host.rtt_ms(),
            segment_size: host.segment_size(),
            cwnd_gain: self.params.cwnd_gain,
            cwnd_clamp: host.cwnd_clamp(),
            pacing_cap: host.max_pacing_rate(),
        });

        host.set_cwnd(decision.cwnd);
        host.set_pacing_rate(decision.pacing_rate);
        self.last_decision = Some(decision);

        trace!(
            acked = totals.acked,
            losses = totals.losses,
            ack_rate = self.ack_rate,
            cwnd = decision.cwnd,
            pacing_rate = decision.pacing_rate,
            "brutal: updated rate"
        );
        metrics::record_decision(self.ack_rate, &decision);

        Ok(Some(decision))
    }

    fn on_params_update(&mut self, params: Params) -> Result<()> {
        self.ensure_active("on_params_update")?;
        if let Err(e) = params.validate() {
            metrics::record_params_rejected();
            debug!(?params, "brutal: rejected params: {e:#}");
            return Err(e);
        }
        self.params = params;
        metrics::record_params_update();
        debug!(
            rate = params.rate,
            cwnd_gain = params.cwnd_gain,
            "brutal: params updated"
        );
        Ok(())
    }

    fn teardown(&mut self) {
        if self.phase == ControlPhase::Terminated {
            return;
        }
        self.phase = ControlPhase::Terminated;
        self.window.reset();
        self.last_decision = None;
        debug!("brutal: terminated");
    }

    fn phase(&self) -> ControlPhase {
        self.phase
    }

    fn params(&self) -> Option<Params> {
        Some(self.params)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        congestion::{CongestionController, RateSample, rate::RateDecision},
        constants::INFINITE_SSTHRESH,
        error::Error,
        params::Params,
        test_util::{MockHost, setup_test_logging},
    };

    use super::{Brutal, ControlPhase};

    const T0: u64 = 1_700_000_000;

    fn sample(now_seconds: u64, acked_sacked: u32, losses: u32) -> RateSample {
        RateSample {
            delivered: acked_sacked as i32,
            interval_us: 10_000,
            acked_sacked,
            losses,
            now_seconds,
        }
    }

    fn active() -> (Brutal, MockHost) {
        setup_test_logging();
        let mut host = MockHost::default();
        let mut b: Brutal = Brutal::default();
        b.init(&mut host).unwrap();
        (b, host)
    }

    #[test]
    fn test_init() {
        let (b, host) = active();
        assert_eq!(b.phase(), ControlPhase::Active);
        assert_eq!(b.params(), Some(Params::new(125_000, 20)));
        assert!(host.explicit_pacing_requested());
        assert_eq!(b.window().slots().count(), 0);
        assert_eq!(b.ssthresh(), INFINITE_SSTHRESH);
    }

    #[test]
    fn test_init_twice_rejected() {
        let (mut b, mut host) = active();
        assert!(matches!(
            b.init(&mut host),
            Err(Error::InvalidState { op: "init", .. })
        ));
    }

    #[test]
    fn test_sample_before_init_rejected() {
        let mut host = MockHost::default();
        let mut b: Brutal = Brutal::default();
        assert_eq!(
            b.on_rate_sample(&mut host, &sample(T0, 1, 0)),
            Err(Error::InvalidState {
                op: "on_rate_sample",
                phase: ControlPhase::Uninitialized
            })
        );
        assert!(b.on_params_update(Params::default()).is_err());
    }

    #[test]
    fn test_sample_pushes_cwnd_and_pacing() {
        let (mut b, host) = active();
        let mut h = host.clone();
        let decision = b.on_rate_sample(&mut h, &sample(T0, 10, 0)).unwrap();
        assert_eq!(
            decision,
            Some(RateDecision {
                actual_rate: 125_000,
                cwnd: 4,
                pacing_rate: 125_000
            })
        );
        assert_eq!(host.cwnd_history(), vec![4]);
        assert_eq!(host.pacing_history(), vec![125_000]);
    }

    #[test]
    fn test_loss_inflates_pacing_rate() {
        let (mut b, mut host) = active();
        b.on_params_update(Params::new(1_000_000, 20)).unwrap();

        // 10% loss over enough samples.
        for i in 0..10 {
            b.on_rate_sample(&mut host, &sample(T0 + i % 2, 9, 1))
                .unwrap();
        }
        assert_eq!(b.ack_rate(), 90);
        // 1_000_000 * 100 / 90
        assert_eq!(host.last_pacing_rate(), Some(1_111_111));

        // Heavy loss hits the 80% floor.
        for _ in 0..10 {
            b.on_rate_sample(&mut host, &sample(T0 + 2, 1, 20)).unwrap();
        }
        assert_eq!(b.ack_rate(), 80);
        assert_eq!(host.last_pacing_rate(), Some(1_250_000));
    }

    #[test]
    fn test_loss_ages_out() {
        let (mut b, mut host) = active();
        b.on_rate_sample(&mut host, &sample(T0, 40, 60)).unwrap();
        assert_eq!(b.ack_rate(), 80);

        // Window is 5 seconds, T0 is out of it at T0 + 6.
        b.on_rate_sample(&mut host, &sample(T0 + 6, 100, 0)).unwrap();
        assert_eq!(b.ack_rate(), 100);
        assert_eq!(host.last_pacing_rate(), Some(125_000));
    }

    #[test]
    fn test_invalid_sample_is_discarded() {
        let (mut b, mut host) = active();
        b.on_rate_sample(&mut host, &sample(T0, 10, 0)).unwrap();
        let window_before = *b.window();
        let before = b.last_decision();

        for bad in [
            RateSample {
                interval_us: 0,
                ..sample(T0, 1000, 1000)
            },
            RateSample {
                interval_us: -5,
                ..sample(T0, 1000, 1000)
            },
            RateSample {
                delivered: -1,
                ..sample(T0, 1000, 1000)
            },
        ] {
            assert_eq!(b.on_rate_sample(&mut host, &bad), Ok(None));
        }

        assert_eq!(*b.window(), window_before);
        assert_eq!(b.last_decision(), before);
        assert_eq!(host.cwnd_history().len(), 1);
        assert_eq!(host.pacing_history().len(), 1);
    }

    #[test]
    fn test_params_validation() {
        let (mut b, _host) = active();
        let before = b.params();

        assert!(matches!(
            b.on_params_update(Params::new(62_499, 20)),
            Err(Error::RateTooLow { .. })
        ));
        assert!(matches!(
            b.on_params_update(Params::new(1_000_000, 81)),
            Err(Error::CwndGainOutOfRange { .. })
        ));
        assert_eq!(b.params(), before);

        b.on_params_update(Params::new(62_500, 80)).unwrap();
        assert_eq!(b.params(), Some(Params::new(62_500, 80)));
    }

    #[test]
    fn test_gain_scales_cwnd() {
        let (mut b, mut host) = active();
        host.set_link(100, 1000);
        b.on_params_update(Params::new(1_000_000, 10)).unwrap();
        let d1 = b.on_rate_sample(&mut host, &sample(T0, 1, 0)).unwrap().unwrap();
        b.on_params_update(Params::new(1_000_000, 40)).unwrap();
        let d4 = b.on_rate_sample(&mut host, &sample(T0, 1, 0)).unwrap().unwrap();
        // 1000 * 100 / 1000 * gain / 10
        assert_eq!(d1.cwnd, 100);
        assert_eq!(d4.cwnd, 400);
    }

    #[test]
    fn test_host_limits_respected() {
        let (mut b, mut host) = active();
        host.set_link(200, 1000);
        host.set_limits(50, 500_000);
        b.on_params_update(Params::new(10_000_000, 20)).unwrap();
        let d = b.on_rate_sample(&mut host, &sample(T0, 1, 0)).unwrap().unwrap();
        assert_eq!(d.cwnd, 50);
        assert_eq!(d.pacing_rate, 500_000);
        assert_eq!(d.actual_rate, 10_000_000);
    }

    #[test]
    fn test_undo_cwnd_returns_host_cwnd() {
        let (mut b, mut host) = active();
        b.on_rate_sample(&mut host, &sample(T0, 1, 0)).unwrap();
        assert_eq!(b.undo_cwnd(&host), 4);
    }

    #[test]
    fn test_teardown() {
        let (mut b, mut host) = active();
        b.teardown();
        assert_eq!(b.phase(), ControlPhase::Terminated);
        assert!(matches!(
            b.on_rate_sample(&mut host, &sample(T0, 1, 0)),
            Err(Error::InvalidState {
                phase: ControlPhase::Terminated,
                ..
            })
        ));
        assert!(matches!(
            b.on_params_update(Params::default()),
            Err(Error::InvalidState { .. })
        ));
        assert!(b.init(&mut host).is_err());
        // Idempotent.
        b.teardown();
        assert_eq!(b.phase(), ControlPhase::Terminated);
    }

    #[test]
    fn test_invalid_initial_params_never_activate() {
        let mut host = MockHost::default();
        let mut b = Brutal::<5>::new(Params::new(0, 0));
        assert!(matches!(b.init(&mut host), Err(Error::RateTooLow { .. })));
        assert_eq!(b.phase(), ControlPhase::Uninitialized);
        assert!(!host.explicit_pacing_requested());
        assert!(matches!(
            b.on_rate_sample(&mut host, &sample(T0, 1, 0)),
            Err(Error::InvalidState { .. })
        ));
        assert!(host.pacing_history().is_empty());

        let mut b = Brutal::<5>::new(Params::new(125_000, 81));
        assert!(matches!(
            b.init(&mut host),
            Err(Error::CwndGainOutOfRange { .. })
        ));
        assert_eq!(b.phase(), ControlPhase::Uninitialized);
    }

    #[test]
    fn test_custom_initial_params() {
        let mut host = MockHost::default();
        let mut b = Brutal::<3>::new(Params::new(250_000, 15));
        b.init(&mut host).unwrap();
        assert_eq!(b.params(), Some(Params::new(250_000, 15)));
        assert_eq!(b.window().capacity(), 3);
    }
}
