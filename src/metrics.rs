use crate::congestion::rate::RateDecision;

#[cfg(feature = "export-metrics")]
mod export {
    use lazy_static::lazy_static;
    use metrics::{Counter, Gauge, counter, gauge};

    pub struct Metrics {
        pub rate_samples: Counter,
        pub rate_samples_discarded: Counter,
        pub params_updates: Counter,
        pub params_rejected: Counter,
        pub last_ack_rate: Gauge,
        pub last_cwnd: Gauge,
        pub last_pacing_rate: Gauge,
    }

    impl Metrics {
        pub fn new() -> Self {
            Self {
                rate_samples: counter!("brutal_rate_samples"),
                rate_samples_discarded: counter!("brutal_rate_samples_discarded"),
                params_updates: counter!("brutal_params_updates"),
                params_rejected: counter!("brutal_params_rejected"),
                last_ack_rate: gauge!("brutal_last_ack_rate"),
                last_cwnd: gauge!("brutal_last_cwnd"),
                last_pacing_rate: gauge!("brutal_last_pacing_rate"),
            }
        }
    }

    lazy_static! {
        pub static ref METRICS: Metrics = Metrics::new();
    }
}

#[cfg(feature = "export-metrics")]
pub use export::METRICS;

#[allow(unused_variables)]
pub fn record_decision(ack_rate: u64, decision: &RateDecision) {
    #[cfg(feature = "export-metrics")]
    {
        METRICS.rate_samples.increment(1);
        METRICS.last_ack_rate.set(ack_rate as f64);
        METRICS.last_cwnd.set(decision.cwnd as f64);
        METRICS.last_pacing_rate.set(decision.pacing_rate as f64);
    }
}

pub fn record_discarded_sample() {
    #[cfg(feature = "export-metrics")]
    METRICS.rate_samples_discarded.increment(1);
}

pub fn record_params_update() {
    #[cfg(feature = "export-metrics")]
    METRICS.params_updates.increment(1);
}

pub fn record_params_rejected() {
    #[cfg(feature = "export-metrics")]
    METRICS.params_rejected.increment(1);
}
