//! Brutal congestion control.
//!
//! A rate-based controller: the user picks a send rate and a cwnd gain, and
//! the controller paces at that rate, compensating for recent loss by sending
//! proportionally faster. It doesn't back off on loss and has no slow start.
//!
//! The transport plugs in through [`HostTransport`] and drives the controller
//! with [`RateSample`]s, usually via a [`Connection`].

#[macro_use]
mod macros;

mod config;
pub mod congestion;
mod connection;
pub mod constants;
mod error;
mod host;
mod metrics;
mod params;
#[cfg(test)]
mod test_util;
mod utils;

pub use config::{BrutalConfig, CongestionConfig, CongestionControllerKind, WindowSlots};
pub use congestion::{
    CongestionController, RateSample,
    brutal::{Brutal, ControlPhase},
    rate::RateDecision,
};
pub use connection::{Connection, OptionOutcome};
pub use error::{Error, Result};
pub use host::{HostTransport, srtt_to_rtt_ms};
pub use params::{Params, is_params_option};
