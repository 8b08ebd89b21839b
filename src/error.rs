use crate::congestion::brutal::ControlPhase;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("params buffer too short: {len} bytes, need {need}")]
    ParamsTooShort { len: usize, need: usize },

    #[error("rate {rate} bytes/s is below minimum {min}")]
    RateTooLow { rate: u64, min: u64 },

    #[error("cwnd_gain {cwnd_gain} out of range [{min}, {max}]")]
    CwndGainOutOfRange { cwnd_gain: u32, min: u32, max: u32 },

    #[error("{op} is not allowed in phase {phase:?}")]
    InvalidState {
        op: &'static str,
        phase: ControlPhase,
    },
}

impl Error {
    /// True for errors produced by rejecting a params update.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::ParamsTooShort { .. }
                | Error::RateTooLow { .. }
                | Error::CwndGainOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
