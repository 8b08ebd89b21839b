use crate::{
    constants::{
        DEFAULT_CWND_GAIN, DEFAULT_RATE, MAX_CWND_GAIN, MIN_CWND_GAIN, MIN_RATE, PARAMS_WIRE_LEN,
        TCP_BRUTAL_PARAMS,
    },
    error::{Error, Result},
};

/// Target rate and cwnd gain, as set by the control plane.
///
/// On the wire this is a packed little-endian record:
///
/// | offset | field     | type |
/// |--------|-----------|------|
/// | 0      | rate      | u64  |
/// | 8      | cwnd_gain | u32  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Send rate in bytes per second.
    pub rate: u64,
    /// cwnd gain in tenths (10 == 1.0x).
    pub cwnd_gain: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            cwnd_gain: DEFAULT_CWND_GAIN,
        }
    }
}

impl Params {
    pub fn new(rate: u64, cwnd_gain: u32) -> Self {
        Self { rate, cwnd_gain }
    }

    /// Rate given in megabits per second.
    pub fn from_mbps(mbps: u64, cwnd_gain: u32) -> Self {
        Self {
            rate: mbps.saturating_mul(1_000_000) / 8,
            cwnd_gain,
        }
    }

    /// Decodes the first 12 bytes of `buf`. Trailing bytes are ignored.
    ///
    /// This doesn't validate; use [`Params::decode_validated`] for that.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let Some((record, _)) = buf.split_first_chunk::<PARAMS_WIRE_LEN>() else {
            return Err(Error::ParamsTooShort {
                len: buf.len(),
                need: PARAMS_WIRE_LEN,
            });
        };
        let mut rate = [0u8; 8];
        rate.copy_from_slice(&record[..8]);
        let mut cwnd_gain = [0u8; 4];
        cwnd_gain.copy_from_slice(&record[8..]);
        Ok(Self {
            rate: u64::from_le_bytes(rate),
            cwnd_gain: u32::from_le_bytes(cwnd_gain),
        })
    }

    pub fn decode_validated(buf: &[u8]) -> Result<Self> {
        let params = Self::decode(buf)?;
        params.validate()?;
        Ok(params)
    }

    pub fn encode(&self) -> [u8; PARAMS_WIRE_LEN] {
        let mut buf = [0u8; PARAMS_WIRE_LEN];
        buf[..8].copy_from_slice(&self.rate.to_le_bytes());
        buf[8..].copy_from_slice(&self.cwnd_gain.to_le_bytes());
        buf
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate < MIN_RATE {
            return Err(Error::RateTooLow {
                rate: self.rate,
                min: MIN_RATE,
            });
        }
        if !(MIN_CWND_GAIN..=MAX_CWND_GAIN).contains(&self.cwnd_gain) {
            return Err(Error::CwndGainOutOfRange {
                cwnd_gain: self.cwnd_gain,
                min: MIN_CWND_GAIN,
                max: MAX_CWND_GAIN,
            });
        }
        Ok(())
    }
}

/// Whether a socket option addresses the params channel.
pub fn is_params_option(level: i32, optname: i32) -> bool {
    level == libc::IPPROTO_TCP && optname == TCP_BRUTAL_PARAMS
}
