use crate::constants::USEC_PER_MSEC;

/// What the congestion controller needs from the transport it's attached to.
///
/// The transport owns cwnd and the pacing rate; the controller only reads the
/// link state and pushes new values.
pub trait HostTransport: Send {
    /// Current congestion window, in segments.
    fn cwnd(&self) -> u32;
    fn set_cwnd(&mut self, cwnd: u32);

    /// Bytes per second.
    fn set_pacing_rate(&mut self, rate: u64);

    /// Upper bound for cwnd, in segments.
    fn cwnd_clamp(&self) -> u32;

    /// Upper bound for the pacing rate, bytes per second.
    fn max_pacing_rate(&self) -> u64;

    /// Smoothed RTT. May be 0 before the first measurement.
    fn rtt_ms(&self) -> u32;

    /// Maximum segment size.
    fn segment_size(&self) -> u32;

    /// Tell the transport to pace according to `set_pacing_rate` instead of
    /// its own default policy. Must be idempotent.
    fn request_explicit_pacing(&mut self);
}

/// Converts a smoothed RTT kept as microseconds << 3 (like Linux srtt_us) to milliseconds.
pub fn srtt_to_rtt_ms(srtt_us_scaled: u32) -> u32 {
    (srtt_us_scaled >> 3) / USEC_PER_MSEC
}
