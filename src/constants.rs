use tracing::Level;

// Defaults applied on init, unless overridden by BrutalConfig.
pub const DEFAULT_RATE: u64 = 125_000; // 1 Mbps
pub const DEFAULT_CWND_GAIN: u32 = 20; // 2.0x

// Params bounds.
pub const MIN_RATE: u64 = 62_500; // 500 Kbps
pub const MIN_CWND_GAIN: u32 = 5;
pub const MAX_CWND_GAIN: u32 = 80;

// Never shrink the window below this many segments.
pub const MIN_CWND: u32 = 4;

// With fewer samples than this in the window, losses are treated as noise.
pub const MIN_ACK_RATE_SAMPLES: u64 = 50;
// Percent. Loss above 20% inflates the rate no further.
pub const MIN_ACK_RATE_PERCENT: u64 = 80;

pub const DEFAULT_WINDOW_SLOTS: usize = 5;
pub const MIN_WINDOW_SLOTS: usize = 3;
pub const MAX_WINDOW_SLOTS: usize = 5;

// Same value as Linux TCP_INFINITE_SSTHRESH.
pub const INFINITE_SSTHRESH: u32 = 0x7fff_ffff;

// Socket option carrying Params, at level IPPROTO_TCP.
pub const TCP_BRUTAL_PARAMS: i32 = 23301;
pub const PARAMS_WIRE_LEN: usize = 12;

pub const USEC_PER_SEC: u64 = 1_000_000;
pub const USEC_PER_MSEC: u32 = 1_000;
pub const MSEC_PER_SEC: u64 = 1_000;

pub const CONGESTION_TRACING_LOG_LEVEL: Level = Level::DEBUG;
pub const DISCARDED_SAMPLE_LOG_INTERVAL_MS: u64 = 1000;
