use std::sync::Arc;

use parking_lot::Mutex;

use crate::host::HostTransport;

struct MockHostInner {
    cwnd: u32,
    cwnd_clamp: u32,
    max_pacing_rate: u64,
    rtt_ms: u32,
    segment_size: u32,
    explicit_pacing: bool,
    cwnd_history: Vec<u32>,
    pacing_history: Vec<u64>,
}

/// A transport that records everything the controller pushes to it.
///
/// Clones share state, so a test can keep one handle while another is given away.
#[derive(Clone)]
pub struct MockHost {
    inner: Arc<Mutex<MockHostInner>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockHostInner {
                cwnd: 10,
                cwnd_clamp: 65535,
                max_pacing_rate: u64::MAX,
                rtt_ms: 20,
                segment_size: 1400,
                explicit_pacing: false,
                cwnd_history: Vec::new(),
                pacing_history: Vec::new(),
            })),
        }
    }
}

impl MockHost {
    pub fn set_link(&self, rtt_ms: u32, segment_size: u32) {
        let mut g = self.inner.lock();
        g.rtt_ms = rtt_ms;
        g.segment_size = segment_size;
    }

    pub fn set_limits(&self, cwnd_clamp: u32, max_pacing_rate: u64) {
        let mut g = self.inner.lock();
        g.cwnd_clamp = cwnd_clamp;
        g.max_pacing_rate = max_pacing_rate;
    }

    pub fn explicit_pacing_requested(&self) -> bool {
        self.inner.lock().explicit_pacing
    }

    pub fn cwnd_history(&self) -> Vec<u32> {
        self.inner.lock().cwnd_history.clone()
    }

    pub fn pacing_history(&self) -> Vec<u64> {
        self.inner.lock().pacing_history.clone()
    }

    pub fn last_pacing_rate(&self) -> Option<u64> {
        self.inner.lock().pacing_history.last().copied()
    }
}

impl HostTransport for MockHost {
    fn cwnd(&self) -> u32 {
        self.inner.lock().cwnd
    }

    fn set_cwnd(&mut self, cwnd: u32) {
        let mut g = self.inner.lock();
        g.cwnd = cwnd;
        g.cwnd_history.push(cwnd);
    }

    fn set_pacing_rate(&mut self, rate: u64) {
        self.inner.lock().pacing_history.push(rate);
    }

    fn cwnd_clamp(&self) -> u32 {
        self.inner.lock().cwnd_clamp
    }

    fn max_pacing_rate(&self) -> u64 {
        self.inner.lock().max_pacing_rate
    }

    fn rtt_ms(&self) -> u32 {
        self.inner.lock().rtt_ms
    }

    fn segment_size(&self) -> u32 {
        self.inner.lock().segment_size
    }

    fn request_explicit_pacing(&mut self) {
        self.inner.lock().explicit_pacing = true;
    }
}
