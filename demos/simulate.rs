// Drives a Brutal controller over a simulated lossy link and prints what it
// decides every second.
//
// cargo run --example simulate -- --rate-mbps 50 --loss 0.1

use anyhow::Context;
use brutal_cc::{CongestionConfig, Connection, HostTransport, Params, RateSample};
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICK_MS: u64 = 10;
const START_SECONDS: u64 = 1_700_000_000;

#[derive(Parser)]
struct Args {
    /// Target rate in Mbps.
    #[arg(long, default_value_t = 10)]
    rate_mbps: u64,

    /// cwnd gain in tenths.
    #[arg(long, default_value_t = 20)]
    cwnd_gain: u32,

    /// Probability of losing each packet.
    #[arg(long, default_value_t = 0.05)]
    loss: f64,

    #[arg(long, default_value_t = 50)]
    rtt_ms: u32,

    #[arg(long, default_value_t = 1400)]
    mss: u32,

    #[arg(long, default_value_t = 10)]
    seconds: u64,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

struct SimHost {
    cwnd: u32,
    pacing_rate: u64,
    paced: bool,
    rtt_ms: u32,
    mss: u32,
}

impl HostTransport for SimHost {
    fn cwnd(&self) -> u32 {
        self.cwnd
    }

    fn set_cwnd(&mut self, cwnd: u32) {
        self.cwnd = cwnd;
    }

    fn set_pacing_rate(&mut self, rate: u64) {
        self.pacing_rate = rate;
    }

    fn cwnd_clamp(&self) -> u32 {
        u32::MAX
    }

    fn max_pacing_rate(&self) -> u64 {
        u64::MAX
    }

    fn rtt_ms(&self) -> u32 {
        self.rtt_ms
    }

    fn segment_size(&self) -> u32 {
        self.mss
    }

    fn request_explicit_pacing(&mut self) {
        self.paced = true;
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    anyhow::ensure!((0.0..=1.0).contains(&args.loss), "loss must be within [0, 1]");

    let host = SimHost {
        cwnd: 10,
        pacing_rate: 0,
        paced: false,
        rtt_ms: args.rtt_ms,
        mss: args.mss,
    };
    let conn = Connection::new(host, &CongestionConfig::default())?;
    conn.on_params_update(Params::from_mbps(args.rate_mbps, args.cwnd_gain))
        .context("invalid params")?;
    info!(paced = conn.with_host(|h| h.paced), "connected");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let ticks_per_second = 1000 / TICK_MS;

    for second in 0..args.seconds {
        let mut delivered_bytes = 0u64;
        for _ in 0..ticks_per_second {
            let (pacing_rate, cwnd, mss) =
                conn.with_host(|h| (h.pacing_rate, h.cwnd as u64, h.mss.max(1) as u64));

            // Whatever the pacer allows this tick, but no more than cwnd per RTT.
            let per_tick_cwnd = cwnd * TICK_MS / args.rtt_ms.max(1) as u64;
            let sent = (pacing_rate * TICK_MS / 1000 / mss).min(per_tick_cwnd.max(1));
            let lost = (0..sent).filter(|_| rng.random_bool(args.loss)).count() as u64;
            let acked = sent - lost;
            delivered_bytes += acked * mss;

            conn.on_rate_sample(&RateSample {
                delivered: acked as i32,
                interval_us: (TICK_MS * 1000) as i64,
                acked_sacked: acked as u32,
                losses: lost as u32,
                now_seconds: START_SECONDS + second,
            })?;
        }

        let (pacing_rate, cwnd) = conn.with_host(|h| (h.pacing_rate, h.cwnd));
        info!(
            second,
            cwnd,
            pacing_mbps = pacing_rate * 8 / 1_000_000,
            delivered_mbps = delivered_bytes * 8 / 1_000_000,
            "tick"
        );
    }

    Ok(())
}
