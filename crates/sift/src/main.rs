//! sift command-line tool.
//!
//! Counts the primes in `[2, N]` with a partitioned sieve.
//!
//! # Example
//!
//! ```bash
//! # One worker, dense segments, one broadcast per sieving prime
//! sift 1000000
//!
//! # Eight workers, half-size segments, replicated prime list
//! sift 100000000 -p 8 --layout odd-only --protocol replicated
//!
//! # Worker count from the environment
//! SIFT_WORKERS=4 sift 10000000
//! ```

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use sift::engine::{run, Protocol, SieveConfig};
use sift::types::SegmentLayout;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Count primes up to N with a partitioned Sieve of Eratosthenes.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version, about, long_about = None)]
struct Args {
    /// Count primes less than or equal to this bound
    bound: u64,

    /// Number of workers
    #[arg(short = 'p', long, env = "SIFT_WORKERS", default_value = "1")]
    workers: usize,

    /// How workers agree on each sieving prime
    #[arg(long, value_enum, default_value_t = ProtocolArg::Broadcast)]
    protocol: ProtocolArg,

    /// Segment storage layout
    #[arg(long, value_enum, default_value_t = LayoutArg::Dense)]
    layout: LayoutArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProtocolArg {
    /// Coordinator broadcasts each next prime
    Broadcast,
    /// Coordinator broadcasts every sieving prime once
    Replicated,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Broadcast => Protocol::Broadcast,
            ProtocolArg::Replicated => Protocol::Replicated,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    /// One entry per value
    Dense,
    /// Odd values only
    OddOnly,
}

impl From<LayoutArg> for SegmentLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Dense => SegmentLayout::Dense,
            LayoutArg::OddOnly => SegmentLayout::OddOnly,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let config = SieveConfig::new(args.bound)
        .with_workers(args.workers)
        .with_protocol(args.protocol.into())
        .with_layout(args.layout.into());
    debug!(?config, "parsed arguments");

    match run(&config) {
        Ok(report) => {
            println!(
                "There are {} primes less than or equal to {}",
                report.prime_count, report.bound
            );
            println!(
                "SIEVE ({}) {:10.6}",
                report.workers,
                report.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("sift: {e}");
            ExitCode::FAILURE
        }
    }
}
