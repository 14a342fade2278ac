//! procline - single-line host telemetry sampler.
//!
//! Reads CPU, memory, network and disk activity from /proc on a fixed
//! cadence and redraws one console status line in place until Ctrl-C.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use procline::collector::{CollectError, FileSystem, ParseError, RealFs, SystemSampler};
use procline::fmt;

/// Single-line host telemetry sampler.
#[derive(Parser)]
#[command(name = "procline", about = "Single-line host telemetry sampler", version)]
struct Args {
    /// Pacing interval between iterations, in microseconds.
    #[arg(short, long, default_value = "500000")]
    interval_us: u64,

    /// Network interface name as it appears in /proc/net/dev (with colon).
    #[arg(short = 'n', long, default_value = "eth0:")]
    interface: String,

    /// Block device name as it appears in /proc/diskstats.
    #[arg(short, long, default_value = "sda")]
    disk: String,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
///
/// Logs go to stderr; stdout carries the in-place status line.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("procline={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Runs one sampling round and assembles the status line.
///
/// Only a CPU source I/O failure propagates; every other failure degrades
/// its own segment (omitted, or a not-found marker) and the round
/// continues with the remaining subsystems.
fn sample_status_line<F: FileSystem>(
    sampler: &mut SystemSampler<F>,
    interface: &str,
    disk: &str,
) -> Result<String, CollectError> {
    let mut segments: Vec<String> = Vec::new();

    match sampler.sample_cpu() {
        Ok(pct) => segments.push(fmt::cpu_segment(pct)),
        Err(CollectError::Io(e)) => return Err(CollectError::Io(e)),
        Err(e) => debug!("CPU segment skipped: {}", e),
    }

    match sampler.sample_memory() {
        Ok(pct) => segments.push(fmt::memory_segment(pct)),
        Err(e) => debug!("memory segment skipped: {}", e),
    }

    match sampler.sample_interface(interface) {
        Ok(net) => {
            segments.extend(fmt::network_segments(&net.interface, net.rx_bytes, net.tx_bytes));
        }
        Err(CollectError::Parse(ParseError::NotFound(name))) => {
            segments.push(fmt::not_found_segment(&name));
        }
        Err(e) => debug!("network segment skipped: {}", e),
    }

    match sampler.sample_disk(disk) {
        Ok(d) => {
            segments.extend(fmt::disk_segments(&d.device, d.read_time_ms, d.write_time_ms));
        }
        Err(CollectError::Parse(ParseError::NotFound(name))) => {
            segments.push(fmt::not_found_segment(&name));
        }
        Err(e) => debug!("disk segment skipped: {}", e),
    }

    Ok(fmt::status_line(&segments))
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("procline {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}us, interface={}, disk={}, proc={}",
        args.interval_us, args.interface, args.disk, args.proc_path
    );

    let mut sampler = SystemSampler::new(RealFs::new(), &args.proc_path);
    let interval = Duration::from_micros(args.interval_us);

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let mut stdout = io::stdout();
    let mut line_width = 0usize;

    // Cancellation is observed once per iteration, here at the top; an
    // in-flight iteration always completes.
    while running.load(Ordering::SeqCst) {
        let line = match sample_status_line(&mut sampler, &args.interface, &args.disk) {
            Ok(line) => line,
            Err(e) => {
                error!("CPU source unavailable: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let padded = fmt::pad_to(&line, line_width);
        line_width = padded.len();
        print!("\r{}", padded);
        let _ = stdout.flush();

        // Sleep with periodic checks for the shutdown signal, so a pending
        // cancellation never waits longer than one slice.
        let slice = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(slice);
            thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!("Received shutdown signal");
    print!("\r{}\n", fmt::pad_to("Done!", line_width));
    let _ = stdout.flush();

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::sample_status_line;
    use procline::collector::{CollectError, MockFs, SystemSampler};

    fn fixture_fs() -> MockFs {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu  100 0 100 600 0 0 0\n");
        fs.add_file("/proc/meminfo", "MemTotal:  1000 kB\nMemFree:   250 kB\n");
        fs.add_file(
            "/proc/net/dev",
            "header\nheader\neth0: 500 0 0 0 0 0 0 0 1500 0 0 0 0 0 0 0\n",
        );
        fs.add_file(
            "/proc/diskstats",
            "   8       0 sda 4000 100 80000 3500 2000 50 40000 7200 0 5000 10700\n",
        );
        fs
    }

    #[test]
    fn status_line_covers_all_subsystems() {
        let mut sampler = SystemSampler::new(fixture_fs(), "/proc");
        let line = sample_status_line(&mut sampler, "eth0:", "sda").unwrap();
        assert_eq!(
            line,
            "CPU Utilization:   0.0% | Memory Used Percentage:  75.0% | \
             eth0: Receive: 500 bytes | eth0: Send: 1500 bytes | \
             sda Read: 3500 ms | sda Write: 7200 ms"
        );
    }

    #[test]
    fn missing_cpu_source_is_fatal() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 1000 kB\nMemFree: 250 kB\n");
        let mut sampler = SystemSampler::new(fs, "/proc");
        let err = sample_status_line(&mut sampler, "eth0:", "sda").unwrap_err();
        assert!(matches!(err, CollectError::Io(_)));
    }

    #[test]
    fn degraded_subsystems_keep_the_rest_of_the_line() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu  100 0 100 600 0 0 0\n");
        // No meminfo, no diskstats; interface table lacks the target.
        fs.add_file("/proc/net/dev", "header\nheader\nlo: 1 0 0 0 0 0 0 0 1 0 0 0 0 0 0 0\n");
        let mut sampler = SystemSampler::new(fs, "/proc");
        let line = sample_status_line(&mut sampler, "eth0:", "sda").unwrap();
        assert_eq!(line, "CPU Utilization:   0.0% | eth0: not found");
    }

    #[test]
    fn malformed_cpu_line_degrades_instead_of_failing() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu mangled\n");
        fs.add_file("/proc/meminfo", "MemTotal: 1000 kB\nMemFree: 500 kB\n");
        let mut sampler = SystemSampler::new(fs, "/proc");
        let line = sample_status_line(&mut sampler, "eth0:", "sda").unwrap();
        assert!(line.starts_with("Memory Used Percentage:"));
    }
}
