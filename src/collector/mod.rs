//! Telemetry sampling from the Linux `/proc` filesystem.
//!
//! The `SystemSampler` reads four pseudo-files (`stat`, `meminfo`,
//! `net/dev`, `diskstats`) through the `FileSystem` trait, so tests can
//! substitute `MockFs` with synthetic content instead of a live kernel.
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use procline::collector::{RealFs, SystemSampler};
//!
//! let mut sampler = SystemSampler::new(RealFs::new(), "/proc");
//! let cpu_pct = sampler.sample_cpu()?;
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use procline::collector::{MockFs, SystemSampler};
//!
//! let mut fs = MockFs::new();
//! fs.add_file("/proc/stat", "cpu  10 0 10 100 0 0 0\n");
//! let mut sampler = SystemSampler::new(fs, "/proc");
//! assert_eq!(sampler.sample_cpu().unwrap(), 0.0);
//! ```

pub mod cpu;
pub mod mock;
pub mod procfs;
mod traits;

pub use cpu::CpuTracker;
pub use mock::MockFs;
pub use procfs::parser::{CpuSample, DiskCounters, InterfaceCounters, MemInfo, ParseError};
pub use procfs::system::{CollectError, SystemSampler};
pub use traits::{FileSystem, RealFs};
