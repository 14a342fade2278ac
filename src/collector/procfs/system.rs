//! System sampler reading global telemetry from `/proc/`.

use crate::collector::cpu::CpuTracker;
use crate::collector::procfs::parser::{
    DiskCounters, InterfaceCounters, ParseError, find_device, find_interface, parse_meminfo,
};
use crate::collector::traits::FileSystem;
use std::path::Path;

/// Error type for sampling failures.
#[derive(Debug)]
pub enum CollectError {
    /// Source could not be opened or read.
    Io(std::io::Error),
    /// Source was read but its content did not yield the requested value.
    Parse(ParseError),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e)
    }
}

/// Samples CPU, memory, network and disk figures from `/proc/`.
///
/// Owns the CPU tracker, the only state surviving across iterations;
/// the other three samplers read fresh content each call.
pub struct SystemSampler<F: FileSystem> {
    fs: F,
    proc_path: String,
    cpu: CpuTracker,
}

impl<F: FileSystem> SystemSampler<F> {
    /// Creates a new system sampler.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            cpu: CpuTracker::new(),
        }
    }

    /// CPU utilization percentage since the previous call, from the first
    /// line of `/proc/stat`.
    ///
    /// An `Io` error here means the primary source is gone; the caller
    /// treats it as fatal.
    pub fn sample_cpu(&mut self) -> Result<f64, CollectError> {
        let path = format!("{}/stat", self.proc_path);
        let line = self.fs.read_first_line(Path::new(&path))?;
        Ok(self.cpu.sample(&line)?)
    }

    /// Used-memory percentage from `/proc/meminfo`.
    pub fn sample_memory(&self) -> Result<f64, CollectError> {
        let path = format!("{}/meminfo", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        Ok(parse_meminfo(&content)?.used_percentage()?)
    }

    /// Cumulative receive/send byte counters for `name` from
    /// `/proc/net/dev`.
    pub fn sample_interface(&self, name: &str) -> Result<InterfaceCounters, CollectError> {
        let path = format!("{}/net/dev", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        Ok(find_interface(&content, name)?)
    }

    /// Cumulative read/write times for `name` from `/proc/diskstats`.
    pub fn sample_disk(&self, name: &str) -> Result<DiskCounters, CollectError> {
        let path = format!("{}/diskstats", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        Ok(find_device(&content, name)?)
    }
}
