//! Parsers for `/proc` pseudo-file content.
//!
//! These are pure functions that parse the content of `/proc/stat`,
//! `/proc/meminfo`, `/proc/net/dev` and `/proc/diskstats` into structured
//! data. They are designed to be easily testable with string inputs.
//!
//! The positional header skip and fixed column indices mirror the kernel's
//! documented layouts. They are intentionally not made self-describing.

/// Number of jiffie counters consumed from the aggregate cpu line.
pub const CPU_FIELDS: usize = 7;

/// Index of the idle counter within [`CpuSample`].
pub const CPU_IDLE_INDEX: usize = 3;

/// Number of non-data header lines at the top of `/proc/net/dev`,
/// skipped by position regardless of content.
pub const NET_DEV_HEADER_LINES: usize = 2;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Content present but does not match the expected shape.
    Malformed(String),
    /// A required labeled field is absent (or its value unparseable).
    MissingField(String),
    /// No row matched the requested interface/device name.
    NotFound(String),
    /// MemTotal resolved to zero; a used percentage is undefined.
    ZeroTotal,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Malformed(msg) => write!(f, "malformed record: {}", msg),
            ParseError::MissingField(label) => write!(f, "missing field {}", label),
            ParseError::NotFound(name) => write!(f, "{} not found", name),
            ParseError::ZeroTotal => write!(f, "MemTotal is zero"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Cumulative time-in-state counters from the aggregate cpu line of
/// `/proc/stat`, in kernel order: user, nice, system, idle, iowait,
/// irq, softirq.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuSample {
    pub counters: [u64; CPU_FIELDS],
}

impl CpuSample {
    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counters.iter().sum()
    }

    /// The idle counter.
    pub fn idle(&self) -> u64 {
        self.counters[CPU_IDLE_INDEX]
    }
}

/// Parses the aggregate cpu line of `/proc/stat`.
///
/// The first whitespace-delimited token is a label and is discarded.
/// At least [`CPU_FIELDS`] unsigned integers must follow; only the first
/// seven are consumed, extra columns (steal, guest, ...) are ignored.
pub fn parse_cpu_line(line: &str) -> Result<CpuSample, ParseError> {
    let mut tokens = line.split_whitespace();
    tokens
        .next()
        .ok_or_else(|| ParseError::Malformed("empty cpu line".to_string()))?;

    let mut counters = [0u64; CPU_FIELDS];
    for (i, slot) in counters.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| ParseError::Malformed(format!("cpu line has {} of {} counters", i, CPU_FIELDS)))?;
        *slot = token
            .parse()
            .map_err(|_| ParseError::Malformed(format!("invalid cpu counter '{}'", token)))?;
    }

    Ok(CpuSample { counters })
}

/// Total and free memory from `/proc/meminfo`, in kilobytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
}

impl MemInfo {
    /// Used-memory percentage, `(total - free) / total * 100`.
    pub fn used_percentage(&self) -> Result<f64, ParseError> {
        if self.mem_total == 0 {
            return Err(ParseError::ZeroTotal);
        }
        let used = self.mem_total.saturating_sub(self.mem_free);
        Ok(used as f64 / self.mem_total as f64 * 100.0)
    }
}

/// Returns the value of the first line whose prefix is exactly `label`.
///
/// The value is the first whitespace-separated token after the label; a
/// unit suffix ("kB") is ignored. The first matching line settles the
/// label even if its value does not parse.
fn labeled_value(content: &str, label: &str) -> Option<u64> {
    let line = content.lines().find(|line| line.starts_with(label))?;
    line[label.len()..].split_whitespace().next()?.parse().ok()
}

/// Parses `MemTotal:` and `MemFree:` from `/proc/meminfo` content.
///
/// Later duplicate labels are ignored; an absent label is a
/// [`ParseError::MissingField`].
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mem_total = labeled_value(content, "MemTotal:")
        .ok_or_else(|| ParseError::MissingField("MemTotal:".to_string()))?;
    let mem_free = labeled_value(content, "MemFree:")
        .ok_or_else(|| ParseError::MissingField("MemFree:".to_string()))?;

    Ok(MemInfo { mem_total, mem_free })
}

/// Cumulative byte counters for one interface from `/proc/net/dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCounters {
    /// Interface name token as it appears in the file (e.g. "eth0:").
    pub interface: String,
    /// Bytes received.
    pub rx_bytes: u64,
    /// Bytes transmitted.
    pub tx_bytes: u64,
}

/// Finds the counters for `name` in `/proc/net/dev` content.
///
/// The first [`NET_DEV_HEADER_LINES`] lines are skipped unconditionally,
/// even if they would parse as data. Each data line is the interface-name
/// token followed by the receive-side counters (bytes first) and the
/// transmit-side counters (bytes in the 9th numeric column). Lines whose
/// required columns do not parse are skipped; the first exact-name match
/// wins.
pub fn find_interface(content: &str, name: &str) -> Result<InterfaceCounters, ParseError> {
    for line in content.lines().skip(NET_DEV_HEADER_LINES) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(&interface) = fields.first() else {
            continue;
        };
        let Some(rx_bytes) = fields.get(1).and_then(|s| s.parse().ok()) else {
            continue;
        };
        let Some(tx_bytes) = fields.get(9).and_then(|s| s.parse().ok()) else {
            continue;
        };
        if interface == name {
            return Ok(InterfaceCounters {
                interface: interface.to_string(),
                rx_bytes,
                tx_bytes,
            });
        }
    }

    Err(ParseError::NotFound(name.to_string()))
}

/// Cumulative I/O times for one block device from `/proc/diskstats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskCounters {
    /// Device name (sda, nvme0n1, ...).
    pub device: String,
    /// Time spent reading (ms).
    pub read_time_ms: u64,
    /// Time spent writing (ms).
    pub write_time_ms: u64,
}

/// Finds the counters for `name` in `/proc/diskstats` content.
///
/// Format: major minor name reads r_merged r_sectors r_time writes
/// w_merged w_sectors w_time ... — the device name is the 3rd column,
/// read and write time the 7th and 11th. No header lines. Same
/// skip-malformed / first-match-wins semantics as [`find_interface`].
pub fn find_device(content: &str, name: &str) -> Result<DiskCounters, ParseError> {
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(&device) = fields.get(2) else {
            continue;
        };
        let Some(read_time_ms) = fields.get(6).and_then(|s| s.parse().ok()) else {
            continue;
        };
        let Some(write_time_ms) = fields.get(10).and_then(|s| s.parse().ok()) else {
            continue;
        };
        if device == name {
            return Ok(DiskCounters {
                device: device.to_string(),
                read_time_ms,
                write_time_ms,
            });
        }
    }

    Err(ParseError::NotFound(name.to_string()))
}
