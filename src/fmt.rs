//! Pure formatting helpers for the console status line.
//!
//! All string assembly lives here so the loop in `main.rs` only decides
//! which segments to include.

/// Separator between status-line segments.
pub const SEGMENT_SEPARATOR: &str = " | ";

/// CPU segment, e.g. `"CPU Utilization:  90.0%"`.
pub fn cpu_segment(pct: f64) -> String {
    format!("CPU Utilization: {:>5.1}%", pct)
}

/// Memory segment, e.g. `"Memory Used Percentage:  75.0%"`.
pub fn memory_segment(pct: f64) -> String {
    format!("Memory Used Percentage: {:>5.1}%", pct)
}

/// Interface receive and send segments, in file order.
pub fn network_segments(interface: &str, rx_bytes: u64, tx_bytes: u64) -> [String; 2] {
    [
        format!("{} Receive: {} bytes", interface, rx_bytes),
        format!("{} Send: {} bytes", interface, tx_bytes),
    ]
}

/// Disk read and write segments.
pub fn disk_segments(device: &str, read_time_ms: u64, write_time_ms: u64) -> [String; 2] {
    [
        format!("{} Read: {} ms", device, read_time_ms),
        format!("{} Write: {} ms", device, write_time_ms),
    ]
}

/// Marker segment for a name absent from its table.
pub fn not_found_segment(name: &str) -> String {
    format!("{} not found", name)
}

/// Joins segments into one status line.
pub fn status_line(segments: &[String]) -> String {
    segments.join(SEGMENT_SEPARATOR)
}

/// Pads `line` with trailing spaces to `width` so a carriage-return
/// redraw fully overwrites a longer previous line.
pub fn pad_to(line: &str, width: usize) -> String {
    if line.len() >= width {
        line.to_string()
    } else {
        format!("{:<1$}", line, width)
    }
}
