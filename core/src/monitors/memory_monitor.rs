//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::hal::monitored_file::MonitoredFile;

use std::path;

pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl MemorySnapshot {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    pub fn usage_percent(&self) -> f32 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        ((self.used_bytes() as f64 / self.total_bytes as f64) * 100.0) as f32
    }

    pub fn total_gb(&self) -> f32 {
        (self.total_bytes as f64 / BYTES_PER_GB) as f32
    }

    pub fn free_gb(&self) -> f32 {
        (self.available_bytes as f64 / BYTES_PER_GB) as f32
    }
}

/// Parses `/proc/meminfo`. `MemFree` stands in for kernels without `MemAvailable`.
pub fn parse_meminfo(content: &str) -> Result<MemorySnapshot, BoostError> {
    let mut total_kb = None;
    let mut available_kb = None;
    let mut free_kb = None;
    for line in content.lines() {
        let mut parts = line.split_ascii_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let slot = match key {
            "MemTotal:" => &mut total_kb,
            "MemAvailable:" => &mut available_kb,
            "MemFree:" => &mut free_kb,
            _ => continue,
        };
        *slot = Some(
            value
                .parse::<u64>()
                .map_err(|e| BoostError::ParseError(format!("{key} {e}")))?,
        );
    }
    let total_kb = total_kb.ok_or_else(|| BoostError::ParseError("MemTotal missing".into()))?;
    let available_kb = available_kb
        .or(free_kb)
        .ok_or_else(|| BoostError::ParseError("MemAvailable missing".into()))?;
    Ok(MemorySnapshot {
        total_bytes: total_kb.saturating_mul(1024),
        available_bytes: available_kb.min(total_kb).saturating_mul(1024),
    })
}

pub struct MemoryMonitor {
    meminfo: Option<MonitoredFile<1024>>,
}

impl MemoryMonitor {
    pub fn new(meminfo_path: &path::Path) -> Self {
        let meminfo = match MonitoredFile::new(meminfo_path) {
            Ok(f) => Some(f),
            Err(e) => {
                log::warn!("MemoryMonitor: {e}");
                None
            }
        };
        Self { meminfo }
    }

    pub fn try_snapshot(&mut self) -> Result<MemorySnapshot, BoostError> {
        let meminfo = self
            .meminfo
            .as_mut()
            .ok_or_else(|| BoostError::SensorMissing("meminfo".into()))?;
        parse_meminfo(meminfo.read_value()?)
    }

    pub fn snapshot(&mut self) -> MemorySnapshot {
        self.try_snapshot().unwrap_or_else(|e| {
            log::debug!("MemoryMonitor: snapshot unavailable ({}): {e}", e.cause());
            MemorySnapshot::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "MemTotal:        8000000 kB\n\
                           MemFree:          500000 kB\n\
                           MemAvailable:    2000000 kB\n\
                           Buffers:          100000 kB\n";

    #[test]
    fn used_is_total_minus_available() {
        let snap = parse_meminfo(MEMINFO).unwrap();
        assert_eq!(snap.total_bytes, 8_000_000 * 1024);
        assert_eq!(snap.available_bytes, 2_000_000 * 1024);
        assert!((snap.usage_percent() - 75.0).abs() < 1e-4);
        assert!((snap.total_gb() - 7.629_394_5).abs() < 1e-3);
        assert!((snap.free_gb() - 1.907_348_6).abs() < 1e-3);
    }

    #[test]
    fn mem_free_is_a_fallback() {
        let snap = parse_meminfo("MemTotal: 1000 kB\nMemFree: 250 kB\n").unwrap();
        assert!((snap.usage_percent() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn empty_snapshot_reads_zero() {
        assert!(parse_meminfo("").is_err());
        assert!(parse_meminfo("MemTotal: abc kB\nMemAvailable: 1 kB").is_err());
        let snap = MemorySnapshot::default();
        assert_eq!(snap.usage_percent(), 0.0);
        assert_eq!(snap.total_gb(), 0.0);
        let mut monitor = MemoryMonitor::new(path::Path::new("/nonexistent/meminfo"));
        assert_eq!(monitor.snapshot(), MemorySnapshot::default());
    }
}
