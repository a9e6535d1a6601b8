//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::hal::monitored_file::MonitoredFile;

use std::path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuTimes {
    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.idle)
    }

    /// Busy share of all ticks since boot, in percent.
    pub fn usage_percent(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let used = total.saturating_sub(self.idle);
        ((used as f64 / total as f64) * 100.0).clamp(0.0, 100.0) as f32
    }
}

/// Parses the aggregate `cpu ` line of `/proc/stat`.
pub fn parse_cpu_times(content: &str) -> Result<CpuTimes, BoostError> {
    let line = content
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| BoostError::ParseError("aggregate cpu line not found".into()))?;
    let mut fields = line.split_ascii_whitespace().skip(1).map(str::parse::<u64>);
    let mut next = |name: &str| -> Result<u64, BoostError> {
        match fields.next() {
            Some(Ok(v)) => Ok(v),
            Some(Err(e)) => Err(BoostError::ParseError(format!("{name}: {e}"))),
            None => Err(BoostError::ParseError(format!("{name}: missing"))),
        }
    };
    Ok(CpuTimes {
        user: next("user")?,
        nice: next("nice")?,
        system: next("system")?,
        idle: next("idle")?,
    })
}

pub struct CpuMonitor {
    stat: Option<MonitoredFile<512>>,
}

impl CpuMonitor {
    pub fn new(stat_path: &path::Path) -> Self {
        let stat = match MonitoredFile::new(stat_path) {
            Ok(f) => Some(f),
            Err(e) => {
                log::warn!("CpuMonitor: {e}");
                None
            }
        };
        Self { stat }
    }

    pub fn read_times(&mut self) -> Result<CpuTimes, BoostError> {
        let stat = self
            .stat
            .as_mut()
            .ok_or_else(|| BoostError::SensorMissing("cpu counters".into()))?;
        parse_cpu_times(stat.read_value()?)
    }

    pub fn usage_percent(&mut self) -> f32 {
        match self.read_times() {
            Ok(times) => times.usage_percent(),
            Err(e) => {
                log::debug!("CpuMonitor: usage unavailable ({}): {e}", e.cause());
                0.0
            }
        }
    }
}
