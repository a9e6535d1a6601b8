//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::hal::monitored_file::MonitoredFile;

use std::path;

/// A sysfs node holding one integer in a fixed sub-unit
/// (millidegrees, decidegrees, kHz).
pub struct ScaledSensor {
    monitor: Option<MonitoredFile<32>>,
    divisor: f32,
    label: String,
}

impl ScaledSensor {
    pub fn new(path: &path::Path, divisor: f32) -> Self {
        let monitor = match MonitoredFile::new(path) {
            Ok(m) => Some(m),
            Err(e) => {
                log::debug!("ScaledSensor: {} unavailable: {e}", path.display());
                None
            }
        };
        Self {
            monitor,
            divisor,
            label: path.display().to_string(),
        }
    }

    pub fn try_read(&mut self) -> Result<f32, BoostError> {
        let monitor = self
            .monitor
            .as_mut()
            .ok_or_else(|| BoostError::SensorMissing(self.label.clone()))?;
        let content = monitor.read_value()?.trim();
        let raw = content
            .parse::<f32>()
            .map_err(|_| BoostError::ParseError(format!("'{content}' in {}", self.label)))?;
        Ok(raw / self.divisor)
    }

    pub fn read(&mut self) -> f32 {
        match self.try_read() {
            Ok(v) if v.is_finite() => v,
            Ok(_) => 0.0,
            Err(e) => {
                log::debug!("ScaledSensor: {} ({})", e, e.cause());
                0.0
            }
        }
    }
}
