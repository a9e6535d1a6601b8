//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::controllers::tuner::{SystemTuner, UNKNOWN_READING};
use crate::daemon::traits::{LoopAction, TickHandler};
use crate::monitors::system_info::TelemetryReader;

use std::sync::mpsc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub cpu_usage_percent: f32,
    pub cpu_temperature: String,
    pub ram_usage_percent: f32,
    pub total_ram_gb: f32,
    pub free_ram_gb: f32,
    pub cpu_frequency_ghz: f32,
    pub battery_temperature_celsius: f32,
    pub storage_used_gb: f32,
    pub storage_total_gb: f32,
    pub running_processes: usize,
}

pub struct TelemetryRefresher {
    reader: TelemetryReader,
    tuner: SystemTuner,
    tx: mpsc::Sender<TelemetrySnapshot>,
}

impl TelemetryRefresher {
    pub fn new(
        reader: TelemetryReader,
        tuner: SystemTuner,
        tx: mpsc::Sender<TelemetrySnapshot>,
    ) -> Self {
        Self { reader, tuner, tx }
    }

    pub fn sample(&mut self) -> TelemetrySnapshot {
        let memory = self.reader.memory_snapshot();
        let storage = self.reader.storage();
        TelemetrySnapshot {
            cpu_usage_percent: self.reader.cpu_usage_percent(),
            cpu_temperature: self
                .tuner
                .read_cpu_temperature()
                .unwrap_or_else(|| UNKNOWN_READING.to_string()),
            ram_usage_percent: memory.usage_percent(),
            total_ram_gb: memory.total_gb(),
            free_ram_gb: memory.free_gb(),
            cpu_frequency_ghz: self.reader.cpu_frequency_ghz(),
            battery_temperature_celsius: self.reader.battery_temperature_celsius(),
            storage_used_gb: storage.used_gb(),
            storage_total_gb: storage.total_gb(),
            running_processes: self.reader.running_process_count(),
        }
    }
}

impl TickHandler for TelemetryRefresher {
    fn on_tick(&mut self) -> Result<LoopAction, BoostError> {
        let snapshot = self.sample();
        if self.tx.send(snapshot).is_err() {
            log::info!("TelemetryRefresher: Receiver gone, stopping.");
            return Ok(LoopAction::Stop);
        }
        Ok(LoopAction::Continue)
    }
}
