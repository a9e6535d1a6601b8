//! Author: [Seclususs](https://github.com/seclususs)

use crate::hal::{processes, properties, thermal::ScaledSensor};
use crate::monitors::cpu_monitor::CpuMonitor;
use crate::monitors::memory_monitor::{MemoryMonitor, MemorySnapshot};
use crate::monitors::storage_monitor::{self, StorageSnapshot};
use crate::resources::sys_paths;

use std::{path, thread};

#[derive(Debug, Clone)]
pub struct TelemetryPaths {
    pub proc_stat: path::PathBuf,
    pub meminfo: path::PathBuf,
    pub proc_root: path::PathBuf,
    pub cpu_temp: path::PathBuf,
    pub cpu_freq: path::PathBuf,
    pub battery_temp: path::PathBuf,
    pub data_partition: path::PathBuf,
}

impl Default for TelemetryPaths {
    fn default() -> Self {
        Self {
            proc_stat: sys_paths::K_PROC_STAT_PATH.into(),
            meminfo: sys_paths::K_MEMINFO_PATH.into(),
            proc_root: sys_paths::K_PROC_ROOT.into(),
            cpu_temp: sys_paths::K_CPU_TEMP_PATH.into(),
            cpu_freq: sys_paths::K_CPU0_CUR_FREQ_PATH.into(),
            battery_temp: sys_paths::K_BATTERY_TEMP_PATH.into(),
            data_partition: sys_paths::K_DATA_PARTITION.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub model: String,
    pub android_version: String,
    pub manufacturer: String,
    pub hardware: String,
    pub cores: usize,
}

/// Build properties via `getprop`; empty strings where a property is unavailable.
pub fn read_device_info() -> DeviceInfo {
    let prop = |key: &str| properties::get_system_property(key).unwrap_or_default();
    DeviceInfo {
        model: prop("ro.product.model"),
        android_version: prop("ro.build.version.release"),
        manufacturer: prop("ro.product.manufacturer"),
        hardware: prop("ro.hardware"),
        cores: thread::available_parallelism().map_or(1, usize::from),
    }
}

/// Unprivileged readings. Every read fails soft to zero.
pub struct TelemetryReader {
    paths: TelemetryPaths,
    cpu: CpuMonitor,
    memory: MemoryMonitor,
    cpu_temp: ScaledSensor,
    cpu_freq: ScaledSensor,
    battery_temp: ScaledSensor,
}

impl TelemetryReader {
    pub fn new(paths: TelemetryPaths) -> Self {
        log::info!("TelemetryReader: Initializing...");
        Self {
            cpu: CpuMonitor::new(&paths.proc_stat),
            memory: MemoryMonitor::new(&paths.meminfo),
            cpu_temp: ScaledSensor::new(&paths.cpu_temp, 1000.0),
            cpu_freq: ScaledSensor::new(&paths.cpu_freq, 1_000_000.0),
            battery_temp: ScaledSensor::new(&paths.battery_temp, 10.0),
            paths,
        }
    }

    /// Cumulative since boot, not a delta between calls.
    pub fn cpu_usage_percent(&mut self) -> f32 {
        self.cpu.usage_percent()
    }

    pub fn memory_snapshot(&mut self) -> MemorySnapshot {
        self.memory.snapshot()
    }

    pub fn ram_usage_percent(&mut self) -> f32 {
        self.memory_snapshot().usage_percent()
    }

    pub fn total_ram_gb(&mut self) -> f32 {
        self.memory_snapshot().total_gb()
    }

    pub fn free_ram_gb(&mut self) -> f32 {
        self.memory_snapshot().free_gb()
    }

    pub fn cpu_temperature_celsius(&mut self) -> f32 {
        self.cpu_temp.read()
    }

    pub fn cpu_frequency_ghz(&mut self) -> f32 {
        self.cpu_freq.read()
    }

    pub fn battery_temperature_celsius(&mut self) -> f32 {
        self.battery_temp.read()
    }

    pub fn storage(&self) -> StorageSnapshot {
        storage_monitor::read_storage(&self.paths.data_partition).unwrap_or_else(|e| {
            log::debug!("TelemetryReader: storage unavailable: {e}");
            StorageSnapshot::default()
        })
    }

    pub fn running_process_count(&self) -> usize {
        processes::list_app_processes(&self.paths.proc_root).len()
    }

    pub fn device_info(&self) -> DeviceInfo {
        read_device_info()
    }

    pub fn paths(&self) -> &TelemetryPaths {
        &self.paths
    }
}
