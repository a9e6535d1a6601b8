//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::session::{RootSession, SessionConfig};
use crate::controllers::performance::{CacheCleanOutcome, PerformanceManager};
use crate::controllers::telemetry_impl::TelemetrySnapshot;
use crate::controllers::tuner::SystemTuner;
use crate::daemon::logging;
use crate::hal::executor::PrivilegedExecutor;
use crate::monitors::system_info::{DeviceInfo, TelemetryPaths};

use std::{panic, sync};

const TEMPERATURE_TEXT_LEN: usize = 16;
const DEVICE_TEXT_LEN: usize = 64;
const VERSION_TEXT_LEN: usize = 16;

struct Booster {
    manager: PerformanceManager,
    telemetry_rx: sync::Mutex<sync::mpsc::Receiver<TelemetrySnapshot>>,
    latest: sync::Mutex<Option<TelemetrySnapshot>>,
}

static BOOSTER: sync::OnceLock<Booster> = sync::OnceLock::new();

/// NUL-terminated UTF-8 in `N` bytes, cut on a char boundary.
fn c_text<const N: usize>(text: &str) -> [u8; N] {
    let mut buf = [0u8; N];
    let mut end = text.len().min(N.saturating_sub(1));
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    buf[..end].copy_from_slice(&text.as_bytes()[..end]);
    buf
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct BoosterTelemetry {
    pub cpu_usage_percent: f32,
    pub ram_usage_percent: f32,
    pub total_ram_gb: f32,
    pub free_ram_gb: f32,
    pub cpu_frequency_ghz: f32,
    pub battery_temperature_celsius: f32,
    pub storage_used_gb: f32,
    pub storage_total_gb: f32,
    pub running_processes: u32,
    /// NUL-terminated UTF-8, `"unknown"` when the sensor could not be read.
    pub cpu_temperature: [u8; TEMPERATURE_TEXT_LEN],
}

impl From<&TelemetrySnapshot> for BoosterTelemetry {
    fn from(snapshot: &TelemetrySnapshot) -> Self {
        Self {
            cpu_usage_percent: snapshot.cpu_usage_percent,
            ram_usage_percent: snapshot.ram_usage_percent,
            total_ram_gb: snapshot.total_ram_gb,
            free_ram_gb: snapshot.free_ram_gb,
            cpu_frequency_ghz: snapshot.cpu_frequency_ghz,
            battery_temperature_celsius: snapshot.battery_temperature_celsius,
            storage_used_gb: snapshot.storage_used_gb,
            storage_total_gb: snapshot.storage_total_gb,
            running_processes: u32::try_from(snapshot.running_processes).unwrap_or(u32::MAX),
            cpu_temperature: c_text(&snapshot.cpu_temperature),
        }
    }
}

/// Text fields are NUL-terminated UTF-8, empty when the property is unset.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BoosterDeviceInfo {
    pub model: [u8; DEVICE_TEXT_LEN],
    pub manufacturer: [u8; DEVICE_TEXT_LEN],
    pub hardware: [u8; DEVICE_TEXT_LEN],
    pub android_version: [u8; VERSION_TEXT_LEN],
    pub cores: u32,
}

impl From<&DeviceInfo> for BoosterDeviceInfo {
    fn from(info: &DeviceInfo) -> Self {
        Self {
            model: c_text(&info.model),
            manufacturer: c_text(&info.manufacturer),
            hardware: c_text(&info.hardware),
            android_version: c_text(&info.android_version),
            cores: u32::try_from(info.cores).unwrap_or(u32::MAX),
        }
    }
}

fn build_booster() -> Booster {
    let session = RootSession::initialize(SessionConfig::default());
    let tuner = SystemTuner::new(PrivilegedExecutor::with_su(session));
    let manager = PerformanceManager::new(tuner, TelemetryPaths::default());
    let (tx, rx) = sync::mpsc::channel();
    if let Err(e) = manager.start_refresh(tx) {
        log::error!("Rust: Telemetry loop not started: {e}");
    }
    Booster {
        manager,
        telemetry_rx: sync::Mutex::new(rx),
        latest: sync::Mutex::new(None),
    }
}

fn with_manager<T>(fallback: T, f: impl FnOnce(&PerformanceManager) -> T) -> T {
    let Some(booster) = BOOSTER.get() else {
        log::error!("Rust: Booster used before booster_init.");
        return fallback;
    };
    match panic::catch_unwind(panic::AssertUnwindSafe(|| f(&booster.manager))) {
        Ok(v) => v,
        Err(cause) => {
            log::error!("Rust: Panic in booster call: {cause:?}");
            fallback
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn booster_init() -> i32 {
    logging::init();
    match panic::catch_unwind(|| {
        BOOSTER.get_or_init(build_booster);
    }) {
        Ok(()) => 0,
        Err(cause) => {
            log::error!("Rust: Critical Panic during startup: {cause:?}");
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn booster_is_rooted() -> bool {
    with_manager(false, PerformanceManager::root_status)
}

#[unsafe(no_mangle)]
pub extern "C" fn booster_clean_ram() -> i32 {
    with_manager(0, |m| i32::try_from(m.clean_ram()).unwrap_or(i32::MAX))
}

/// 1 cleaned, 0 failed, -1 root required.
#[unsafe(no_mangle)]
pub extern "C" fn booster_clean_cache() -> i32 {
    with_manager(0, |m| match m.clean_system_cache() {
        CacheCleanOutcome::Cleaned => 1,
        CacheCleanOutcome::Failed => 0,
        CacheCleanOutcome::RootRequired => -1,
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn booster_toggle_game_mode() -> bool {
    with_manager(false, PerformanceManager::toggle_game_mode)
}

#[unsafe(no_mangle)]
pub extern "C" fn booster_start_boost() -> i32 {
    with_manager(-1, |m| match m.start_boost() {
        Ok(()) => 0,
        Err(e) => {
            log::error!("Rust: {e}");
            -1
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn booster_stop_boost() {
    with_manager((), PerformanceManager::stop_boost);
}

/// # Safety
/// `out` must be null or point to writable memory for one `BoosterTelemetry`.
/// Returns 0 when a snapshot was written, -1 when none is available yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn booster_read_telemetry(out: *mut BoosterTelemetry) -> i32 {
    if out.is_null() {
        return -1;
    }
    let Some(booster) = BOOSTER.get() else {
        return -1;
    };
    let mut latest = match booster.latest.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Ok(rx) = booster.telemetry_rx.lock() {
        while let Ok(snapshot) = rx.try_recv() {
            *latest = Some(snapshot);
        }
    }
    match latest.as_ref() {
        Some(snapshot) => {
            unsafe { out.write(BoosterTelemetry::from(snapshot)) };
            0
        }
        None => -1,
    }
}

/// # Safety
/// `out` must be null or point to writable memory for one `BoosterDeviceInfo`.
/// Returns 0 when written, -1 on a null pointer or before `booster_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn booster_read_device_info(out: *mut BoosterDeviceInfo) -> i32 {
    if out.is_null() {
        return -1;
    }
    match with_manager(None, |m| Some(BoosterDeviceInfo::from(&m.device_info()))) {
        Some(info) => {
            unsafe { out.write(info) };
            0
        }
        None => -1,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn booster_shutdown() {
    log::info!("Rust: UI requested shutdown.");
    with_manager((), PerformanceManager::shutdown);
}
