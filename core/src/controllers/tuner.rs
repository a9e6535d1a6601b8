//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::profiles::FrequencyProfile;
use crate::hal::executor::PrivilegedExecutor;
use crate::registry::commands;

pub const UNKNOWN_READING: &str = "unknown";

/// Turns tuning intents into command batches and hands them to the executor.
#[derive(Clone)]
pub struct SystemTuner {
    executor: PrivilegedExecutor,
}

impl SystemTuner {
    pub fn new(executor: PrivilegedExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &PrivilegedExecutor {
        &self.executor
    }

    pub fn wipe_system_caches(&self) -> bool {
        log::info!("Tuner: Wiping system caches...");
        self.executor
            .run_batch(&commands::CACHE_WIPE_COMMANDS)
            .is_some()
    }

    /// Only logical core 0 is written.
    pub fn set_cpu_frequency_range(&self, min_khz: u32, max_khz: u32) -> bool {
        self.apply_profile(FrequencyProfile::new(min_khz, max_khz))
    }

    pub fn apply_profile(&self, profile: FrequencyProfile) -> bool {
        log::info!(
            "Tuner: CPU0 range {}..{} kHz, governor {}.",
            profile.min_khz,
            profile.max_khz,
            commands::PERFORMANCE_GOVERNOR
        );
        self.executor
            .run_batch(&commands::cpu_frequency_commands(profile))
            .is_some()
    }

    pub fn set_animation_scale(&self, scale: f32) {
        match commands::animation_scale_commands(scale) {
            Ok(batch) => {
                if self.executor.run_batch(&batch).is_none() {
                    log::debug!("Tuner: Animation scale {scale} not applied.");
                }
            }
            Err(e) => log::warn!("Tuner: {e}"),
        }
    }

    pub fn read_cpu_temperature(&self) -> Option<String> {
        let raw = self.executor.run(&commands::cpu_temperature_command())?;
        let formatted = format_millidegrees(&raw);
        if formatted.is_none() {
            log::debug!("Tuner: Unparsable temperature reading '{}'", raw.trim());
        }
        formatted
    }

    pub fn freeze_app(&self, package: &str) -> bool {
        match commands::freeze_command(package) {
            Ok(cmd) => self.executor.run(&cmd).is_some(),
            Err(e) => {
                log::warn!("Tuner: {e}");
                false
            }
        }
    }

    pub fn unfreeze_app(&self, package: &str) -> bool {
        match commands::unfreeze_command(package) {
            Ok(cmd) => self.executor.run(&cmd).is_some(),
            Err(e) => {
                log::warn!("Tuner: {e}");
                false
            }
        }
    }

    pub fn list_third_party_packages(&self) -> Vec<String> {
        self.executor
            .run(commands::LIST_THIRD_PARTY_PACKAGES)
            .map(|out| commands::parse_package_list(&out))
            .unwrap_or_default()
    }

    /// Kills `pids` through the elevated shell. Returns how many were signalled.
    pub fn kill_processes(&self, pids: &[u32]) -> usize {
        if pids.is_empty() {
            return 0;
        }
        self.executor
            .run_batch(&commands::kill_pid_commands(pids))
            .map_or(0, |out| commands::parse_killed_pids(&out).len())
    }

    pub fn kill_background_packages<S: AsRef<str>>(&self, packages: &[S]) -> bool {
        let batch = commands::kill_background_commands(packages);
        if batch.is_empty() {
            return false;
        }
        log::info!("Tuner: Killing background processes of {} packages.", batch.len());
        self.executor.run_batch(&batch).is_some()
    }
}

/// `"45000"` -> `"45.0°C"`.
pub fn format_millidegrees(raw: &str) -> Option<String> {
    let value = raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())?;
    Some(format!("{:?}°C", value / 1000.0))
}
