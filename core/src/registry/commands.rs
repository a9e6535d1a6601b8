//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::config::profiles::FrequencyProfile;
use crate::resources::sys_paths::{
    K_CPU0_GOVERNOR_PATH, K_CPU0_MAX_FREQ_PATH, K_CPU0_MIN_FREQ_PATH, K_CPU_TEMP_PATH,
};

pub const CACHE_WIPE_COMMANDS: [&str; 4] = [
    "rm -rf /data/dalvik-cache/*",
    "rm -rf /cache/*",
    "rm -rf /data/system/cache/*",
    "sync",
];

pub const PERFORMANCE_GOVERNOR: &str = "performance";

pub const ANIMATION_SCALE_KEYS: [&str; 3] = [
    "window_animation_scale",
    "transition_animation_scale",
    "animator_duration_scale",
];

pub const LIST_THIRD_PARTY_PACKAGES: &str = "pm list packages -3";

/// Package names start with a letter, so nothing passed on can be read as an option.
pub fn validate_package_name(name: &str) -> Result<(), BoostError> {
    let well_formed = name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(BoostError::InvalidInput(format!("Invalid package name: '{name}'")))
    }
}

/// Bounds first, governor last: setting the governor before the bounds
/// clamps against the old range.
pub fn cpu_frequency_commands(profile: FrequencyProfile) -> [String; 3] {
    [
        format!("echo {} > {K_CPU0_MIN_FREQ_PATH}", profile.min_khz),
        format!("echo {} > {K_CPU0_MAX_FREQ_PATH}", profile.max_khz),
        format!("echo {PERFORMANCE_GOVERNOR} > {K_CPU0_GOVERNOR_PATH}"),
    ]
}

pub fn animation_scale_commands(scale: f32) -> Result<[String; 3], BoostError> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(BoostError::InvalidInput(format!(
            "Invalid animation scale: {scale}"
        )));
    }
    Ok(ANIMATION_SCALE_KEYS.map(|key| format!("settings put global {key} {scale}")))
}

pub fn cpu_temperature_command() -> String {
    format!("cat {K_CPU_TEMP_PATH}")
}

pub fn freeze_command(package: &str) -> Result<String, BoostError> {
    validate_package_name(package)?;
    Ok(format!("pm disable {package}"))
}

pub fn unfreeze_command(package: &str) -> Result<String, BoostError> {
    validate_package_name(package)?;
    Ok(format!("pm enable {package}"))
}

pub fn kill_background_commands<S: AsRef<str>>(packages: &[S]) -> Vec<String> {
    packages
        .iter()
        .map(|c| c.as_ref())
        .filter(|pkg| match validate_package_name(pkg) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Registry: Skipping package: {e}");
                false
            }
        })
        .map(|pkg| format!("am kill {pkg}"))
        .collect()
}

/// One `kill -9` per pid, echoing the pid on success. The trailing `true`
/// keeps a vanished pid at the end from failing the whole batch.
pub fn kill_pid_commands(pids: &[u32]) -> Vec<String> {
    pids.iter()
        .map(|pid| format!("kill -9 {pid} 2>/dev/null && echo {pid}"))
        .chain(std::iter::once("true".to_string()))
        .collect()
}

/// Pids reported back by a `kill_pid_commands` batch.
pub fn parse_killed_pids(output: &str) -> Vec<u32> {
    output
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .collect()
}

/// Parses `pm list packages` output (`package:<name>` per line).
pub fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("package:"))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
