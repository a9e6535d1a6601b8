//! Author: [Seclususs](https://github.com/seclususs)

pub const K_PROC_STAT_PATH: &str = "/proc/stat";
pub const K_MEMINFO_PATH: &str = "/proc/meminfo";
pub const K_PROC_ROOT: &str = "/proc";

pub const K_CPU_TEMP_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";
pub const K_BATTERY_TEMP_PATH: &str = "/sys/class/power_supply/battery/temp";
pub const K_CPU0_CUR_FREQ_PATH: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq";

pub const K_CPU0_MIN_FREQ_PATH: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_min_freq";
pub const K_CPU0_MAX_FREQ_PATH: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_max_freq";
pub const K_CPU0_GOVERNOR_PATH: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";

pub const K_DATA_PARTITION: &str = "/data";
