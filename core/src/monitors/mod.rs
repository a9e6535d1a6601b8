pub mod cpu_monitor;
pub mod memory_monitor;
pub mod storage_monitor;
pub mod system_info;
