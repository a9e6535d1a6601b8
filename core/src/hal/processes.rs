//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::config::loop_settings::MAX_CMDLINE_BYTES;

use std::{fs, io, path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppProcess {
    pub pid: u32,
    pub name: String,
    pub oom_score_adj: i32,
}

fn read_process_name(pid_dir: &path::Path) -> Option<String> {
    let mut buf = [0u8; MAX_CMDLINE_BYTES];
    let mut f = fs::File::open(pid_dir.join("cmdline")).ok()?;
    let n = io::Read::read(&mut f, &mut buf).ok()?;
    if n == 0 {
        return None;
    }
    let slice = &buf[..n];
    let name = slice.split(|&b| b == 0).next().unwrap_or(slice);
    let name = std::str::from_utf8(name).ok()?;
    let name = name.split(':').next().unwrap_or(name);
    // Application processes run under their package name.
    name.contains('.').then(|| name.to_string())
}

fn read_oom_score_adj(pid_dir: &path::Path) -> Option<i32> {
    fs::read_to_string(pid_dir.join("oom_score_adj"))
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Application processes found under `proc_root`. Entries that vanish while
/// scanning are skipped.
pub fn list_app_processes(proc_root: &path::Path) -> Vec<AppProcess> {
    let mut processes = Vec::new();
    let Ok(entries) = fs::read_dir(proc_root) else {
        log::warn!("Processes: cannot read {}", proc_root.display());
        return processes;
    };
    for entry in entries.flatten() {
        let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse::<u32>().ok()) else {
            continue;
        };
        let pid_dir = entry.path();
        if let Some(name) = read_process_name(&pid_dir)
            && let Some(oom_score_adj) = read_oom_score_adj(&pid_dir)
        {
            processes.push(AppProcess {
                pid,
                name,
                oom_score_adj,
            });
        }
    }
    processes
}

pub fn kill(pid: u32) -> Result<(), BoostError> {
    let raw = i32::try_from(pid)
        .map_err(|_| BoostError::InvalidInput(format!("pid out of range: {pid}")))?;
    let pid = rustix::process::Pid::from_raw(raw)
        .ok_or_else(|| BoostError::InvalidInput("pid 0".into()))?;
    rustix::process::kill_process(pid, rustix::process::Signal::KILL)?;
    Ok(())
}
