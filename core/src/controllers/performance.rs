//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::config::loop_settings::VISIBLE_APP_ADJ;
use crate::config::profiles::{
    self, ANIMATIONS_OFF, ANIMATIONS_ON, BOOST_PROFILE, GAME_PROFILE, NORMAL_PROFILE,
};
use crate::controllers::telemetry_impl::{TelemetryRefresher, TelemetrySnapshot};
use crate::controllers::tuner::SystemTuner;
use crate::daemon::runtime;
use crate::daemon::state::ShutdownSignal;
use crate::hal::processes::{self, AppProcess};
use crate::monitors::system_info::{self, DeviceInfo, TelemetryPaths, TelemetryReader};

use std::sync::{self, atomic};
use std::{path, thread};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCleanOutcome {
    Cleaned,
    Failed,
    RootRequired,
}

struct Worker {
    signal: ShutdownSignal,
    handle: thread::JoinHandle<()>,
}

impl Worker {
    fn stop(self, name: &str) {
        self.signal.cancel();
        if let Err(e) = self.handle.join() {
            log::error!("PerformanceManager: {name} worker panicked: {e:?}");
        }
    }
}

fn take_worker(slot: &sync::Mutex<Option<Worker>>) -> Option<Worker> {
    match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

fn store_worker(slot: &sync::Mutex<Option<Worker>>, worker: Worker) {
    match slot.lock() {
        Ok(mut guard) => *guard = Some(worker),
        Err(poisoned) => *poisoned.into_inner() = Some(worker),
    }
}

/// Background app processes that may be killed: above the visible
/// oom adjustment, not protected, not ourselves.
pub fn select_background_victims(candidates: Vec<AppProcess>, own_pid: u32) -> Vec<AppProcess> {
    candidates
        .into_iter()
        .filter(|p| {
            p.pid != own_pid
                && p.oom_score_adj > VISIBLE_APP_ADJ
                && !profiles::is_protected_package(&p.name)
        })
        .collect()
}

/// Other apps' processes belong to other uids, so the kill goes through
/// the root shell whenever it is available.
fn kill_background_processes(tuner: &SystemTuner, proc_root: &path::Path) -> usize {
    let victims =
        select_background_victims(processes::list_app_processes(proc_root), std::process::id());
    let total = victims.len();
    if total == 0 {
        return 0;
    }
    let killed = if tuner.executor().is_elevated() {
        let pids: Vec<u32> = victims.iter().map(|v| v.pid).collect();
        tuner.kill_processes(&pids)
    } else {
        victims
            .iter()
            .filter(|victim| match processes::kill(victim.pid) {
                Ok(()) => true,
                Err(e) => {
                    log::debug!("PerformanceManager: kill {} ({}) failed: {e}", victim.pid, victim.name);
                    false
                }
            })
            .count()
    };
    if killed < total {
        log::warn!("PerformanceManager: Killed only {killed}/{total} background processes.");
    } else {
        log::info!("PerformanceManager: Killed {killed} background processes.");
    }
    killed
}

/// User-facing actions on top of the tuner and the telemetry reader.
pub struct PerformanceManager {
    tuner: SystemTuner,
    paths: TelemetryPaths,
    game_mode_active: atomic::AtomicBool,
    boost: sync::Mutex<Option<Worker>>,
    refresh: sync::Mutex<Option<Worker>>,
}

impl PerformanceManager {
    pub fn new(tuner: SystemTuner, paths: TelemetryPaths) -> Self {
        Self {
            tuner,
            paths,
            game_mode_active: atomic::AtomicBool::new(false),
            boost: sync::Mutex::new(None),
            refresh: sync::Mutex::new(None),
        }
    }

    pub fn tuner(&self) -> &SystemTuner {
        &self.tuner
    }

    pub fn root_status(&self) -> bool {
        self.tuner.executor().is_elevated()
    }

    pub fn clean_ram(&self) -> usize {
        kill_background_processes(&self.tuner, &self.paths.proc_root)
    }

    pub fn clean_system_cache(&self) -> CacheCleanOutcome {
        if !self.root_status() {
            log::info!("PerformanceManager: Cache clean needs root.");
            return CacheCleanOutcome::RootRequired;
        }
        if self.tuner.wipe_system_caches() {
            CacheCleanOutcome::Cleaned
        } else {
            CacheCleanOutcome::Failed
        }
    }

    pub fn is_game_mode_active(&self) -> bool {
        self.game_mode_active.load(atomic::Ordering::Acquire)
    }

    pub fn toggle_game_mode(&self) -> bool {
        let active = !self.game_mode_active.fetch_xor(true, atomic::Ordering::AcqRel);
        if active {
            log::info!("PerformanceManager: Game mode ON.");
            self.tuner.apply_profile(GAME_PROFILE);
            self.close_background_apps();
            self.tuner.set_animation_scale(ANIMATIONS_OFF);
        } else {
            log::info!("PerformanceManager: Game mode OFF.");
            self.tuner.apply_profile(NORMAL_PROFILE);
            self.tuner.set_animation_scale(ANIMATIONS_ON);
        }
        active
    }

    fn close_background_apps(&self) -> bool {
        let packages: Vec<String> = self
            .tuner
            .list_third_party_packages()
            .into_iter()
            .filter(|pkg| !profiles::is_protected_package(pkg))
            .collect();
        self.tuner.kill_background_packages(&packages)
    }

    pub fn start_boost(&self) -> Result<(), BoostError> {
        if let Some(previous) = take_worker(&self.boost) {
            previous.stop("Boost");
        }
        let signal = ShutdownSignal::new();
        let worker_signal = signal.clone();
        let tuner = self.tuner.clone();
        let proc_root = self.paths.proc_root.clone();
        let handle = thread::Builder::new()
            .name("Boost".into())
            .stack_size(256 * 1024)
            .spawn(move || {
                kill_background_processes(&tuner, &proc_root);
                if worker_signal.is_cancelled() || !tuner.executor().is_elevated() {
                    return;
                }
                tuner.wipe_system_caches();
                if worker_signal.is_cancelled() {
                    log::info!("PerformanceManager: Boost cancelled before frequency change.");
                    return;
                }
                tuner.apply_profile(BOOST_PROFILE);
            })
            .map_err(|e| BoostError::SystemCheckFailed(format!("Failed to spawn boost thread: {e}")))?;
        store_worker(&self.boost, Worker { signal, handle });
        Ok(())
    }

    pub fn stop_boost(&self) {
        if let Some(worker) = take_worker(&self.boost) {
            worker.stop("Boost");
        }
        if self.root_status() {
            self.tuner.apply_profile(NORMAL_PROFILE);
        }
    }

    /// Starts the periodic telemetry refresh, replacing a running one.
    pub fn start_refresh(&self, tx: sync::mpsc::Sender<TelemetrySnapshot>) -> Result<(), BoostError> {
        if let Some(previous) = take_worker(&self.refresh) {
            previous.stop("TelemetryLoop");
        }
        let signal = ShutdownSignal::new();
        let refresher = TelemetryRefresher::new(
            TelemetryReader::new(self.paths.clone()),
            self.tuner.clone(),
            tx,
        );
        let handle = runtime::spawn_periodic("TelemetryLoop", Box::new(refresher), signal.clone())?;
        store_worker(&self.refresh, Worker { signal, handle });
        Ok(())
    }

    pub fn stop_refresh(&self) {
        if let Some(worker) = take_worker(&self.refresh) {
            worker.stop("TelemetryLoop");
        }
    }

    pub fn running_process_count(&self) -> usize {
        processes::list_app_processes(&self.paths.proc_root).len()
    }

    pub fn device_info(&self) -> DeviceInfo {
        system_info::read_device_info()
    }

    /// Teardown: stops the refresh loop, cancels boost and restores
    /// the normal frequency range.
    pub fn shutdown(&self) {
        log::info!("PerformanceManager: Shutting down...");
        self.stop_refresh();
        self.stop_boost();
    }
}
