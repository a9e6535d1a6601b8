//! Author: [Seclususs](https://github.com/seclususs)

mod common;

use common::{RecordingShell, ok, tuner};

use titan_booster::controllers::performance::{CacheCleanOutcome, PerformanceManager};
use titan_booster::controllers::telemetry_impl::TelemetryRefresher;
use titan_booster::daemon::runtime;
use titan_booster::daemon::state::ShutdownSignal;
use titan_booster::monitors::system_info::{TelemetryPaths, TelemetryReader};

use std::sync::mpsc;
use std::{fs, sync, thread, time};

fn fake_device(dir: &std::path::Path) -> TelemetryPaths {
    fs::write(dir.join("stat"), "cpu  300 0 100 600 0 0 0\ncpu0 300 0 100 600\n").unwrap();
    fs::write(
        dir.join("meminfo"),
        "MemTotal:        8388608 kB\nMemFree:          100000 kB\nMemAvailable:    2097152 kB\n",
    )
    .unwrap();
    fs::write(dir.join("scaling_cur_freq"), "2016000\n").unwrap();
    fs::write(dir.join("battery_temp"), "298\n").unwrap();
    fs::create_dir_all(dir.join("proc")).unwrap();
    TelemetryPaths {
        proc_stat: dir.join("stat"),
        meminfo: dir.join("meminfo"),
        proc_root: dir.join("proc"),
        cpu_temp: dir.join("missing_temp"),
        cpu_freq: dir.join("scaling_cur_freq"),
        battery_temp: dir.join("battery_temp"),
        data_partition: dir.to_path_buf(),
    }
}

#[test]
fn cache_clean_reports_root_required_without_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::denied();
    let manager = PerformanceManager::new(tuner(&shell), fake_device(dir.path()));

    assert_eq!(manager.clean_system_cache(), CacheCleanOutcome::RootRequired);
    assert!(shell.scripts().is_empty());

    shell.set_granted(true);
    assert_eq!(manager.clean_system_cache(), CacheCleanOutcome::Cleaned);
    assert_eq!(shell.batches()[0].last().map(String::as_str), Some("sync"));
}

#[test]
fn game_mode_toggles_profiles_and_closes_background_apps() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::with_responder(true, |script| {
        if script == "pm list packages -3" {
            ok(&["package:org.game", "package:com.android.chrome", "package:org.chat"])
        } else {
            ok(&[])
        }
    });
    let manager = PerformanceManager::new(tuner(&shell), fake_device(dir.path()));

    assert!(manager.toggle_game_mode());
    assert!(manager.is_game_mode_active());
    let on = shell.batches();
    assert_eq!(on.len(), 4);
    assert!(on[0][0].ends_with("echo 1800000 > /sys/devices/system/cpu/cpu0/cpufreq/scaling_min_freq"));
    assert!(on[0][1].starts_with("echo 2500000 "));
    assert_eq!(on[1], vec!["pm list packages -3"]);
    assert_eq!(on[2], vec!["am kill org.game", "am kill org.chat"]);
    assert!(on[3].iter().all(|c| c.ends_with(" 0")));

    assert!(!manager.toggle_game_mode());
    assert!(!manager.is_game_mode_active());
    let all = shell.batches();
    let off = &all[4..];
    assert_eq!(off.len(), 2);
    assert!(off[0][0].starts_with("echo 300000 "));
    assert!(off[0][1].starts_with("echo 1800000 "));
    assert!(off[1].iter().all(|c| c.ends_with(" 1")));
}

#[test]
fn boost_wipes_caches_then_applies_boost_profile() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::granted();
    let manager = PerformanceManager::new(tuner(&shell), fake_device(dir.path()));

    manager.start_boost().unwrap();
    let deadline = time::Instant::now() + time::Duration::from_secs(5);
    while shell.scripts().len() < 2 && time::Instant::now() < deadline {
        std::thread::sleep(time::Duration::from_millis(10));
    }
    manager.stop_boost();

    let batches = shell.batches();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].last().map(String::as_str), Some("sync"));
    assert!(batches[1][1].starts_with("echo 2300000 "));
    assert!(batches[2][0].starts_with("echo 300000 "));
}

#[test]
fn stopping_boost_during_cache_wipe_skips_boost_profile() {
    let dir = tempfile::tempdir().unwrap();
    let (entered_tx, entered_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered_tx = sync::Mutex::new(entered_tx);
    let release_rx = sync::Mutex::new(release_rx);
    let shell = RecordingShell::with_responder(true, move |script| {
        if script.ends_with("sync") {
            let _ = entered_tx.lock().unwrap().send(());
            let _ = release_rx
                .lock()
                .unwrap()
                .recv_timeout(time::Duration::from_secs(5));
        }
        ok(&[])
    });
    let manager = PerformanceManager::new(tuner(&shell), fake_device(dir.path()));

    manager.start_boost().unwrap();
    entered_rx.recv_timeout(time::Duration::from_secs(5)).unwrap();
    thread::scope(|s| {
        let stopper = s.spawn(|| manager.stop_boost());
        thread::sleep(time::Duration::from_millis(200));
        release_tx.send(()).unwrap();
        stopper.join().unwrap();
    });

    let batches = shell.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].last().map(String::as_str), Some("sync"));
    assert!(batches[1][0].starts_with("echo 300000 "));
    assert!(batches.iter().flatten().all(|c| !c.starts_with("echo 2300000 ")));
}

#[test]
fn clean_ram_kills_through_root_shell() {
    let dir = tempfile::tempdir().unwrap();
    let paths = fake_device(dir.path());
    let pid_dir = paths.proc_root.join("4000001");
    fs::create_dir_all(&pid_dir).unwrap();
    fs::write(pid_dir.join("cmdline"), b"org.cached.app\0").unwrap();
    fs::write(pid_dir.join("oom_score_adj"), "905\n").unwrap();
    let visible_dir = paths.proc_root.join("4000002");
    fs::create_dir_all(&visible_dir).unwrap();
    fs::write(visible_dir.join("cmdline"), b"org.visible.app\0").unwrap();
    fs::write(visible_dir.join("oom_score_adj"), "0\n").unwrap();

    let shell = RecordingShell::with_responder(true, |script| {
        if script.starts_with("kill -9 4000001") {
            ok(&["4000001"])
        } else {
            ok(&[])
        }
    });
    let manager = PerformanceManager::new(tuner(&shell), paths);

    assert_eq!(manager.running_process_count(), 2);
    assert_eq!(manager.clean_ram(), 1);
    assert_eq!(
        shell.scripts(),
        vec!["kill -9 4000001 2>/dev/null && echo 4000001\ntrue".to_string()]
    );
}

#[test]
fn boost_without_root_dispatches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::denied();
    let manager = PerformanceManager::new(tuner(&shell), fake_device(dir.path()));

    manager.start_boost().unwrap();
    manager.stop_boost();
    assert!(shell.scripts().is_empty());
    assert_eq!(manager.clean_ram(), 0);
    assert_eq!(manager.running_process_count(), 0);
}

#[test]
fn refresher_publishes_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::with_responder(true, |_| ok(&["41500"]));
    let (tx, rx) = sync::mpsc::channel();
    let refresher = TelemetryRefresher::new(
        TelemetryReader::new(fake_device(dir.path())),
        tuner(&shell),
        tx,
    );
    let signal = ShutdownSignal::new();
    let handle = runtime::spawn_periodic("TestTelemetry", Box::new(refresher), signal.clone()).unwrap();

    let snapshot = rx.recv_timeout(time::Duration::from_secs(5)).unwrap();
    signal.cancel();
    handle.join().unwrap();

    assert!((snapshot.cpu_usage_percent - 40.0).abs() < 0.01);
    assert_eq!(snapshot.cpu_temperature, "41.5°C");
    assert!((snapshot.ram_usage_percent - 75.0).abs() < 0.01);
    assert!((snapshot.total_ram_gb - 8.0).abs() < 0.001);
    assert!((snapshot.free_ram_gb - 2.0).abs() < 0.001);
    assert!((snapshot.cpu_frequency_ghz - 2.016).abs() < 0.001);
    assert!((snapshot.battery_temperature_celsius - 29.8).abs() < 0.001);
    assert!(snapshot.storage_total_gb > 0.0);
    assert_eq!(snapshot.running_processes, 0);
}

#[test]
fn refresher_stops_when_nobody_listens() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::denied();
    let (tx, rx) = sync::mpsc::channel();
    drop(rx);
    let mut refresher = TelemetryRefresher::new(
        TelemetryReader::new(fake_device(dir.path())),
        tuner(&shell),
        tx,
    );
    let ticks = runtime::run_periodic("TestTelemetry", &mut refresher, &ShutdownSignal::new());
    assert_eq!(ticks, 1);
}

#[test]
fn unknown_temperature_without_root() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::denied();
    let (tx, _rx) = sync::mpsc::channel();
    let mut refresher = TelemetryRefresher::new(
        TelemetryReader::new(fake_device(dir.path())),
        tuner(&shell),
        tx,
    );
    assert_eq!(refresher.sample().cpu_temperature, "unknown");
}

#[test]
fn manager_refresh_loop_can_be_restarted_and_stopped() {
    let dir = tempfile::tempdir().unwrap();
    let shell = RecordingShell::denied();
    let manager = PerformanceManager::new(tuner(&shell), fake_device(dir.path()));

    let (tx, rx) = sync::mpsc::channel();
    manager.start_refresh(tx.clone()).unwrap();
    manager.start_refresh(tx).unwrap();
    assert!(rx.recv_timeout(time::Duration::from_secs(5)).is_ok());
    manager.shutdown();

    while rx.try_recv().is_ok() {}
    assert!(rx.recv_timeout(time::Duration::from_millis(100)).is_err());
}
