//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::daemon::state::ShutdownSignal;
use crate::daemon::traits::{LoopAction, TickHandler};

use std::thread;
use std::time::Duration;

/// Drives `handler` until it asks to stop or `signal` is cancelled.
///
/// The first tick runs immediately. Each following tick is scheduled only
/// after the previous one finished, so a slow tick delays the next one.
pub fn run_periodic(name: &str, handler: &mut dyn TickHandler, signal: &ShutdownSignal) -> u64 {
    let mut ticks = 0u64;
    while !signal.is_cancelled() {
        ticks += 1;
        match handler.on_tick() {
            Ok(LoopAction::Continue) => {}
            Ok(LoopAction::Stop) => {
                log::info!("Runtime [{name}]: Handler requested stop after {ticks} ticks.");
                break;
            }
            Err(e) => log::warn!("Runtime [{name}]: Tick error ({}): {e}", e.cause()),
        }
        if signal.wait_timeout(Duration::from_millis(handler.interval_ms())) {
            break;
        }
    }
    log::debug!("Runtime [{name}]: Loop finished.");
    ticks
}

pub fn spawn_periodic(
    name: &'static str,
    mut handler: Box<dyn TickHandler>,
    signal: ShutdownSignal,
) -> Result<thread::JoinHandle<()>, BoostError> {
    thread::Builder::new()
        .name(name.into())
        .stack_size(256 * 1024)
        .spawn(move || {
            run_periodic(name, handler.as_mut(), &signal);
        })
        .map_err(|e| BoostError::SystemCheckFailed(format!("Failed to spawn {name} thread: {e}")))
}
