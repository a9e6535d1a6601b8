//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::BoostError;
use crate::config::loop_settings::REFRESH_INTERVAL_MS;

#[derive(Debug, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Stop,
}

pub trait TickHandler: Send {
    fn on_tick(&mut self) -> Result<LoopAction, BoostError>;
    fn interval_ms(&self) -> u64 {
        REFRESH_INTERVAL_MS
    }
}
