pub mod performance;
pub mod telemetry_impl;
pub mod tuner;
