pub mod logging;
pub mod runtime;
pub mod state;
pub mod traits;
