pub mod loop_settings;
pub mod profiles;
pub mod session;
