pub mod executor;
pub mod monitored_file;
pub mod processes;
pub mod properties;
pub mod shell;
pub mod thermal;
