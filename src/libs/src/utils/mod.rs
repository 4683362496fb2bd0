// This expose the setup helpers directly in utils
pub use cli::read_json_arg;
pub use config::setup_config;
pub use logger::setup_logger;
pub use wait::{wait_until, WaitPolicy};

pub mod cli;
pub mod config;
pub mod logger;
pub mod wait;
