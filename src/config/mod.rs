pub mod cli;
pub mod config;
pub mod settings;
pub mod types;

pub use cli::CliConfig;
pub use config::Config;
pub use settings::{Settings, SettingsError};
pub use types::LogLevel;
