use parking_lot::RwLock;
use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use super::{cli::CliConfig, settings::Settings, types::LogLevel};
use crate::decoder::DecoderConfig;

// -----------------------------------------------------------------------------
// ----- Global Singleton ------------------------------------------------------

static ROOT_CONFIG: OnceLock<Arc<RwLock<Config>>> = OnceLock::new();

// -----------------------------------------------------------------------------
// ----- Config ----------------------------------------------------------------

/// Process-wide settings for the binary. The library itself only ever sees
/// the `DecoderConfig` handed to it.
#[derive(Clone, Debug)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub log_level: LogLevel,
    pub chunk_size: usize,
    pub decoder: DecoderConfig,
}

// -----------------------------------------------------------------------------
// ----- Config: Static --------------------------------------------------------

impl Config {
    /// Async because the settings file is read with non-blocking IO.
    pub async fn init() {
        CliConfig::init();

        Self::load().await;
    }

    pub fn snapshot() -> Config {
        Self::handle().read().clone()
    }
}

// -----------------------------------------------------------------------------
// ----- Config: Private -------------------------------------------------------

impl Config {
    async fn load() {
        let cli = CliConfig::snapshot();

        let settings = match &cli.settings_file {
            Some(path) => Settings::from_file_async(path)
                .await
                .unwrap_or_else(|e| panic!("failed to load settings from {:?}: {e}", path)),
            None => Settings::default(),
        };

        let next = Config {
            input: cli.input,
            log_level: cli.log_level,
            chunk_size: cli.chunk_size,
            decoder: settings.decoder_config(),
        };

        if let Some(handle) = ROOT_CONFIG.get() {
            *handle.write() = next;
        } else {
            let _ = ROOT_CONFIG.set(Arc::new(RwLock::new(next)));
        }
    }

    fn handle() -> Arc<RwLock<Config>> {
        ROOT_CONFIG
            .get()
            .expect("Config not initialized; call Config::init().await first")
            .clone()
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
