use clap::Parser;
use parking_lot::RwLock;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use super::types::LogLevel;

// -----------------------------------------------------------------------------
// ----- Global Singleton ------------------------------------------------------

static CLI_CONFIG: OnceLock<Arc<RwLock<CliConfig>>> = OnceLock::new();

// -----------------------------------------------------------------------------
// ----- CliConfig -------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct CliConfig {
    /// `None` reads stdin.
    pub input: Option<PathBuf>,
    pub settings_file: Option<PathBuf>,
    pub log_level: LogLevel,
    pub chunk_size: usize,
}

impl CliConfig {
    pub fn init() {
        CLI_CONFIG.get_or_init(|| {
            let cfg = Self::from_args();
            cfg.validate();
            Arc::new(RwLock::new(cfg))
        });
    }

    pub fn snapshot() -> CliConfig {
        handle().read().clone()
    }
}

// -----------------------------------------------------------------------------
// ----- CliConfig: Private ----------------------------------------------------

impl CliConfig {
    fn from_args() -> Self {
        let args = Args::try_parse().unwrap_or_else(|e| panic!("Invalid CLI/ENV: {e}"));
        Self::from(args)
    }

    fn validate(&self) {
        if let Some(path) = &self.input {
            must_exist_file(path, "--input");
        }
        if let Some(path) = &self.settings_file {
            must_exist_file(path, "--settings / ldapcrab.toml");
        }
        if self.chunk_size == 0 {
            panic!("--chunk-size must be at least 1");
        }
    }
}

impl From<Args> for CliConfig {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            settings_file: args.settings_file,
            log_level: args.log_level,
            chunk_size: args.chunk_size,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Args ------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "ldapcrab", version, about = "Streaming LDAPv3 message decoder")]
struct Args {
    // Raw BER stream. Reads stdin when absent.
    #[arg(long = "input", short = 'i', env = "LDAPCRAB_INPUT")]
    input: Option<PathBuf>,

    // Optional; built-in defaults otherwise.
    #[arg(long = "settings", env = "LDAPCRAB_SETTINGS")]
    settings_file: Option<PathBuf>,

    // Not required via CLI or ENV (defaults to info).
    #[arg(long = "log", default_value = "info")]
    log_level: LogLevel,

    // Bytes handed to the decoder per read.
    #[arg(long = "chunk-size", default_value_t = 4096)]
    chunk_size: usize,
}

// -----------------------------------------------------------------------------
// ----- Private Utils ---------------------------------------------------------

fn handle() -> Arc<RwLock<CliConfig>> {
    CLI_CONFIG
        .get()
        .expect("cli config not initialized; call Config::init().await first")
        .clone()
}

fn must_exist_file(path: &Path, hint: &str) {
    let md = fs::metadata(path).unwrap_or_else(|_| {
        panic!("required file missing: {} (from {hint})", path.display());
    });

    if !md.is_file() {
        panic!("path is not a file: {} (from {hint})", path.display());
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CliConfig::from(Args::try_parse_from(["ldapcrab"]).unwrap());
        assert_eq!(cfg.input, None);
        assert_eq!(cfg.settings_file, None);
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.chunk_size, 4096);
    }

    #[test]
    fn explicit_flags() {
        let args = Args::try_parse_from([
            "ldapcrab",
            "--input",
            "capture.ber",
            "--log",
            "trace",
            "--chunk-size",
            "1",
        ])
        .unwrap();
        let cfg = CliConfig::from(args);
        assert_eq!(cfg.input, Some(PathBuf::from("capture.ber")));
        assert_eq!(cfg.log_level, LogLevel::Trace);
        assert_eq!(cfg.chunk_size, 1);
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
