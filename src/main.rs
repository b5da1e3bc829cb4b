use std::process::ExitCode;
use tokio::fs::File;
use tokio::io::{self, AsyncRead, AsyncReadExt};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use ldapcrab::{Config, LdapDecoder};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const APP_NAME: &str = "🦀 ldapcrab";

// -----------------------------------------------------------------------------
// ----- Main ------------------------------------------------------------------

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    setup().await;
    run().await
}

// -----------------------------------------------------------------------------
// ----- Setup -----------------------------------------------------------------

async fn setup() {
    // This has to be the first thing we do, because it initializes the config
    Config::init().await;

    init_tracing();
}

fn init_tracing() {
    let config = Config::snapshot();
    let filter = EnvFilter::try_new(config.log_level.as_str())
        .unwrap_or_else(|e| panic!("invalid log filter: {e}"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// -----------------------------------------------------------------------------
// ----- Run -------------------------------------------------------------------

async fn run() -> std::io::Result<ExitCode> {
    let config = Config::snapshot();

    let mut reader: Box<dyn AsyncRead + Unpin> = match &config.input {
        Some(path) => Box::new(File::open(path).await?),
        None => Box::new(io::stdin()),
    };

    info!(
        input = ?config.input,
        chunk_size = config.chunk_size,
        "{} decoding",
        APP_NAME
    );

    let mut decoder = LdapDecoder::new(&config.decoder);
    let mut chunk = vec![0u8; config.chunk_size];
    let mut decoded = 0usize;
    let mut failures = 0usize;

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        decoder.feed(&chunk[..n]);

        loop {
            match decoder.next() {
                Ok(Some(message)) => {
                    decoded += 1;
                    println!("{message:?}");
                }
                Ok(None) => break,
                Err(failure) => {
                    failures += 1;
                    error!(
                        result_code = %failure.result_code(),
                        response = ?failure.response_kind(),
                        "decode failed: {failure}"
                    );
                }
            }
        }
    }

    if !decoder.is_idle() {
        failures += 1;
        error!(
            buffered = decoder.buffered(),
            "input ended in the middle of a message"
        );
    }

    info!(decoded, failures, "{} done", APP_NAME);

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
