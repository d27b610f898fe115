//! Logger built on `tracing-subscriber`.
//!
//! - Console output, colored only on a terminal
//! - File output in full, compact or JSON format
//! - Size, daily or hourly rotation with optional gzip compression

pub mod compression;
pub mod config;
pub mod error;
pub mod rotation;
pub(crate) mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig, RotationStrategy};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use writer::RotatingFileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logger(config: &LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // The file layer goes first so console ANSI settings never leak into span
    // fields written to the file (tokio-rs/tracing#1817).
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.file.enabled {
        layers.push(file_layer(config)?);
    }
    if config.console.enabled {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        layers.push(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::Init {
            message: e.to_string(),
        })
}

fn file_layer(config: &LoggerConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = RotatingFileWriter::new(&config.file)?;
    let base = fmt::layer().with_ansi(false).with_target(true);

    Ok(match config.file.format {
        LogFormat::Full => base.with_writer(writer).boxed(),
        LogFormat::Compact => base.compact().with_writer(writer).boxed(),
        LogFormat::Json => base.json().with_writer(writer).boxed(),
    })
}
