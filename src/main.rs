// Platinum Lookup - command-line front end
//
// The lookup tool itself lives in the library and runs inside a game client
// host. This binary wraps it for use outside the client:
// - config: manage ~/.config/platinum-lookup/config.toml
// - url: build a lookup link for a display name
// - replay: drive the plugin over a scripted session against a simulated host

use anyhow::Result;
use clap::Parser;
use platinum_lookup::cli::{self, Cli, Commands};
use platinum_lookup::config::{Config, LogRotation, LoggingConfig};
use platinum_lookup::logging::{LogBuffer, NoteLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the config file is broken
    if let Commands::Config {
        show,
        reset,
        edit,
        update,
        path,
    } = cli.command
    {
        return cli::handle_config(show, reset, edit, update, path);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env()?;

    let notes = LogBuffer::new();
    // Kept alive until exit so buffered file logs flush
    let _file_guard = init_tracing(&config.logging, &notes);

    tracing::debug!(version = platinum_lookup::config::VERSION, "Starting");

    match cli.command {
        Commands::Url { name } => cli::handle_url(&config, &name),
        Commands::Replay { script, out } => {
            cli::handle_replay(&config, &script, out.as_deref(), &notes)
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// Install the global subscriber.
///
/// Human-readable output goes to stderr so replay JSONL on stdout stays clean.
/// Precedence for the filter: RUST_LOG env var > config file > "info".
fn init_tracing(logging: &LoggingConfig, notes: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("platinum_lookup={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };
                // Writes happen on a background thread
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(NoteLayer::new(notes.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
