//! Logging setup for the popup.
//!
//! Host builds log to stderr (pretty in debug builds, JSON in release); wasm builds write
//! each formatted event to the browser console without timestamps.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Default logging directive when nothing more specific is configured.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// `EnvFilter` directive applied when `RUST_LOG` is unset.
    pub level: &'a str,
    /// Output format for host builds.
    pub format: LogFormat,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the directive is invalid or another subscriber is already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    let env_filter = env_filter(config.level)?;
    let builder = fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the directive is invalid or another subscriber is already installed.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    fmt::fmt()
        .with_env_filter(env_filter(config.level)?)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(console::ConsoleWriter::default)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

fn env_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| anyhow!("invalid log directive {level:?}: {err}"))
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    /// Buffers one formatted event and emits it to the console when dropped.
    #[derive(Default)]
    pub(super) struct ConsoleWriter {
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buffer);
            let line = line.trim_end();
            if !line.is_empty() {
                gloo::console::log!(line);
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::{LogFormat, LoggingConfig, env_filter};

    #[test]
    fn default_config_uses_info_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::infer());
    }

    #[test]
    fn env_filter_accepts_level_directive() {
        assert!(env_filter("cvd_popup=debug").is_ok());
    }
}
