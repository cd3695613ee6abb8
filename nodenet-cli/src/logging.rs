//! Diagnostics for the `nodenet` binary.
//!
//! Spans and events from the command pipeline and from `nodenet-core` are
//! written to stderr, leaving stdout to the network summary. Records sent
//! through the `log` facade are forwarded into the same subscriber.

use std::{env::VarError, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Variable choosing between `human` and `json` diagnostics.
pub const LOG_FORMAT_ENV: &str = "NODENET_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset or unparsable.
const FALLBACK_FILTER: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Rendering of diagnostics on stderr.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Text lines, one per event or closed span.
    #[default]
    Human,
    /// Newline-delimited JSON carrying the enclosing `cli.*` and `core.*`
    /// spans of every event.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat { value }),
        }
    }
}

impl LogFormat {
    /// Reads the format from [`LOG_FORMAT_ENV`].
    ///
    /// # Errors
    /// Returns [`LoggingError`] when the variable is set to something other
    /// than `human` or `json`.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Reads the format through `lookup`, treating an unset variable as
    /// [`LogFormat::Human`].
    ///
    /// # Errors
    /// Returns [`LoggingError::FormatNotUnicode`] for a non-UTF-8 value and
    /// [`LoggingError::UnknownFormat`] for an unrecognised one.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Result<String, VarError>,
    ) -> Result<Self, LoggingError> {
        match lookup(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse(),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(LoggingError::FormatNotUnicode {
                variable: LOG_FORMAT_ENV,
            }),
        }
    }
}

/// Reasons the `nodenet` binary could not set up its diagnostics.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `NODENET_LOG_FORMAT` was set to bytes that are not UTF-8.
    #[error("`{variable}` is not valid UTF-8")]
    FormatNotUnicode {
        /// Variable that was read.
        variable: &'static str,
    },
    /// `NODENET_LOG_FORMAT` named neither `human` nor `json`.
    #[error("`{value}` is not a log format; use `human` or `json`")]
    UnknownFormat {
        /// Trimmed, lowercased value that was rejected.
        value: String,
    },
    /// A global subscriber was already registered.
    #[error("diagnostics subscriber not registered: {0}")]
    SubscriberInstall(#[from] tracing_subscriber::util::TryInitError),
}

/// Sets up diagnostics for the process; later calls do nothing.
///
/// `RUST_LOG` controls verbosity and falls back to `info`. When a subscriber
/// is already registered, for instance by a test harness, it stays in place
/// and the call still succeeds.
///
/// # Errors
/// Returns [`LoggingError::FormatNotUnicode`] or
/// [`LoggingError::UnknownFormat`] when [`LOG_FORMAT_ENV`] is unusable.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let format = LogFormat::from_env()?;
    if let Err(LoggingError::SubscriberInstall(source)) = install_subscriber(format) {
        tracing::debug!(%source, "reusing registered subscriber");
    }
    INSTALLED.get_or_init(|| ());
    Ok(())
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let output = match format {
        LogFormat::Human => stderr.boxed(),
        LogFormat::Json => stderr
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    if LogTracer::init().is_err() {
        tracing::debug!("log records already forwarded elsewhere");
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()?;
    Ok(())
}
