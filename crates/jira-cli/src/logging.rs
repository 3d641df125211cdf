//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: fatal failures
//! - `warn`: recoverable oddities (empty input, bootstrapped config)
//! - `info`: stage completion with counts and `duration_ms`
//! - `debug`: per-batch progress
//! - `trace`: every predicate and validator outcome, keyed by issue key

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Crates whose events follow the configured level.
const OWN_CRATES: &[&str] = &[
    "jira_audit",
    "jira_cli",
    "jira_config",
    "jira_ingest",
    "jira_model",
    "jira_report",
    "jira_rules",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Include the module path of each event.
    pub with_target: bool,
    /// Emit an event when a span closes, with its duration.
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedWriter::new(file))
    } else {
        init_logging_with_writer(config, io::stderr)
    }
}

/// Install the global subscriber writing to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> io::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(build_layer(config, writer))
        .try_init()
        .map_err(io::Error::other)
}

/// Formatting layer with its filter attached.
pub fn build_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);
    let span_events = if config.with_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target)
        .with_span_events(span_events);

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().with_filter(filter).boxed(),
        (LogFormat::Compact, true) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .with_filter(filter)
            .boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .with_filter(filter)
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).with_filter(filter).boxed(),
        (LogFormat::Pretty, false) => layer
            .with_ansi(config.with_ansi)
            .without_time()
            .with_filter(filter)
            .boxed(),
    }
}

/// Directives applying `level` to our crates and `warn` to everything else.
pub fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

/// `MakeWriter` over a writer shared behind a mutex.
#[derive(Debug)]
pub struct SharedWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> SharedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }
}

pub struct SharedWriterGuard<W> {
    inner: Arc<Mutex<W>>,
}

impl<W: Write> Write for SharedWriterGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;
        guard.flush()
    }
}

impl<'a, W: Write + 'a> MakeWriter<'a> for SharedWriter<W> {
    type Writer = SharedWriterGuard<W>;

    fn make_writer(&'a self) -> Self::Writer {
        SharedWriterGuard {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(config: &LogConfig, emit: impl FnOnce()) -> String {
        let buffer = SharedWriter::new(Vec::<u8>::new());
        let subscriber = tracing_subscriber::registry().with(build_layer(config, buffer.clone()));
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = buffer.inner.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_default_directives() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("jira_rules=debug"));
        assert!(directives.contains("jira_cli=debug"));
    }

    #[test]
    fn test_json_output_carries_fields() {
        let config = LogConfig {
            level_filter: LevelFilter::INFO,
            use_env_filter: false,
            format: LogFormat::Json,
            ..LogConfig::default()
        };
        let output = capture(&config, || {
            tracing::info!(target: "jira_cli", records = 3, "validation complete");
        });
        assert!(output.contains("\"records\":3"), "{output}");
        assert!(output.contains("validation complete"), "{output}");
    }

    #[test]
    fn test_level_filter_applies() {
        let config = LogConfig {
            level_filter: LevelFilter::WARN,
            use_env_filter: false,
            with_ansi: false,
            format: LogFormat::Compact,
            ..LogConfig::default()
        };
        let output = capture(&config, || {
            tracing::info!(target: "jira_rules", "hidden");
            tracing::warn!(target: "jira_rules", "shown");
        });
        assert!(!output.contains("hidden"));
        assert!(output.contains("shown"));
    }
}
