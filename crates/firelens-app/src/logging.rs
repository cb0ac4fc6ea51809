//! Logging setup
//!
//! The console gets human-readable output; the log directory gets one JSON
//! object per line, rotated daily. `RUST_LOG` takes precedence over the
//! configured filter.

use anyhow::Context;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, registry::LookupSpan,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "firelens.log";

const DEBUG_CRATES: &[&str] = &[
    "firelens_app",
    "firelens_core",
    "firelens_drivers",
    "firelens_driver_firestore",
    "firelens_driver_memory",
    "firelens_connection",
    "firelens_table",
    "firelens_editor",
    "firelens_interchange",
    "firelens_services",
];

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    /// Write rotated JSON files into `log_dir`
    pub json_files: bool,
    pub console: bool,
    /// Include source file and line
    pub include_location: bool,
    /// Emit span open/close events, which carry their busy/idle time
    pub span_timings: bool,
    /// Used when `RUST_LOG` is unset or invalid
    pub default_filter: String,
}

impl LoggingConfig {
    /// Verbose console plus JSON files, everything of ours at debug
    pub fn development() -> Self {
        let ours: Vec<String> = DEBUG_CRATES.iter().map(|c| format!("{c}=debug")).collect();
        Self {
            log_dir: log_directory(),
            json_files: true,
            console: true,
            include_location: true,
            span_timings: true,
            default_filter: format!("info,{}", ours.join(",")),
        }
    }

    /// JSON files only; warnings from dependencies, info from the services
    pub fn production() -> Self {
        Self {
            log_dir: log_directory(),
            json_files: true,
            console: false,
            include_location: false,
            span_timings: false,
            default_filter: "warn,firelens_app=info,firelens_services=info,firelens_connection=info"
                .to_string(),
        }
    }

    /// Console only
    pub fn testing() -> Self {
        Self {
            log_dir: std::env::temp_dir().join("firelens-tests"),
            json_files: false,
            console: true,
            include_location: true,
            span_timings: false,
            default_filter: "debug".to_string(),
        }
    }

    /// The preset matching the build profile
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_timings {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Keeps the background file writer alive; dropping it flushes pending lines
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_writer: Option<WorkerGuard>,
}

fn console_layer<S>(config: &LoggingConfig) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(config.span_events())
        .with_filter(config.env_filter())
        .boxed()
}

fn json_file_layer<S>(config: &LoggingConfig) -> anyhow::Result<(BoxedLayer<S>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_span_events(config.span_events())
        .with_writer(writer)
        .with_filter(config.env_filter())
        .boxed();

    Ok((layer, guard))
}

/// Install the global subscriber.
///
/// Fails when the log directory can't be created or a global subscriber is
/// already installed. Hold the returned guard until exit.
pub fn init(config: LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let mut layers = Vec::new();
    let mut file_writer = None;

    if config.console {
        layers.push(console_layer(&config));
    }
    if config.json_files {
        let (layer, guard) = json_file_layer(&config)?;
        layers.push(layer);
        file_writer = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        log_dir = %config.log_dir.display(),
        json_files = config.json_files,
        console = config.console,
        "logging initialized"
    );

    Ok(LoggingGuard {
        _file_writer: file_writer,
    })
}

pub fn init_default() -> anyhow::Result<LoggingGuard> {
    init(LoggingConfig::for_build())
}

/// `<data dir>/firelens/logs`, or `./logs` when no data directory is known
pub fn log_directory() -> PathBuf {
    firelens_settings::logs_dir().unwrap_or_else(|_| PathBuf::from("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_filter_covers_every_crate() {
        let config = LoggingConfig::development();
        assert!(config.console && config.json_files);
        for name in DEBUG_CRATES {
            assert!(config.default_filter.contains(&format!("{name}=debug")));
        }
    }

    #[test]
    fn test_production_config() {
        let config = LoggingConfig::production();
        assert!(!config.console);
        assert!(config.json_files);
        assert!(!config.include_location);
    }

    #[test]
    fn test_init_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            json_files: true,
            ..LoggingConfig::testing()
        }
        .with_log_dir(dir.path().join("logs"));

        let guard = init(config.clone()).unwrap();
        tracing::info!("first line");
        assert!(dir.path().join("logs").is_dir());

        assert!(init(config).is_err());
        drop(guard);
    }
}
