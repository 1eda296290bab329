//! Logging config and subscriber layer setup

mod format_style;
mod log_rotation_kind;

use std::path::PathBuf;

pub use format_style::FormatStyle;
pub use log_rotation_kind::LogRotationKind;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer as LayerTrait, Registry};

/// Prefix of rotated log file names
const LOG_FILE_PREFIX: &str = "work_items";

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(
        default = "defaults::log_level",
        deserialize_with = "parsers::from_str"
    )]
    #[schemars(schema_with = "level")]
    pub level: Level,

    /// Directory to write log files to. Logs go to stderr when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Log file rotation period, used only with `path`
    #[serde(default = "defaults::rotation")]
    pub rotation: LogRotationKind,

    #[serde(default)]
    pub format: FormatStyle,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            path: None,
            rotation: defaults::rotation(),
            format: FormatStyle::default(),
        }
    }
}

impl Logging {
    /// Filter honouring `RUST_LOG`, with the configured level as the default directive
    pub fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        if self.level == Level::INFO {
            env_filter = env_filter
                .add_directive("hyper_util=warn".parse()?)
                .add_directive("reqwest=warn".parse()?);
        }
        Ok(env_filter)
    }
}

type LoggingLayerResult = (
    Box<dyn LayerTrait<Registry> + Send + Sync>,
    Option<WorkerGuard>,
);

/// Builds the formatting layer for a [`Logging`] config.
///
/// The returned guard, if any, must be held for as long as logs should be flushed to file.
#[derive(Default)]
pub struct LoggingLayerBuilder {
    writer: Option<BoxMakeWriter>,
    ansi_enabled: bool,
}

impl LoggingLayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write to `writer` instead of the destination named by the config
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Colour the output of a writer given to [`LoggingLayerBuilder::with_writer`]
    pub fn with_ansi_enabled(mut self, enabled: bool) -> Self {
        self.ansi_enabled = enabled;
        self
    }

    pub fn build(self, logging: &Logging) -> LoggingLayerResult {
        let (writer, guard, ansi) = match self.writer {
            Some(writer) => (writer, None, self.ansi_enabled),
            None => destination(logging),
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false);
        let layer = match logging.format {
            FormatStyle::Full => layer.boxed(),
            FormatStyle::Compact => layer.compact().boxed(),
            FormatStyle::Json => layer.json().boxed(),
            FormatStyle::Pretty => layer.pretty().boxed(),
        };

        (layer, guard)
    }
}

/// A non-blocking rolling file writer when a path is configured, stderr otherwise.
///
/// Falls back to stderr if the log directory cannot be set up, since there is no
/// logger yet to report to.
fn destination(logging: &Logging) -> (BoxMakeWriter, Option<WorkerGuard>, bool) {
    let Some(path) = &logging.path else {
        return (BoxMakeWriter::new(std::io::stderr), None, true);
    };

    let appender = std::fs::create_dir_all(path)
        .map_err(anyhow::Error::from)
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(logging.rotation.into())
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(path)
                .map_err(anyhow::Error::from)
        });

    match appender {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        Err(e) => {
            eprintln!("Failed to set up log file in {}: {e:?}, logging to stderr", path.display());
            (BoxMakeWriter::new(std::io::stderr), None, true)
        }
    }
}

mod defaults {
    use tracing::Level;

    use super::LogRotationKind;

    pub(super) const fn log_level() -> Level {
        Level::INFO
    }

    pub(super) const fn rotation() -> LogRotationKind {
        LogRotationKind::Hourly
    }
}

mod parsers {
    use std::fmt::Display;
    use std::marker::PhantomData;
    use std::str::FromStr;

    use serde::Deserializer;

    pub(super) fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        <T as FromStr>::Err: Display,
    {
        struct FromStrVisitor<Inner> {
            _phantom: PhantomData<Inner>,
        }
        impl<Inner> serde::de::Visitor<'_> for FromStrVisitor<Inner>
        where
            Inner: FromStr,
            <Inner as FromStr>::Err: Display,
        {
            type Value = Inner;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Inner::from_str(v).map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(FromStrVisitor {
            _phantom: PhantomData,
        })
    }
}

fn level(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}
