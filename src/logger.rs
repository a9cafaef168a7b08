//! Error logger for request handlers
//!
//! Composes a single entry from a message, an optional error or arbitrary
//! value and optional side data, then emits it through `tracing` at the
//! requested level. Logging never fails: values that cannot be serialized are
//! replaced by a placeholder.

use std::error::Error as StdError;
use std::fmt::Write as _;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;

const UNSERIALIZABLE: &str = "[unserializable value]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Info,
    Warn,
    #[default]
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Level, call-site tag and side data for a log entry.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub level: LogLevel,
    pub context: Option<String>,
    extra: Option<String>,
}

impl LogOptions {
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach structured side data. It is rendered as JSON right away.
    pub fn extra<T: Serialize + ?Sized>(mut self, extra: &T) -> Self {
        self.extra = Some(to_json_or_placeholder(extra));
        self
    }
}

/// What went wrong, as passed to [`log`].
pub enum LogDetail<'a> {
    /// An error value, rendered with its type name, message and source chain.
    Error {
        name: &'static str,
        error: &'a (dyn StdError + 'a),
    },
    /// Any other value, already rendered as JSON (or the placeholder).
    Value(String),
}

impl<'a> LogDetail<'a> {
    pub fn error<E: StdError + 'a>(error: &'a E) -> Self {
        LogDetail::Error {
            name: short_type_name::<E>(),
            error,
        }
    }

    pub fn value<T: Serialize + ?Sized>(value: &T) -> Self {
        LogDetail::Value(to_json_or_placeholder(value))
    }
}

/// Write a log entry.
pub fn log(message: &str, detail: Option<LogDetail<'_>>, options: LogOptions) {
    let line = compose(Utc::now(), message, detail.as_ref(), &options);
    let context = options.context.as_deref().unwrap_or_default();

    match options.level {
        LogLevel::Info => tracing::info!(context, "{line}"),
        LogLevel::Warn => tracing::warn!(context, "{line}"),
        LogLevel::Error => tracing::error!(context, "{line}"),
    }
}

/// Build the text of a log entry stamped with `now`.
pub fn compose(
    now: DateTime<Utc>,
    message: &str,
    detail: Option<&LogDetail<'_>>,
    options: &LogOptions,
) -> String {
    let readable = now.with_timezone(&Local).format("%Y/%m/%d %H:%M:%S");
    let iso = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut line = format!("[{readable}] [{iso}] [{}]", options.level.as_str());
    if let Some(context) = &options.context {
        let _ = write!(line, " [{context}]");
    }
    let _ = write!(line, " {message}");

    match detail {
        Some(LogDetail::Error { name, error }) => {
            let _ = write!(line, "\n  name: {name}");
            let _ = write!(line, "\n  message: {error}");
            let mut source = error.source();
            while let Some(cause) = source {
                let _ = write!(line, "\n  caused by: {cause}");
                source = cause.source();
            }
        }
        Some(LogDetail::Value(rendered)) => {
            let _ = write!(line, "\n  error: {rendered}");
        }
        None => {}
    }

    if let Some(extra) = &options.extra {
        let _ = write!(line, "\n  extra: {extra}");
    }

    line
}

fn to_json_or_placeholder<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| UNSERIALIZABLE.to_string())
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
