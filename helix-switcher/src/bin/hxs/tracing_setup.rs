//! Tracing configuration for the hxs binary.
//!
//! Library code logs through the `log` facade; the subscriber installed here
//! picks those records up, filters them by level and suppressed patterns, and
//! writes them to the configured log file (stderr when the file can't be
//! created).

use std::fmt::Write as _;
use std::fs::File;
use std::io;
use std::sync::Mutex;

use helix_switcher::config::LoggingConfig;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default event format that skips events whose message matches a
/// suppressed pattern. Only the message is matched, never the level,
/// timestamp or other fields.
struct SuppressingFormat {
    inner: fmt::format::Format,
    suppressed_patterns: Vec<String>,
}

impl SuppressingFormat {
    fn new(suppressed_patterns: Vec<String>) -> Self {
        Self {
            inner: fmt::format::Format::default(),
            suppressed_patterns,
        }
    }

    fn suppresses(&self, event: &Event<'_>) -> bool {
        if self.suppressed_patterns.is_empty() {
            return false;
        }
        let mut message = MessageText::default();
        event.record(&mut message);
        is_suppressed(&message.0, &self.suppressed_patterns)
    }
}

/// Text of an event's `message` field. Records bridged from `log` carry
/// their formatted arguments there too.
#[derive(Default)]
struct MessageText(String);

impl Visit for MessageText {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{value:?}");
        }
    }
}

fn is_suppressed(message: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| !pattern.is_empty() && message.contains(pattern.as_str()))
}

impl<S, N> FormatEvent<S, N> for SuppressingFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        if self.suppresses(event) {
            return Ok(());
        }
        self.inner.format_event(ctx, writer, event)
    }
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let log_file = config.log_file.as_ref().and_then(|path| match File::create(path) {
        Ok(file) => Some((path, file)),
        Err(err) => {
            eprintln!("Cannot create log file {}: {err}", path.display());
            None
        }
    });

    let (writer, ansi) = match log_file {
        Some((path, file)) => {
            eprintln!("Logging to {}", path.display());
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .event_format(SuppressingFormat::new(config.suppressed_patterns.clone()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
