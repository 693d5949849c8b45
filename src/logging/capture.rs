//! Tracing layer that forwards events over a channel.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::mpsc::Sender;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::interceptor::BANNER_TARGET;

/// One captured tracing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Event severity.
    pub level: Level,
    /// Event target; [`BANNER_TARGET`] marks user-facing errors.
    pub target: String,
    /// The formatted `message` field.
    pub message: String,
    /// Structured fields other than `message`, rendered to strings.
    pub fields: BTreeMap<String, String>,
    /// When the layer saw the event.
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Whether this is a user-facing error event.
    pub fn is_banner(&self) -> bool {
        self.target == BANNER_TARGET
    }

    /// Look up a structured field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Layer that sends every event it sees as a [`LogRecord`].
///
/// A dropped receiver is ignored; logging never fails the caller.
pub struct CaptureLayer {
    sender: Sender<LogRecord>,
}

impl CaptureLayer {
    /// Forward events to `sender`.
    pub fn new(sender: Sender<LogRecord>) -> Self {
        Self { sender }
    }
}

impl fmt::Debug for CaptureLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureLayer").finish_non_exhaustive()
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let record = LogRecord {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
            timestamp: Utc::now(),
        };

        let _ = self.sender.send(record);
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields
                .insert(field.name().to_string(), format!("{:?}", value));
        }
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
