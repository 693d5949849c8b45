//! Dispatch of captured exchanges to interceptors.
//!
//! The browser-side hook that observes live traffic is not part of this
//! crate; [`Dispatcher`] is the in-process seam such a host calls for each
//! completed exchange. The replay binary drives it from capture files.

use crate::interceptor::{operations, Interceptor, Outcome};
use crate::model::{Exchange, RequestDescriptor, ResponseDescriptor};
use crate::store::Stores;
use tracing::warn;

/// Hands every exchange to each registered interceptor, in order.
///
/// A failing interceptor never stops the others, nor later exchanges.
#[derive(Default)]
pub struct Dispatcher {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl Dispatcher {
    /// Empty dispatcher; add interceptors with [`Dispatcher::register`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with one interceptor per operation bound to `stores`.
    ///
    /// # Errors
    ///
    /// Returns the `regex` error if a URL pattern does not compile.
    pub fn for_stores(stores: &Stores, disabled: &[String]) -> Result<Self, regex::Error> {
        Ok(Self {
            interceptors: operations::bind_all(stores, disabled)?,
        })
    }

    /// Append an interceptor. Interceptors run in registration order.
    pub fn register(&mut self, interceptor: Box<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Number of registered interceptors.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Operation names of the registered interceptors, in order.
    pub fn names(&self) -> Vec<&str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Deliver one exchange to every interceptor.
    ///
    /// Returns the outcome of each interceptor whose URL matched.
    pub fn dispatch(
        &self,
        request: &RequestDescriptor,
        response: &ResponseDescriptor,
    ) -> Vec<(&str, Outcome)> {
        self.interceptors
            .iter()
            .map(|interceptor| (interceptor.name(), interceptor.handle(request, response)))
            .filter(|(_, outcome)| *outcome != Outcome::Skipped)
            .collect()
    }

    /// Dispatch a batch of exchanges, tallying what happened.
    pub fn replay<'a>(&self, exchanges: impl IntoIterator<Item = &'a Exchange>) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for exchange in exchanges {
            summary.exchanges += 1;
            let outcomes = self.dispatch(&exchange.request, &exchange.response);
            if outcomes.is_empty() {
                summary.unmatched += 1;
            }
            for (_, outcome) in outcomes {
                match outcome {
                    Outcome::Captured(count) => summary.entities += count,
                    Outcome::Failed(_) => summary.failures += 1,
                    Outcome::Skipped => {}
                }
            }
        }
        summary
    }
}

/// Tally of a replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Exchanges dispatched.
    pub exchanges: usize,
    /// Exchanges no interceptor was interested in.
    pub unmatched: usize,
    /// Entities appended across all stores.
    pub entities: usize,
    /// Interceptor failures (one exchange can fail several interceptors).
    pub failures: usize,
}

/// A capture line that is not a valid exchange record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLineError {
    /// 1-based line number in the capture.
    pub line: usize,
    /// Why the line was rejected.
    pub message: String,
}

/// Parse capture lines into exchanges.
///
/// Lines arrive as raw bytes. Blank lines are ignored; lines that are not
/// UTF-8 or not a valid exchange record are collected with their 1-based
/// line number and skipped.
pub fn process_lines<L: AsRef<[u8]>>(
    lines: impl IntoIterator<Item = L>,
    starting_line_number: usize,
) -> (Vec<Exchange>, Vec<CaptureLineError>) {
    let mut exchanges = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = starting_line_number + index;
        let parsed = std::str::from_utf8(line.as_ref())
            .map_err(|err| format!("Capture line is not valid UTF-8: {err}"))
            .and_then(|text| {
                if text.trim().is_empty() {
                    Ok(None)
                } else {
                    Exchange::from_capture_line(text)
                        .map(Some)
                        .map_err(|err| err.to_string())
                }
            });
        match parsed {
            Ok(Some(exchange)) => exchanges.push(exchange),
            Ok(None) => {}
            Err(message) => {
                warn!(line = line_number, error = %message, "Skipping malformed capture line");
                errors.push(CaptureLineError {
                    line: line_number,
                    message,
                });
            }
        }
    }

    (exchanges, errors)
}
