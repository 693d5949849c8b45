//! Operation interceptors.
//!
//! An interceptor looks at every completed exchange and acts only on the
//! ones whose URL names its operation. Matching on the URL first means
//! unrelated traffic is skipped before any JSON parsing happens.
//!
//! Every operation is described by an [`Operation`] record (name, URL
//! pattern, instruction path, entry mapper) and served by the one generic
//! [`OperationInterceptor`]. See [`operations`] for the table.

pub mod operations;

use crate::model::{ExtractError, RequestDescriptor, ResponseDescriptor, TimelineEntry};
use crate::parser;
use crate::store::EntityStore;
use regex::Regex;
use tracing::{debug, error, info};

/// Tracing target of user-facing error events.
pub const BANNER_TARGET: &str = "tlcap::banner";

/// Maps one timeline entry to zero or one entity.
pub type EntryMapper<T> = fn(&TimelineEntry) -> Result<Option<T>, ExtractError>;

/// Static description of one upstream operation.
#[derive(Debug)]
pub struct Operation<T> {
    /// Operation name as it appears in the API path, e.g. `Likes`.
    pub name: &'static str,
    /// Field path from the response root to the instruction list.
    pub instructions_path: &'static [&'static str],
    /// Entry-to-entity mapping.
    pub map_entry: EntryMapper<T>,
}

// Manual impls: derive would demand `T: Clone`.
impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operation<T> {}

impl<T> Operation<T> {
    /// URL pattern: `/graphql/<query id>/<name>`, unanchored.
    pub fn url_pattern(&self) -> String {
        format!(r"/graphql/.+/{}", regex::escape(self.name))
    }

    /// Dotted form of the instruction path, for diagnostics.
    pub fn path_display(&self) -> String {
        self.instructions_path.join(".")
    }
}

/// What an interceptor did with one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// URL did not match; nothing happened.
    Skipped,
    /// Extracted and appended this many entities.
    Captured(usize),
    /// URL matched but extraction failed; the store was not touched.
    Failed(ExtractError),
}

/// Something the dispatcher hands every exchange to.
pub trait Interceptor {
    /// Operation name, used in logs and reports.
    fn name(&self) -> &str;

    /// Inspect one exchange. Must not panic on malformed input.
    fn handle(&self, request: &RequestDescriptor, response: &ResponseDescriptor) -> Outcome;
}

/// Generic interceptor: one operation bound to one store.
#[derive(Debug)]
pub struct OperationInterceptor<T> {
    operation: Operation<T>,
    pattern: Regex,
    store: EntityStore<T>,
}

impl<T: Clone> OperationInterceptor<T> {
    /// Bind an operation to the store it writes.
    ///
    /// # Errors
    ///
    /// Returns the `regex` error if the URL pattern does not compile.
    pub fn new(operation: Operation<T>, store: EntityStore<T>) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&operation.url_pattern())?;
        Ok(Self {
            operation,
            pattern,
            store,
        })
    }

    /// Whether `url` targets this interceptor's operation.
    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// The store extracted entities are appended to.
    pub fn store(&self) -> &EntityStore<T> {
        &self.store
    }

    fn extract(&self, response: &ResponseDescriptor) -> Result<Vec<T>, ExtractError> {
        parser::extract_from_response(
            &response.response_text,
            self.operation.instructions_path,
            self.operation.map_entry,
        )
    }
}

impl<T: Clone> Interceptor for OperationInterceptor<T> {
    fn name(&self) -> &str {
        self.operation.name
    }

    fn handle(&self, request: &RequestDescriptor, response: &ResponseDescriptor) -> Outcome {
        if !self.matches(&request.url) {
            return Outcome::Skipped;
        }

        let name = self.operation.name;
        match self.extract(response) {
            Ok(entities) => {
                let count = entities.len();
                let total = self.store.append(entities);
                info!(operation = name, count, total, "{}: {} items received", name, count);
                Outcome::Captured(count)
            }
            Err(err) => {
                debug!(
                    operation = name,
                    method = %request.method,
                    url = %request.url,
                    status = response.status,
                    body = %response.response_text,
                    "{} {} {} {}",
                    request.method,
                    request.url,
                    response.status,
                    response.response_text
                );
                error!(
                    target: BANNER_TARGET,
                    operation = name,
                    error = %err,
                    "{}: Failed to parse API response",
                    name
                );
                Outcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
