//! Timeline capture (tlcap)
//!
//! Observes completed GraphQL timeline exchanges, extracts the posts and
//! users they carry, and accumulates them in per-operation reactive stores.
//!
//! The pure core is [`parser`] and [`interceptor`]; [`source`], [`config`]
//! and [`logging`] form the impure shell used by the replay binary.

pub mod config;
pub mod interceptor;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod store;

pub mod integration;

#[cfg(test)]
mod test_support;
