//! HTTP service for the property valuation aggregator.
//!
//! Thin layer over the `valuation` library: environment configuration,
//! router assembly with permissive CORS, the aggregation endpoint, and a
//! health check.

pub mod config;
pub mod server;

pub use config::Config;
