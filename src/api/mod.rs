//! HTTP API for the enrichment service.

pub mod handlers;
