//! Request and response types for the HTTP surface.

pub mod auth;
pub mod election;
pub mod ingest;
