//! # CloudSearch Gateway
//!
//! An AWS CloudSearch–compatible HTTP API (2011-02-01 dialect) in front of a
//! pluggable full-text search engine.
//!
//! The heart of the crate is [`query::QueryTranslator`], which turns the
//! CloudSearch "simple query" language into the engine's boolean
//! match-expression syntax. Around it:
//!
//! - [`domain`] — domain and index-field metadata, the schema the handlers
//!   validate requests against
//! - [`batch`] — SDF document batch validation and application
//! - [`engine`] — the [`engine::SearchEngine`] trait the gateway drives, plus
//!   an in-memory implementation for tests and the default binary
//! - [`api`] — the axum routes, handlers, and CloudSearch response shapes
//! - [`config`] / [`error`] — layered configuration and the application
//!   error type

pub mod api;
pub mod batch;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod query;
