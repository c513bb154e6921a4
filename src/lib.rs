//! tinylink - a small URL shortener
//!
//! Maps short codes to destination URLs, keeps the mapping in an embedded
//! redb database and serves 307 redirects over HTTP.
//!
//! # Architecture
//! - `utils`: short code generation and validation
//! - `storage`: redb-backed key-value store with per-key expiry
//! - `services`: create / resolve / remove semantics
//! - `api`: HTTP routes and the shared-secret middleware
//! - `config`: configuration loading
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
