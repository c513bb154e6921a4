//! Persistence layer
//!
//! `KvStore` wraps an embedded redb database. Every public operation runs in
//! its own transaction, redb handles isolation between concurrent callers.

pub mod kv;
pub mod models;
pub mod sweeper;

pub use kv::KvStore;
pub use models::ShortLink;
pub use sweeper::ExpirySweeper;
