//! The shared library for PahadiMatch, a matrimonial web client written in Rust.
//!
//! Holds everything the browser front-end needs that is not markup: the persisted session
//! store, the authorizing HTTP client, the backend endpoints, the data types exchanged with
//! the backend, plus error handling, logging, and macros.

pub mod api;
pub mod auth;
pub mod data;
pub mod errors;
pub mod id;
pub mod log;
pub mod macros;
pub mod services;
pub mod session;
pub mod storage;

pub use serde;
pub use serde_json;
pub use tracing;
