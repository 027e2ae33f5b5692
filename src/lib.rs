//! Property Dashboard - property listing management.
//!
//! - [`store`] - record store with in-memory and SQLite backends
//! - [`api`] - axum REST service over `/api/properties`
//! - [`client`] - client state container, filtering and HTTP client
//! - [`models`] - the `Property` entity and its validation
//! - [`config`] / [`logging`] - environment configuration and tracing setup

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod seed;
pub mod store;
