//! personas - a small CRUD HTTP service for person records
//!
//! Layers, top-down per request:
//! - `http_server` - axum routes, status mapping, access logging
//! - `persona` - pass-through service and the SQLite repository
//! - `db` - connection bootstrap and embedded schema

pub mod cli;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod persona;
