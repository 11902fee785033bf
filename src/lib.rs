//! Trivia question catalog served over HTTP.
//!
//! Questions and categories live in SQLite; [`catalog::Catalog`] answers the
//! reads and writes and [`server`] exposes them as a JSON API.

pub mod catalog;
pub mod db;
pub mod server;
pub mod settings;
pub mod telemetry;
pub mod transfer;
