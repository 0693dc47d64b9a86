//! JSON API for a single-table todo list backed by PostgreSQL.

pub mod api;
pub mod config;
pub mod models;
pub mod repository;
pub mod telemetry;
