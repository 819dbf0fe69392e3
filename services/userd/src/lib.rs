//! userd server library.
//!
//! This crate primarily ships a `userd` binary, but we expose a small
//! library surface to enable integration testing and reuse.

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod projections;
pub mod state;
