//! dkron-gateway - HTTP gateway for Dkron job definitions
//!
//! Exposes `/jobs` CRUD routes and forwards each request to the
//! scheduler's `/v1/jobs` API, relaying its status back to the caller.

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod boot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod environment;
pub mod job;
pub mod router;
pub mod setup_tracing;
pub mod upstream;
