//! A small newsletter subscription service.
//!
//! `POST /api/subscribe` validates an email and appends it to a JSON subscriber list,
//! see [`model::ModelManager::subscribe`] for the rules.

pub mod app;
pub mod config;
mod error;
pub mod model;
mod utils;
pub mod web;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Compact console logging for development. `RUST_LOG` overrides the default `debug` filter.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// Plain logging for deployments, no colors. `RUST_LOG` overrides the default `info` filter.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
