//! Quadro service library: HTTP surface and configuration.
//!
//! The binary in `main.rs` wires a [`quadro_agent::AnalysisAgent`] into the
//! router built here; the integration tests drive the same router directly.

pub mod api;
pub mod config;
