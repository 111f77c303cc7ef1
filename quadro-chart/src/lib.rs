//! Chart renderers for classified payloads.
//!
//! `quadro-core` decides *whether* and *as what* a payload charts; this
//! crate draws it. Every renderer is a pure function from payload to PNG
//! bytes: a fresh RGB frame per call, nothing shared between requests, and
//! a descriptive error instead of a partial image whenever a required field
//! is missing mid-render.

pub mod error;
pub mod frame;
pub mod render;

pub use error::{ChartError, Result};
pub use render::render;
pub use render::stats::{StatsMeasure, measure_for};
