//! Error types for seismic data operations.

mod quake_error;

pub use quake_error::{QuakeError, Result};
