//! Bridge between the UI thread and the worker that owns the predictor.

pub mod commands;
pub mod runtime;
