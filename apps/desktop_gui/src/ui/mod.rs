//! UI layer for the desktop GUI: single-page upload and results view.

pub mod app;

pub use app::PredictorApp;
