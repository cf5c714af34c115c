//! Renderer for producing wallpaper files from layout results
//!
//! This module takes per-panel crops and drives an image engine to cut,
//! scale and join them into one output image per group.

pub mod config;
pub mod driver;
pub mod engine;

pub use config::MagickConfig;
pub use driver::{execute, output_path, GroupJob, RenderPlan};
pub use engine::{EngineError, ImageEngine, MagickEngine};
