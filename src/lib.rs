//! softraster: a minimal software triangle rasterizer
//!
//! Loads an OBJ mesh, projects it into a square raster, draws it with
//! barycentric interpolation and a depth buffer, fills the rest with a
//! procedural background and writes a 24-bit BMP.
//!
//! ```no_run
//! use indicatif::ProgressBar;
//! use softraster::{config::RenderConfig, mesh, output, pipeline};
//!
//! let config = RenderConfig::default();
//! let mesh = mesh::load_obj(&config.mesh, &config.tint)?;
//! let fb = pipeline::render_scene(&mesh, &config, &ProgressBar::hidden());
//! output::save_image(&fb, &config.output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod mesh;
pub mod output;
pub mod pipeline;
pub mod rasterizer;
