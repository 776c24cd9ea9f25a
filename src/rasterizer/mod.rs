//! Software triangle rasterizer
//!
//! Features:
//! - Fixed scale-and-shift projection into raster space
//! - Bounding-box scan with barycentric containment and interpolation
//! - Depth buffer (larger z is nearer, strict comparison)
//! - Pluggable per-fragment shaders

mod math;
mod types;
mod shader;
mod render;

pub use math::*;
pub use types::*;
pub use shader::*;
pub use render::*;

/// Raster width and height
pub const RASTER_SIZE: usize = 1000;

/// Depth of the background quad, behind any projected mesh
pub const BACKGROUND_DEPTH: f64 = -1000.0;
