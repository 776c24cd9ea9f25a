//! Mesh input
//!
//! Reads the `v`/`f` subset of Wavefront OBJ into an indexed [`Mesh`].
//! The format carries no color, so every vertex gets a random gray tint.
//!
//! [`Mesh`]: crate::rasterizer::Mesh

mod obj;

pub use obj::*;

use std::path::PathBuf;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rasterizer::Rgb;

/// Error type for mesh loading
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read mesh {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: vertex index {index} out of range ({count} vertices)")]
    IndexOutOfRange { line: usize, index: i64, count: usize },

    #[error("mesh has no faces")]
    Empty,
}

/// Per-vertex brightness synthesis: one uniform draw in `[min, max)`
/// applied to all three channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TintConfig {
    pub min: f64,
    pub max: f64,
    /// Fixed seed for reproducible renders; None draws from the OS
    pub seed: Option<u64>,
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            min: 0.8,
            max: 1.0,
            seed: None,
        }
    }
}

impl TintConfig {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        let brightness = rng.random::<f64>() * (self.max - self.min) + self.min;
        Rgb::gray(brightness)
    }
}
