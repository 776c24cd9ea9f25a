//! Fragment shaders
//!
//! The rasterizer resolves coverage and depth; a [`Shader`] turns the
//! interpolated vertex at a covered pixel into the color that gets stored.
//! Shaders see the whole fragment (position and color) and use whichever
//! part they need.

use std::f64::consts::{PI, TAU};
use serde::{Deserialize, Serialize};

use super::types::{Color, Vertex};

/// Per-fragment color function
pub trait Shader {
    fn shade(&self, fragment: &Vertex) -> Color;
}

impl<F> Shader for F
where
    F: Fn(&Vertex) -> Color,
{
    #[inline]
    fn shade(&self, fragment: &Vertex) -> Color {
        self(fragment)
    }
}

/// Constant color, ignores the fragment
#[derive(Debug, Clone, Copy)]
pub struct FlatShader {
    pub color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Shader for FlatShader {
    #[inline]
    fn shade(&self, _fragment: &Vertex) -> Color {
        self.color
    }
}

/// Vertex color darkened or brightened by raster-space depth:
/// `brightness = z / depth_range + bias`.
///
/// With the default projection the mesh spans roughly z in [-300, 300],
/// which maps to brightness [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthBrightnessShader {
    pub depth_range: f64,
    pub bias: f64,
}

impl Default for DepthBrightnessShader {
    fn default() -> Self {
        Self {
            depth_range: 600.0,
            bias: 0.5,
        }
    }
}

impl DepthBrightnessShader {
    pub fn brightness(&self, z: f64) -> f64 {
        (z / self.depth_range) + self.bias
    }
}

impl Shader for DepthBrightnessShader {
    fn shade(&self, fragment: &Vertex) -> Color {
        let brightness = self.brightness(fragment.pos.z);
        let c = fragment.color;
        Color {
            r: channel_byte(c.r * brightness),
            g: channel_byte(c.g * brightness),
            b: channel_byte(c.b * brightness),
        }
    }
}

/// 0.0-1.0 to a byte: truncate, then saturate into 0..=255
#[inline]
fn channel_byte(v: f64) -> u8 {
    (v * 256.0) as u8
}

/// Procedural spiral from the fragment's screen-space position.
///
/// Blue carries the distance from (500, 500) divided by 3. Red carries the
/// angle around (600, 500), offset by `half_turn`, divided by
/// `sin(full_turn)` and scaled by 255, wrapped to a byte. Green is 0.
///
/// `sin(full_turn)` is close to zero, so the angle term is huge and the red
/// channel depends on the exact floating point evaluation order kept below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarBackgroundShader {
    pub half_turn: f64,
    pub full_turn: f64,
}

impl PolarBackgroundShader {
    pub const CENTER: f64 = 500.0;
    pub const ANGLE_CENTER_X: f64 = 600.0;
    pub const RADIUS_DIVISOR: f64 = 3.0;

    /// Angle constants pi and 2*pi
    pub const fn new() -> Self {
        Self {
            half_turn: PI,
            full_turn: TAU,
        }
    }

    /// The two-decimal angle constants 3.14 and 6.28. The divisor is far
    /// from zero here, which gives wide visible spiral bands.
    pub const fn legacy() -> Self {
        Self {
            half_turn: 3.14,
            full_turn: 6.28,
        }
    }
}

impl Default for PolarBackgroundShader {
    fn default() -> Self {
        Self::new()
    }
}

impl Shader for PolarBackgroundShader {
    fn shade(&self, fragment: &Vertex) -> Color {
        let x = fragment.pos.x;
        let y = fragment.pos.y;

        let dx = x - Self::CENTER;
        let dy = y - Self::CENTER;
        let r = (dx * dx + dy * dy).sqrt() / Self::RADIUS_DIVISOR;
        let theta = (((y - Self::CENTER).atan2(x - Self::ANGLE_CENTER_X) + self.half_turn)
            / self.full_turn.sin())
            * 255.0;

        // i128 holds every truncated theta this can produce
        let wrapped = (theta as i128).rem_euclid(256) as u8;

        Color {
            b: r as u8,
            g: 0,
            r: wrapped,
        }
    }
}
