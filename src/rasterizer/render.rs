//! Core rendering functions
//! Bounding-box triangle rasterization with a depth buffer

use super::math::{barycentric, BoundingBox, Vec3};
use super::shader::Shader;
use super::types::{Color, Face, Vertex};

/// Color raster plus the parallel depth raster.
///
/// Square, row-major, origin at raster (0, 0). Larger depth is nearer:
/// the depth buffer starts at negative infinity and a fragment is kept
/// only when its depth is strictly greater than what is stored.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub pixels: Vec<u8>, // BGR, 3 bytes per pixel
    pub zbuffer: Vec<f64>,
    size: usize,
}

impl Framebuffer {
    pub fn new(size: usize) -> Self {
        Self {
            pixels: vec![0; size * size * 3],
            zbuffer: vec![f64::NEG_INFINITY; size * size],
            size,
        }
    }

    /// Width and height in pixels
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.size + x) * 3;
        Color::from_bgr([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    pub fn depth(&self, x: usize, y: usize) -> f64 {
        self.zbuffer[y * self.size + x]
    }

    /// Depth test and store. `shade` runs only when `z` is strictly nearer
    /// than the stored depth; equal depth keeps the earlier fragment.
    /// Returns true when the fragment was kept.
    pub fn set_pixel_with_depth<F>(&mut self, x: usize, y: usize, z: f64, shade: F) -> bool
    where
        F: FnOnce() -> Color,
    {
        if x >= self.size || y >= self.size {
            return false;
        }
        let idx = y * self.size + x;
        if z > self.zbuffer[idx] {
            self.zbuffer[idx] = z;
            self.pixels[idx * 3..idx * 3 + 3].copy_from_slice(&shade().to_bgr());
            return true;
        }
        false
    }

    /// Whole color raster, BGR triplets, row 0 first
    pub fn as_bgr_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// One BGR byte slice per row, row 0 first
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pixels.chunks_exact(self.size * 3)
    }

    /// Pixels some fragment has been written to
    pub fn covered(&self) -> usize {
        self.zbuffer.iter().filter(|z| z.is_finite()).count()
    }
}

/// Interpolated vertex at pixel (x, y), or None if the pixel lies outside
/// the triangle or the triangle is degenerate.
///
/// Boundary pixels (a weight of exactly 0 or 1) count as inside.
pub fn interpolate(x: f64, y: f64, a: &Vertex, b: &Vertex, c: &Vertex) -> Option<Vertex> {
    let w = barycentric(Vec3::new(x, y, 0.0), a.pos, b.pos, c.pos)?;
    if !w.is_inside() {
        return None;
    }
    Some((*c * w.c) + (*b * w.b) + (*a * w.a))
}

/// Rasterize a single triangle. Returns the number of pixels written.
pub fn rasterize_triangle<S: Shader + ?Sized>(
    fb: &mut Framebuffer,
    a: &Vertex,
    b: &Vertex,
    c: &Vertex,
    shader: &S,
) -> usize {
    let bb = BoundingBox::clamped(a.pos, b.pos, c.pos, fb.size);
    if bb.is_empty() {
        return 0;
    }

    let mut written = 0;
    for y in bb.y.clone() {
        for x in bb.x.clone() {
            let Some(fragment) = interpolate(x as f64, y as f64, a, b, c) else {
                continue;
            };

            if fb.set_pixel_with_depth(x, y, fragment.pos.z, || shader.shade(&fragment)) {
                written += 1;
            }
        }
    }
    written
}

/// Render indexed triangles into the framebuffer.
///
/// The same framebuffer can be passed to several calls (one per pass); only
/// relative depth decides what ends up visible. Face indices are trusted:
/// an index past the end of `vertices` panics.
pub fn render<S: Shader + ?Sized>(
    fb: &mut Framebuffer,
    faces: &[Face],
    vertices: &[Vertex],
    shader: &S,
) -> usize {
    faces
        .iter()
        .map(|face| {
            rasterize_triangle(
                fb,
                &vertices[face.v0],
                &vertices[face.v1],
                &vertices[face.v2],
                shader,
            )
        })
        .sum()
}
