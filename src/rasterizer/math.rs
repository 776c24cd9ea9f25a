//! Vector math for triangle rasterization
//!
//! Everything here works in `f64`: depths come out of the projection in the
//! thousands and the background shader is sensitive to the last bits of the
//! interpolated position.

use std::ops::{Add, Mul, Sub};
use std::ops::Range;
use serde::{Deserialize, Serialize};

use super::types::{Mesh, Vertex};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

/// Linear color, nominally 0.0-1.0 per channel.
///
/// Not clamped: interpolation may leave the range slightly and shaders
/// saturate when converting to bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const RED: Rgb = Rgb { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Rgb = Rgb { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE: Rgb = Rgb { r: 0.0, g: 0.0, b: 1.0 };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Same value on all three channels
    pub const fn gray(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub fn scale(self, s: f64) -> Rgb {
        Rgb {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
        }
    }
}

impl Add for Rgb {
    type Output = Rgb;
    fn add(self, other: Rgb) -> Rgb {
        Rgb {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl Mul<f64> for Rgb {
    type Output = Rgb;
    fn mul(self, s: f64) -> Rgb {
        self.scale(s)
    }
}

/// Twice the signed area of triangle (p1, p2, p3) in the XY plane.
/// The sign encodes winding order; z is ignored.
pub fn area(p1: Vec3, p2: Vec3, p3: Vec3) -> f64 {
    (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y)
}

/// Which side of the directed edge a->b the point p lies on:
/// 1 for left (counter-clockwise), -1 for right, 0 when collinear.
pub fn orient(a: Vec3, b: Vec3, p: Vec3) -> i8 {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

/// Point-in-triangle test by sign agreement of the three edge orientations.
///
/// Works for either winding. Points on an edge and every point of a
/// degenerate triangle are reported as outside.
pub fn point_in_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let turns = orient(a, b, p) + orient(b, c, p) + orient(c, a, p);
    turns.abs() == 3
}

/// Barycentric weights of a point, one per triangle vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Barycentric {
    /// Inside or on the boundary: every weight in [0, 1]
    pub fn is_inside(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.a) && unit.contains(&self.b) && unit.contains(&self.c)
    }
}

/// Calculate barycentric weights for point p in triangle (a, b, c).
///
/// Returns None for a degenerate (zero-area) triangle. The weights are not
/// range checked here; see [`Barycentric::is_inside`].
pub fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<Barycentric> {
    let total = area(a, b, c);
    if total == 0.0 {
        return None;
    }

    Some(Barycentric {
        a: area(p, b, c) / total,
        b: area(p, c, a) / total,
        c: area(a, b, p) / total,
    })
}

/// Pixel ranges covered by a triangle's screen-space bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: Range<usize>,
    pub y: Range<usize>,
}

impl BoundingBox {
    /// Bounds of (a, b, c) clamped to a `size` x `size` raster.
    /// Both ranges always lie within `0..size`.
    pub fn clamped(a: Vec3, b: Vec3, c: Vec3, size: usize) -> Self {
        Self {
            x: clamp_span(a.x.min(b.x).min(c.x), a.x.max(b.x).max(c.x), size),
            y: clamp_span(a.y.min(b.y).min(c.y), a.y.max(b.y).max(c.y), size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }
}

fn clamp_span(lo: f64, hi: f64, size: usize) -> Range<usize> {
    // Float-to-int casts saturate (negative and NaN become 0)
    let start = (lo.max(0.0).floor() as usize).min(size);
    let end = (hi.min(size as f64).ceil() as usize).min(size);
    start..end.max(start)
}

/// Fixed scale-and-shift from object space into raster space:
/// `x' = (x + offset) * scale`, `y' = y * scale`, `z' = z * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub offset: f64,
    pub scale: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            offset: 0.12,
            scale: 5000.0,
        }
    }
}

impl Projection {
    pub fn apply(&self, p: Vec3) -> Vec3 {
        Vec3 {
            x: (p.x + self.offset) * self.scale,
            y: p.y * self.scale,
            z: p.z * self.scale,
        }
    }

    /// Project a single vertex; color is carried over untouched
    pub fn project(&self, v: &Vertex) -> Vertex {
        Vertex {
            pos: self.apply(v.pos),
            color: v.color,
        }
    }

    /// Raster-space copy of every mesh vertex, in mesh order
    pub fn project_mesh(&self, mesh: &Mesh) -> Vec<Vertex> {
        mesh.vertices.iter().map(|v| self.project(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Vec3 {
        Vec3::new(x, y, 0.0)
    }

    #[test]
    fn test_area_sign_follows_winding() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);
        let c = pt(0.0, 10.0);
        assert!((area(a, b, c) - 100.0).abs() < 1e-12);
        assert!((area(a, c, b) + 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_barycentric_inside() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);
        let c = pt(5.0, 10.0);
        let w = barycentric(pt(5.0, 3.0), a, b, c).unwrap();
        assert!(w.is_inside());
        assert!(w.a > 0.0 && w.a < 1.0);
        assert!(w.b > 0.0 && w.b < 1.0);
        assert!(w.c > 0.0 && w.c < 1.0);
        assert!((w.a + w.b + w.c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_barycentric_either_winding() {
        let a = pt(0.0, 0.0);
        let b = pt(5.0, 10.0);
        let c = pt(10.0, 0.0);
        let w = barycentric(pt(5.0, 3.0), a, b, c).unwrap();
        assert!(w.is_inside());
        assert!((w.a + w.b + w.c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let a = pt(1.5, 2.0);
        let b = pt(40.0, 7.25);
        let c = pt(12.0, 33.0);
        let wa = barycentric(a, a, b, c).unwrap();
        let wb = barycentric(b, a, b, c).unwrap();
        let wc = barycentric(c, a, b, c).unwrap();
        assert_eq!((wa.a, wa.b, wa.c), (1.0, 0.0, 0.0));
        assert_eq!((wb.a, wb.b, wb.c), (0.0, 1.0, 0.0));
        assert_eq!((wc.a, wc.b, wc.c), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_barycentric_outside() {
        let w = barycentric(pt(20.0, 20.0), pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 10.0)).unwrap();
        assert!(!w.is_inside());
    }

    #[test]
    fn test_barycentric_degenerate() {
        let a = pt(0.0, 0.0);
        let b = pt(5.0, 5.0);
        let c = pt(10.0, 10.0);
        assert!(barycentric(pt(5.0, 5.0), a, b, c).is_none());
        assert!(barycentric(pt(1.0, 1.0), a, a, a).is_none());
    }

    #[test]
    fn test_point_in_triangle() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);
        let c = pt(0.0, 10.0);
        assert!(point_in_triangle(pt(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(pt(2.0, 2.0), a, c, b));
        assert!(!point_in_triangle(pt(8.0, 8.0), a, b, c));
        // On an edge
        assert!(!point_in_triangle(pt(5.0, 0.0), a, b, c));
        // Degenerate
        assert!(!point_in_triangle(pt(1.0, 1.0), a, pt(5.0, 5.0), pt(10.0, 10.0)));
    }

    #[test]
    fn test_bounding_box_clamps_to_raster() {
        let bb = BoundingBox::clamped(pt(-50.5, 20.2), pt(1200.0, -3.0), pt(10.0, 999.5), 1000);
        assert_eq!(bb.x, 0..1000);
        assert_eq!(bb.y, 0..1000);

        let bb = BoundingBox::clamped(pt(10.2, 20.7), pt(30.1, 25.0), pt(15.0, 40.5), 1000);
        assert_eq!(bb.x, 10..31);
        assert_eq!(bb.y, 20..41);
    }

    #[test]
    fn test_bounding_box_off_raster_is_empty() {
        let left = BoundingBox::clamped(pt(-30.0, 10.0), pt(-5.0, 10.0), pt(-10.0, 50.0), 1000);
        assert!(left.is_empty());
        assert!(left.x.end <= 1000 && left.y.end <= 1000);

        let right = BoundingBox::clamped(pt(1500.0, 10.0), pt(2000.0, 10.0), pt(1800.0, 50.0), 1000);
        assert!(right.is_empty());
        assert!(right.x.start <= 1000 && right.x.end <= 1000);

        let nan = BoundingBox::clamped(pt(f64::NAN, 0.0), pt(f64::NAN, 5.0), pt(f64::NAN, 9.0), 1000);
        assert!(nan.x.end <= 1000);
    }

    #[test]
    fn test_projection_defaults() {
        let p = Projection::default();
        let v = p.apply(Vec3::new(0.0, 0.1, -0.02));
        assert!((v.x - 600.0).abs() < 1e-9);
        assert!((v.y - 500.0).abs() < 1e-9);
        assert!((v.z + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_vec3_linearity() {
        let a = Vec3::new(1.0, -2.0, 3.5);
        let b = Vec3::new(0.25, 4.0, -1.0);
        let lhs = (a + b) * 3.0;
        let rhs = a * 3.0 + b * 3.0;
        assert!((lhs - rhs).x.abs() < 1e-12);
        assert!((lhs - rhs).y.abs() < 1e-12);
        assert!((lhs - rhs).z.abs() < 1e-12);
    }
}
