//! Core types for the rasterizer

use std::ops::{Add, Mul};

use super::math::{Rgb, Vec3};

/// 8-bit output color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a blue-green-red triplet (output byte order)
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self {
            r: bgr[2],
            g: bgr[1],
            b: bgr[0],
        }
    }

    /// Convert to [u8; 3] in blue-green-red order for the framebuffer
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

/// A vertex with position and color.
///
/// `Mul<f64>` and `Add` act on every attribute at once, so a convex
/// combination of vertices blends position and color together.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub color: Rgb,
}

impl Vertex {
    pub fn new(pos: Vec3, color: Rgb) -> Self {
        Self { pos, color }
    }

    pub fn from_pos(x: f64, y: f64, z: f64) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
            color: Rgb::BLACK,
        }
    }

    pub fn scale(self, k: f64) -> Vertex {
        Vertex {
            pos: self.pos * k,
            color: self.color * k,
        }
    }
}

impl Mul<f64> for Vertex {
    type Output = Vertex;
    fn mul(self, k: f64) -> Vertex {
        self.scale(k)
    }
}

impl Add for Vertex {
    type Output = Vertex;
    fn add(self, other: Vertex) -> Vertex {
        Vertex {
            pos: self.pos + other.pos,
            color: self.color + other.color,
        }
    }
}

/// A triangle face (0-based indices into the vertex array)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

impl Face {
    pub const fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2 }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.v0, self.v1, self.v2]
    }
}

/// Indexed triangle mesh. Vertices may be shared between faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub faces: Vec<Face>,
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(faces: Vec<Face>, vertices: Vec<Vertex>) -> Self {
        Self { faces, vertices }
    }

}

/// Faces whose three positions in `vertices` are collinear in the XY plane.
/// The rasterizer draws nothing for these, so pass raster-space vertices.
pub fn degenerate_faces(faces: &[Face], vertices: &[Vertex]) -> usize {
    faces
        .iter()
        .filter(|f| {
            let [a, b, c] = f.indices().map(|i| vertices[i].pos);
            super::math::area(a, b, c) == 0.0
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vertex, b: Vertex) -> bool {
        let d = [
            a.pos.x - b.pos.x,
            a.pos.y - b.pos.y,
            a.pos.z - b.pos.z,
            a.color.r - b.color.r,
            a.color.g - b.color.g,
            a.color.b - b.color.b,
        ];
        d.iter().all(|v| v.abs() < 1e-9)
    }

    #[test]
    fn test_scale_touches_every_attribute() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Rgb::new(0.5, 0.25, 1.0));
        let s = v * 2.0;
        assert_eq!(s.pos, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(s.color, Rgb::new(1.0, 0.5, 2.0));
        // Operand is untouched
        assert_eq!(v.pos, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_add_is_componentwise() {
        let a = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Rgb::new(0.1, 0.2, 0.3));
        let b = Vertex::new(Vec3::new(-1.0, 0.5, 10.0), Rgb::new(0.4, 0.0, 0.5));
        let sum = a + b;
        assert!(close(sum, Vertex::new(Vec3::new(0.0, 2.5, 13.0), Rgb::new(0.5, 0.2, 0.8))));
    }

    #[test]
    fn test_vertex_algebra_is_linear() {
        let a = Vertex::new(Vec3::new(3.0, -7.5, 120.0), Rgb::new(0.9, 0.8, 0.85));
        let b = Vertex::new(Vec3::new(-4.25, 2.0, -80.0), Rgb::new(0.1, 1.0, 0.0));
        for k in [0.0, 0.3, 1.0, -2.5] {
            assert!(close((a + b) * k, a * k + b * k));
        }
    }

    #[test]
    fn test_color_bgr_order() {
        let c = Color::new(10, 20, 30);
        assert_eq!(c.to_bgr(), [30, 20, 10]);
        assert_eq!(Color::from_bgr([30, 20, 10]), c);
    }

    #[test]
    fn test_degenerate_faces() {
        let mesh = Mesh::new(
            vec![Face::new(0, 1, 2), Face::new(0, 1, 3)],
            vec![
                Vertex::from_pos(0.0, 0.0, 0.0),
                Vertex::from_pos(1.0, 1.0, 0.0),
                Vertex::from_pos(2.0, 2.0, 0.0),
                Vertex::from_pos(1.0, 0.0, 0.0),
            ],
        );
        assert_eq!(degenerate_faces(&mesh.faces, &mesh.vertices), 1);
    }
}
