//! OBJ subset parser
//!
//! Only two statements matter:
//! - `v x y z` declares a vertex; its color is a tint drawn from
//!   [`TintConfig`], trailing values after the position are ignored
//! - `f i j k ...` declares a face from 1-based vertex indices; `i/t/n`
//!   tokens use the position index, negative indices count back from the
//!   last vertex, and polygons are fan-triangulated
//!
//! Everything else (normals, texture coordinates, groups, materials,
//! comments) is skipped.

use std::fs;
use std::path::Path;
use rand::Rng;

use super::{MeshError, TintConfig};
use crate::rasterizer::{Face, Mesh, Vec3, Vertex};

/// Load a mesh from an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P, tint: &TintConfig) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rng = tint.rng();
    let mesh = parse_obj(&text, tint, &mut rng)?;
    log::info!(
        "Loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Parse OBJ text. Vertex tints are drawn from `rng` in file order.
pub fn parse_obj<R: Rng + ?Sized>(text: &str, tint: &TintConfig, rng: &mut R) -> Result<Mesh, MeshError> {
    let mut vertices: Vec<Vertex> = Vec::new();
    // Resolved 0-based indices with their source line, checked once the
    // whole file is read
    let mut pending: Vec<(usize, [i64; 3])> = Vec::new();
    let mut skipped = 0usize;

    for (n, raw) in text.lines().enumerate() {
        let line_no = n + 1;
        let line = match raw.find('#') {
            Some(i) => &raw[..i],
            None => raw,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "v" => vertices.push(parse_vertex(&parts[1..], line_no, tint, rng)?),
            "f" => {
                if parts.len() < 4 {
                    return Err(MeshError::Parse {
                        line: line_no,
                        message: format!("face needs at least 3 vertices, got {}", parts.len() - 1),
                    });
                }
                let corners = parts[1..]
                    .iter()
                    .map(|token| parse_index(token, line_no, vertices.len()))
                    .collect::<Result<Vec<i64>, MeshError>>()?;

                // Fan around the first corner
                for i in 1..corners.len() - 1 {
                    pending.push((line_no, [corners[0], corners[i], corners[i + 1]]));
                }
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} unsupported OBJ statements", skipped);
    }

    let count = vertices.len();
    let mut faces = Vec::with_capacity(pending.len());
    for (line, [a, b, c]) in pending {
        for index in [a, b, c] {
            if index < 0 || index as usize >= count {
                return Err(MeshError::IndexOutOfRange {
                    line,
                    // Report in the file's 1-based numbering
                    index: index + 1,
                    count,
                });
            }
        }
        faces.push(Face::new(a as usize, b as usize, c as usize));
    }

    if faces.is_empty() {
        return Err(MeshError::Empty);
    }

    Ok(Mesh::new(faces, vertices))
}

fn parse_vertex<R: Rng + ?Sized>(
    args: &[&str],
    line: usize,
    tint: &TintConfig,
    rng: &mut R,
) -> Result<Vertex, MeshError> {
    if args.len() < 3 {
        return Err(MeshError::Parse {
            line,
            message: format!("vertex needs 3 coordinates, got {}", args.len()),
        });
    }

    let numbers = args[..3]
        .iter()
        .map(|s| {
            s.parse::<f64>().map_err(|e| MeshError::Parse {
                line,
                message: format!("bad coordinate '{}': {}", s, e),
            })
        })
        .collect::<Result<Vec<f64>, MeshError>>()?;

    let pos = Vec3::new(numbers[0], numbers[1], numbers[2]);
    Ok(Vertex::new(pos, tint.sample(rng)))
}

/// 1-based (or negative, relative) OBJ index to a 0-based index.
/// Range checking happens after parsing since faces may precede vertices.
fn parse_index(token: &str, line: usize, seen: usize) -> Result<i64, MeshError> {
    let head = token.split('/').next().unwrap_or(token);
    let index = head.parse::<i64>().map_err(|e| MeshError::Parse {
        line,
        message: format!("bad vertex index '{}': {}", token, e),
    })?;

    match index {
        0 => Err(MeshError::IndexOutOfRange { line, index: 0, count: seen }),
        i if i < 0 => Ok(seen as i64 + i),
        i => Ok(i - 1),
    }
}
