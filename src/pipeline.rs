//! Scene rendering: project the mesh, draw it, then fill what is left with
//! the background quad.

use std::time::Instant;
use indicatif::ProgressBar;

use crate::config::RenderConfig;
use crate::rasterizer::{degenerate_faces, rasterize_triangle, render, Face, Framebuffer, Mesh, Rgb, Vec3, Vertex};

/// Two triangles covering the whole raster at constant `depth`
pub fn background_quad(size: usize, depth: f64) -> Mesh {
    let s = size as f64;
    Mesh::new(
        vec![Face::new(0, 1, 2), Face::new(2, 1, 3)],
        vec![
            Vertex::new(Vec3::new(0.0, 0.0, depth), Rgb::RED),
            Vertex::new(Vec3::new(s, 0.0, depth), Rgb::GREEN),
            Vertex::new(Vec3::new(0.0, s, depth), Rgb::BLUE),
            Vertex::new(Vec3::new(s, s, depth), Rgb::BLACK),
        ],
    )
}

/// Render `mesh` (in object space) with the settings in `config`.
///
/// `progress` is advanced once per mesh face; pass `ProgressBar::hidden()`
/// when nobody is watching.
pub fn render_scene(mesh: &Mesh, config: &RenderConfig, progress: &ProgressBar) -> Framebuffer {
    let mut fb = Framebuffer::new(config.raster_size);

    let vertices = config.projection.project_mesh(mesh);
    log::debug!(
        "Projected {} vertices (offset {}, scale {})",
        vertices.len(),
        config.projection.offset,
        config.projection.scale
    );

    let degenerate = degenerate_faces(&mesh.faces, &vertices);
    if degenerate > 0 {
        log::warn!("{} faces are degenerate after projection and will not be drawn", degenerate);
    }

    let now = Instant::now();
    let written = draw_mesh(&mut fb, &mesh.faces, &vertices, config, progress);
    log::info!(
        "Mesh pass: {} faces, {} fragments kept, {} pixels covered ({:.1} ms)",
        mesh.faces.len(),
        written,
        fb.covered(),
        now.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(shader) = config.background.style.shader() {
        let now = Instant::now();
        let quad = background_quad(config.raster_size, config.background.depth);
        let written = render(&mut fb, &quad.faces, &quad.vertices, &shader);
        log::info!(
            "Background pass: {} fragments kept ({:.1} ms)",
            written,
            now.elapsed().as_secs_f64() * 1000.0
        );
    }

    fb
}

fn draw_mesh(
    fb: &mut Framebuffer,
    faces: &[Face],
    vertices: &[Vertex],
    config: &RenderConfig,
    progress: &ProgressBar,
) -> usize {
    progress.set_length(faces.len() as u64);

    let mut written = 0;
    let mut skipped = 0;
    for face in faces {
        let [a, b, c] = face.indices().map(|i| &vertices[i]);
        let n = rasterize_triangle(fb, a, b, c, &config.shading);
        if n == 0 {
            skipped += 1;
        }
        written += n;
        progress.inc(1);
    }
    progress.finish_and_clear();

    if skipped > 0 {
        log::debug!("{} faces wrote no pixels (hidden, degenerate or off-raster)", skipped);
    }
    written
}
