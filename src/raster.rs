//! Raster export: filled triangles over a transparent background.

use crate::geometry::intersect::point_in_triangle;
use crate::mesh::Mesh;
use crate::model::Vec2;

/// Render the mesh into a fresh RGBA8 buffer of the given size. Triangles
/// paint in insertion order, so later ones overwrite where they overlap;
/// untouched pixels stay fully transparent. No stroke.
pub(crate) fn render_impl(mesh: &Mesh, width: u32, height: u32) -> Vec<u8> {
    let mut out = vec![0u8; (width as usize) * (height as usize) * 4];
    for t in mesh.triangles() {
        let a = mesh.vertex(t.v[0]);
        let b = mesh.vertex(t.v[1]);
        let c = mesh.vertex(t.v[2]);

        let min_x = (a.x.min(b.x).min(c.x).floor() as i64).max(0);
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).min(width as i64);
        let min_y = (a.y.min(b.y).min(c.y).floor() as i64).max(0);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).min(height as i64);

        for y in min_y..max_y {
            for x in min_x..max_x {
                if point_in_triangle(Vec2::new(x as f32, y as f32), a, b, c) {
                    let i = ((y as usize) * (width as usize) + x as usize) * 4;
                    out[i] = t.color.r;
                    out[i + 1] = t.color.g;
                    out[i + 2] = t.color.b;
                    out[i + 3] = 255;
                }
            }
        }
    }
    out
}
