//! The mesh store: a vertex arena plus an insertion-ordered triangle list.
//!
//! Vertex identity is the arena index. Ids are issued by `alloc_vertex`,
//! never reused and never invalidated; a slot left behind by a cancelled
//! construction or an undone import is simply unreachable. Every query
//! walks ids referenced by triangles, so orphaned slots are unobservable.

use crate::error::Rejection;
use crate::geometry::intersect::{point_in_triangle, segments_intersect};
use crate::geometry::math::seg_distance_sq;
use crate::model::{EdgeRef, Rgb, Triangle, Vec2, VertexId};

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vec2>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Drop everything; existing ids become invalid. Only used when a new
    /// session starts (image load).
    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    pub fn alloc_vertex(&mut self, p: Vec2) -> VertexId {
        let id = self.vertices.len() as VertexId;
        self.vertices.push(p);
        id
    }

    pub fn vertex(&self, id: VertexId) -> Vec2 {
        self.vertices[id as usize]
    }

    pub(crate) fn set_vertex(&mut self, id: VertexId, p: Vec2) {
        self.vertices[id as usize] = p;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub(crate) fn push_triangle(&mut self, t: Triangle) {
        self.triangles.push(t);
    }

    pub(crate) fn pop_triangle(&mut self) -> Option<Triangle> {
        self.triangles.pop()
    }

    pub(crate) fn insert_triangle(&mut self, index: usize, t: Triangle) {
        self.triangles.insert(index, t);
    }

    pub(crate) fn remove_triangle(&mut self, index: usize) -> Triangle {
        self.triangles.remove(index)
    }

    pub(crate) fn set_triangles(&mut self, triangles: Vec<Triangle>) {
        self.triangles = triangles;
    }

    pub(crate) fn set_color(&mut self, index: usize, color: Rgb) {
        self.triangles[index].color = color;
    }

    /// Indices of all triangles referencing the vertex.
    pub fn triangles_with_vertex(&self, id: VertexId) -> Vec<usize> {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.has_vertex(id))
            .map(|(i, _)| i)
            .collect()
    }

    /// An existing triangle with exactly this vertex id set?
    pub fn is_duplicate(&self, v: [VertexId; 3]) -> bool {
        self.triangles.iter().any(|t| t.same_vertex_set(v))
    }

    /// Identity-aware crossing test: edges that share an endpoint id are
    /// legal mesh connectivity, never a crossing.
    pub fn edges_cross(&self, e: [VertexId; 2], f: [VertexId; 2]) -> bool {
        if e[0] == f[0] || e[0] == f[1] || e[1] == f[0] || e[1] == f[1] {
            return false;
        }
        segments_intersect(
            self.vertex(e[0]),
            self.vertex(e[1]),
            self.vertex(f[0]),
            self.vertex(f[1]),
        )
    }

    /// Would a triangle over these ids be legal to insert? Checks, in
    /// order: duplicate vertex set, edge crossings against every existing
    /// edge, then containment in both directions (shared ids exempt).
    /// Callers must not apply the mutation on `Err`.
    pub fn validate_triangle(&self, v: [VertexId; 3]) -> Result<(), Rejection> {
        debug_assert!(v[0] != v[1] && v[1] != v[2] && v[0] != v[2]);

        if self.is_duplicate(v) {
            return Err(Rejection::Duplicate);
        }

        let new_edges = [[v[0], v[1]], [v[1], v[2]], [v[2], v[0]]];
        for t in &self.triangles {
            for old_edge in t.edges() {
                for new_edge in new_edges {
                    if self.edges_cross(new_edge, old_edge) {
                        return Err(Rejection::EdgeCross);
                    }
                }
            }
        }

        let (a, b, c) = (self.vertex(v[0]), self.vertex(v[1]), self.vertex(v[2]));
        for t in &self.triangles {
            let (ta, tb, tc) = (
                self.vertex(t.v[0]),
                self.vertex(t.v[1]),
                self.vertex(t.v[2]),
            );
            // A non-shared new vertex sitting inside an existing triangle
            for &id in &v {
                if !t.has_vertex(id) && point_in_triangle(self.vertex(id), ta, tb, tc) {
                    return Err(Rejection::VertexInsideTriangle);
                }
            }
            // A non-shared existing vertex swallowed by the candidate
            for &id in &t.v {
                if !v.contains(&id) && point_in_triangle(self.vertex(id), a, b, c) {
                    return Err(Rejection::Engulfs);
                }
            }
        }

        Ok(())
    }

    /// Nearest vertex (by id, scanning triangle references) strictly
    /// within `radius` of `p`, for snapping.
    pub fn vertex_near(&self, p: Vec2, radius: f32) -> Option<VertexId> {
        let r2 = radius * radius;
        let mut best: Option<(VertexId, f32)> = None;
        for t in &self.triangles {
            for &id in &t.v {
                let d2 = p.dist_sq(self.vertex(id));
                if d2 < r2 && best.map_or(true, |(_, bd)| d2 < bd) {
                    best = Some((id, d2));
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// Closest triangle edge by perpendicular distance, if strictly within
    /// `radius`.
    pub fn edge_near(&self, p: Vec2, radius: f32) -> Option<EdgeRef> {
        let mut best: Option<(EdgeRef, f32)> = None;
        for t in &self.triangles {
            for [a, b] in t.edges() {
                let (d2, _) = seg_distance_sq(p, self.vertex(a), self.vertex(b));
                if best.map_or(true, |(_, bd)| d2 < bd) {
                    best = Some((EdgeRef { a, b }, d2));
                }
            }
        }
        match best {
            Some((e, d2)) if d2 < radius * radius => Some(e),
            _ => None,
        }
    }

    /// Top-most triangle whose closed interior contains `p`. Newer
    /// triangles occlude older ones, so scan in reverse insertion order.
    pub fn triangle_at(&self, p: Vec2) -> Option<usize> {
        for (i, t) in self.triangles.iter().enumerate().rev() {
            let (a, b, c) = (
                self.vertex(t.v[0]),
                self.vertex(t.v[1]),
                self.vertex(t.v[2]),
            );
            if point_in_triangle(p, a, b, c) {
                return Some(i);
            }
        }
        None
    }
}
