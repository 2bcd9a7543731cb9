//! Pointer/wheel/key interpretation: vertex dragging with live validity
//! feedback, panning, the multi-stage triangle-construction flow, hover
//! detection, and zoom.

use log::debug;

use crate::error::Rejection;
use crate::geometry::intersect::point_in_triangle;
use crate::history::Command;
use crate::mesh::Mesh;
use crate::model::{Button, Hover, Key, KeyEvent, Rgb, Triangle, Vec2, VertexId};
use crate::sampler::average_color;
use crate::{DragState, Editor};

/// Drawn radius of a vertex marker, in screen pixels.
pub const POINT_RADIUS: f32 = 5.0;
/// Hit-test radius for snapping and hover, in screen pixels.
pub const HIT_RADIUS: f32 = 10.0;

fn hit_radius_world(ed: &Editor) -> f32 {
    HIT_RADIUS / ed.view.scale
}

pub(crate) fn pointer_down_impl(ed: &mut Editor, screen: Vec2, button: Button) {
    if button != Button::Primary {
        return;
    }
    ed.did_start_drag_on_vertex = false;

    let world = ed.view.screen_to_world(screen);
    if let Some(vertex) = ed.mesh.vertex_near(world, hit_radius_world(ed)) {
        ed.did_start_drag_on_vertex = true;
        ed.dragging = Some(DragState {
            vertex,
            start: ed.mesh.vertex(vertex),
            invalid: false,
        });
    } else {
        ed.panning = Some(Vec2::new(screen.x - ed.view.pan.x, screen.y - ed.view.pan.y));
    }
}

pub(crate) fn pointer_move_impl(ed: &mut Editor, screen: Vec2) {
    if let Some(drag) = ed.dragging.as_mut() {
        let world = ed.view.screen_to_world(screen);
        ed.mesh.set_vertex(drag.vertex, world);
        drag.invalid = move_is_invalid(&ed.mesh, drag.vertex);
    } else if let Some(start) = ed.panning {
        ed.view.pan = Vec2::new(screen.x - start.x, screen.y - start.y);
    } else {
        update_hover(ed, screen);
    }
}

pub(crate) fn pointer_up_impl(ed: &mut Editor, _screen: Vec2, button: Button) {
    if button != Button::Primary {
        return;
    }
    if let Some(drag) = ed.dragging.take() {
        if drag.invalid {
            ed.mesh.set_vertex(drag.vertex, drag.start);
            ed.notice = Some("Invalid vertex position: Edges would cross.".to_string());
        } else {
            let end = ed.mesh.vertex(drag.vertex);
            // Only record a command when the position actually changed;
            // a press-and-release without motion must not leave an empty
            // undo step.
            if end != drag.start {
                let cmd = Command::move_vertex(&ed.mesh, drag.vertex, drag.start, end);
                ed.history.execute(cmd, &mut ed.mesh, ed.image.as_ref());
                debug!("vertex {} moved", drag.vertex);
            }
        }
    }
    ed.panning = None;
}

pub(crate) fn pointer_leave_impl(ed: &mut Editor) {
    // Abandon any in-flight drag: snap the vertex back so no half-applied
    // move survives outside the history.
    if let Some(drag) = ed.dragging.take() {
        ed.mesh.set_vertex(drag.vertex, drag.start);
    }
    ed.panning = None;
    ed.hovered = None;
}

pub(crate) fn pointer_click_impl(ed: &mut Editor, screen: Vec2) {
    if ed.image.is_none() {
        return;
    }
    // The press that preceded this click grabbed a vertex; outside of an
    // active construction that was the start of a drag, not a selection.
    if ed.did_start_drag_on_vertex && ed.pending.is_empty() {
        return;
    }
    triangle_click(ed, screen);
}

fn triangle_click(ed: &mut Editor, screen: Vec2) {
    let world = ed.view.screen_to_world(screen);
    let radius = hit_radius_world(ed);

    // Nothing pending: a click near an edge adopts both its endpoints.
    if ed.pending.is_empty() {
        if let Some(edge) = ed.mesh.edge_near(world, radius) {
            ed.pending.push(edge.a);
            ed.pending.push(edge.b);
            ed.hovered = None;
            return;
        }
    }

    // One point chosen: an edge not containing it supplies the other two
    // corners. An edge that does contain it falls through to plain point
    // selection below.
    if ed.pending.len() == 1 {
        if let Some(edge) = ed.mesh.edge_near(world, radius) {
            let first = ed.pending[0];
            if edge.a != first && edge.b != first {
                try_commit_triangle(ed, [first, edge.a, edge.b]);
                ed.pending.clear();
                ed.hovered = None;
                return;
            }
        }
    }

    if ed.pending.len() == 2 {
        if let Some(Hover::Edge(edge)) = ed.hovered {
            // Clicking the selected edge itself deselects it.
            if ed.pending.contains(&edge.a) && ed.pending.contains(&edge.b) {
                ed.pending.clear();
                ed.hovered = None;
                return;
            }
            // An adjacent edge sharing exactly one endpoint closes the
            // triangle: three unique vertices total.
            let mut unique = ed.pending.clone();
            if !unique.contains(&edge.a) {
                unique.push(edge.a);
            }
            if !unique.contains(&edge.b) {
                unique.push(edge.b);
            }
            if unique.len() == 3 {
                try_commit_triangle(ed, [unique[0], unique[1], unique[2]]);
                ed.pending.clear();
                ed.hovered = None;
                return;
            }
        }

        // A click near an existing vertex closes the selected edge.
        if let Some(v) = ed.mesh.vertex_near(world, radius) {
            if !ed.pending.contains(&v) {
                try_commit_triangle(ed, [ed.pending[0], ed.pending[1], v]);
                ed.pending.clear();
                ed.hovered = None;
                return;
            }
        }
    }

    // Plain point selection: snap to an existing vertex when one is close
    // enough, otherwise place a new one at the click position.
    let snapped = ed.mesh.vertex_near(world, radius);
    if let Some(v) = snapped {
        if ed.pending.contains(&v) {
            return;
        }
    }
    let id = match snapped {
        Some(v) => v,
        None => {
            // A fresh (non-snapped) point may not land inside an existing
            // triangle; reject before it ever joins the pending list.
            if ed.mesh.triangle_at(world).is_some() {
                ed.notice = Some(
                    "Invalid vertex: Cannot create a point inside an existing triangle."
                        .to_string(),
                );
                return;
            }
            ed.mesh.alloc_vertex(world)
        }
    };

    ed.pending.push(id);
    if ed.pending.len() == 3 {
        try_commit_triangle(ed, [ed.pending[0], ed.pending[1], ed.pending[2]]);
        ed.pending.clear();
    }
}

/// Attempt the triangle; on acceptance push an AddTriangle command. The
/// duplicate case is discarded silently, other rejections raise a notice.
fn try_commit_triangle(ed: &mut Editor, v: [VertexId; 3]) -> bool {
    match ed.mesh.validate_triangle(v) {
        Ok(()) => {
            let color = match &ed.image {
                Some(img) => average_color(
                    img,
                    ed.mesh.vertex(v[0]),
                    ed.mesh.vertex(v[1]),
                    ed.mesh.vertex(v[2]),
                ),
                None => Rgb::NEUTRAL,
            };
            let cmd = Command::AddTriangle {
                triangle: Triangle { v, color },
            };
            ed.history.execute(cmd, &mut ed.mesh, ed.image.as_ref());
            debug!("triangle added ({} total)", ed.mesh.len());
            true
        }
        Err(rejection) => {
            debug!("triangle rejected: {rejection}");
            if rejection != Rejection::Duplicate {
                ed.notice = Some(rejection.to_string());
            }
            false
        }
    }
}

pub(crate) fn context_click_impl(ed: &mut Editor, _screen: Vec2) {
    if ed.image.is_none() {
        return;
    }
    // Cancel a construction in progress first; only an idle right-click
    // removes the hovered triangle.
    if !ed.pending.is_empty() {
        ed.pending.clear();
        ed.hovered = None;
        return;
    }
    if let Some(Hover::Triangle(index)) = ed.hovered {
        let triangle = ed.mesh.triangles()[index];
        ed.hovered = None;
        ed.history.execute(
            Command::RemoveTriangle { triangle, index },
            &mut ed.mesh,
            ed.image.as_ref(),
        );
        debug!("triangle removed ({} left)", ed.mesh.len());
    }
}

pub(crate) fn wheel_impl(ed: &mut Editor, screen: Vec2, dx: f32, dy: f32, zoom_modifier: bool) {
    if ed.image.is_none() {
        return;
    }
    if zoom_modifier {
        // Pinch gesture or ctrl + wheel: one exponential step per tick.
        let tick = if dy < 0.0 { 1.0 } else { -1.0 };
        ed.view.zoom_about(screen, tick);
    } else {
        ed.view.pan.x -= dx;
        ed.view.pan.y -= dy;
    }
}

pub(crate) fn key_down_impl(ed: &mut Editor, ev: KeyEvent) {
    if ev.ctrl_or_cmd {
        match ev.key {
            Key::Z => {
                ed.undo();
            }
            Key::Y => {
                ed.redo();
            }
            _ => {}
        }
        return;
    }
    match ev.key {
        Key::Escape => {
            if !ed.pending.is_empty() {
                ed.pending.clear();
                ed.hovered = None;
            }
        }
        Key::Digit1 if !ev.in_text_input => ed.show_image = !ed.show_image,
        Key::Digit2 if !ev.in_text_input => ed.show_triangles = !ed.show_triangles,
        Key::Digit3 if !ev.in_text_input => ed.show_wireframe = !ed.show_wireframe,
        _ => {}
    }
}

/// Hover priority: vertex, then edge, then top-most triangle. Edges are
/// not hoverable under a vertex; triangles only while no construction is
/// pending and neither a vertex nor an edge claims the pointer.
fn update_hover(ed: &mut Editor, screen: Vec2) {
    let world = ed.view.screen_to_world(screen);
    let radius = hit_radius_world(ed);

    let vertex = ed.mesh.vertex_near(world, radius);
    let edge = if vertex.is_none() && ed.pending.len() <= 2 {
        ed.mesh.edge_near(world, radius)
    } else {
        None
    };
    let triangle = if ed.pending.is_empty() && vertex.is_none() && edge.is_none() {
        ed.mesh.triangle_at(world)
    } else {
        None
    };

    ed.hovered = vertex
        .map(Hover::Vertex)
        .or(edge.map(Hover::Edge))
        .or(triangle.map(Hover::Triangle));
}

/// Full revalidation of a moved vertex at its current position: every
/// edge incident to it against every non-incident triangle edge, then
/// containment between incident and non-incident triangles in both
/// directions. Shared vertex ids stay exempt.
pub(crate) fn move_is_invalid(mesh: &Mesh, vertex: VertexId) -> bool {
    let affected = mesh.triangles_with_vertex(vertex);
    let others: Vec<usize> = (0..mesh.len()).filter(|i| !affected.contains(i)).collect();

    // Edges fanning out of the moved vertex, deduped by far endpoint.
    let mut far_ends: Vec<VertexId> = Vec::new();
    for &i in &affected {
        for &id in &mesh.triangles()[i].v {
            if id != vertex && !far_ends.contains(&id) {
                far_ends.push(id);
            }
        }
    }

    for &other in &others {
        for other_edge in mesh.triangles()[other].edges() {
            for &far in &far_ends {
                if mesh.edges_cross([vertex, far], other_edge) {
                    return true;
                }
            }
        }
    }

    for &i in &affected {
        let tri = mesh.triangles()[i];
        let (a, b, c) = (
            mesh.vertex(tri.v[0]),
            mesh.vertex(tri.v[1]),
            mesh.vertex(tri.v[2]),
        );
        for &other in &others {
            let other_tri = mesh.triangles()[other];
            // Foreign vertex swallowed by a moved triangle
            for &id in &other_tri.v {
                if !tri.has_vertex(id) && point_in_triangle(mesh.vertex(id), a, b, c) {
                    return true;
                }
            }
            // Moved triangle corner landing inside a foreign triangle
            let (oa, ob, oc) = (
                mesh.vertex(other_tri.v[0]),
                mesh.vertex(other_tri.v[1]),
                mesh.vertex(other_tri.v[2]),
            );
            for &id in &tri.v {
                if !other_tri.has_vertex(id) && point_in_triangle(mesh.vertex(id), oa, ob, oc) {
                    return true;
                }
            }
        }
    }

    false
}
