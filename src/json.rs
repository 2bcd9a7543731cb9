//! Mesh file format: indexed-vertex JSON.
//!
//! `{"vertices":[{"x":..,"y":..},..],"triangles":[{"v":[i,j,k]},..]}`
//!
//! Export deduplicates vertices by identity; import validates the whole
//! document (shape, caps, bounds, index validity) before touching any
//! state, then lands as a single Replace command.

use std::collections::HashMap;

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::geometry::limits;
use crate::history::Command;
use crate::mesh::Mesh;
use crate::model::{Triangle, Vec2, VertexId};
use crate::sampler::average_color;
use crate::Editor;

#[derive(Serialize)]
struct VertexSer {
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct TriangleSer {
    v: [usize; 3],
}

#[derive(Serialize)]
struct MeshDoc {
    vertices: Vec<VertexSer>,
    triangles: Vec<TriangleSer>,
}

pub(crate) fn export_impl(mesh: &Mesh) -> String {
    let mut index_of: HashMap<VertexId, usize> = HashMap::new();
    let mut vertices = Vec::new();
    let mut triangles = Vec::new();
    for t in mesh.triangles() {
        let mut v = [0usize; 3];
        for (k, &id) in t.v.iter().enumerate() {
            let idx = match index_of.get(&id) {
                Some(&idx) => idx,
                None => {
                    let p = mesh.vertex(id);
                    vertices.push(VertexSer { x: p.x, y: p.y });
                    let idx = vertices.len() - 1;
                    index_of.insert(id, idx);
                    idx
                }
            };
            v[k] = idx;
        }
        triangles.push(TriangleSer { v });
    }
    serde_json::to_string_pretty(&MeshDoc {
        vertices,
        triangles,
    })
    .unwrap()
}

fn format_err(msg: &str) -> Error {
    warn!("mesh import rejected: {msg}");
    Error::ImportFormat(msg.to_string())
}

/// Parse and fully validate a mesh document. Nothing is mutated here.
fn parse_impl(text: &str) -> Result<(Vec<Vec2>, Vec<[usize; 3]>), Error> {
    let doc: Value =
        serde_json::from_str(text).map_err(|_| format_err("Invalid mesh file format."))?;
    let vertices = doc
        .get("vertices")
        .and_then(Value::as_array)
        .ok_or_else(|| format_err("Invalid mesh file format."))?;
    let triangles = doc
        .get("triangles")
        .and_then(Value::as_array)
        .ok_or_else(|| format_err("Invalid mesh file format."))?;

    if vertices.len() > limits::MAX_VERTICES || triangles.len() > limits::MAX_TRIANGLES {
        return Err(format_err("Mesh file exceeds size limits."));
    }

    let mut points = Vec::with_capacity(vertices.len());
    for v in vertices {
        let x = v.get("x").and_then(Value::as_f64).map(|x| x as f32);
        let y = v.get("y").and_then(Value::as_f64).map(|y| y as f32);
        match (x, y) {
            (Some(x), Some(y)) if limits::in_coord_bounds(x) && limits::in_coord_bounds(y) => {
                points.push(Vec2::new(x, y));
            }
            _ => return Err(format_err("Invalid vertex data in mesh file.")),
        }
    }

    let mut indexed = Vec::with_capacity(triangles.len());
    for t in triangles {
        let arr = t
            .get("v")
            .and_then(Value::as_array)
            .ok_or_else(|| format_err("Invalid triangle data in mesh file."))?;
        if arr.len() != 3 {
            return Err(format_err("Invalid triangle data in mesh file."));
        }
        let mut v = [0usize; 3];
        for (k, idx) in arr.iter().enumerate() {
            let i = idx
                .as_u64()
                .map(|i| i as usize)
                .filter(|&i| i < points.len())
                .ok_or_else(|| format_err("Invalid triangle data in mesh file."))?;
            v[k] = i;
        }
        if v[0] == v[1] || v[1] == v[2] || v[0] == v[2] {
            return Err(format_err("Invalid triangle data in mesh file."));
        }
        indexed.push(v);
    }

    Ok((points, indexed))
}

pub(crate) fn import_impl(ed: &mut Editor, text: &str) -> Result<(), Error> {
    let image = ed.image.as_ref().ok_or(Error::Precondition(
        "Please load an image before importing a mesh.",
    ))?;

    let (points, indexed) = parse_impl(text)?;

    // Validation passed; only now touch the arena.
    let colors: Vec<_> = indexed
        .iter()
        .map(|&[i, j, k]| average_color(image, points[i], points[j], points[k]))
        .collect();
    let ids: Vec<VertexId> = points.iter().map(|&p| ed.mesh.alloc_vertex(p)).collect();
    let triangles: Vec<Triangle> = indexed
        .iter()
        .zip(colors)
        .map(|(&[i, j, k], color)| Triangle {
            v: [ids[i], ids[j], ids[k]],
            color,
        })
        .collect();

    let cmd = Command::replace(&ed.mesh, triangles);
    ed.history.execute(cmd, &mut ed.mesh, ed.image.as_ref());
    ed.pending.clear();
    ed.hovered = None;
    Ok(())
}
