//! SVG emission: fill-only, wireframe-only, and the combined document
//! with clip-masked seam lines along edges shared by exactly two
//! triangles.

use std::collections::HashMap;

use crate::mesh::Mesh;
use crate::model::{Rgb, Triangle, VertexId};

fn polygon_points(mesh: &Mesh, t: &Triangle) -> String {
    let pts: Vec<String> = t
        .v
        .iter()
        .map(|&id| {
            let p = mesh.vertex(id);
            format!("{:.2},{:.2}", p.x, p.y)
        })
        .collect();
    pts.join(" ")
}

fn header(width: u32, height: u32) -> String {
    format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width, height
    )
}

pub(crate) fn fill_impl(mesh: &Mesh, width: u32, height: u32) -> String {
    let mut svg = header(width, height);
    for t in mesh.triangles() {
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"{}\" />\n",
            polygon_points(mesh, t),
            t.color.css()
        ));
    }
    svg.push_str("</svg>");
    svg
}

pub(crate) fn wireframe_impl(mesh: &Mesh, width: u32, height: u32) -> String {
    let mut svg = header(width, height);
    for t in mesh.triangles() {
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"1\" stroke-linejoin=\"round\" />\n",
            polygon_points(mesh, t)
        ));
    }
    svg.push_str("</svg>");
    svg
}

pub(crate) fn combined_impl(mesh: &Mesh, width: u32, height: u32) -> String {
    let mut svg = header(width, height);

    // Clip path over the union of all triangles, so seam strokes cannot
    // bleed outside the mesh silhouette.
    svg.push_str("  <defs>\n    <clipPath id=\"mesh-clip-path\">\n");
    for t in mesh.triangles() {
        svg.push_str(&format!(
            "        <polygon points=\"{}\" />\n",
            polygon_points(mesh, t)
        ));
    }
    svg.push_str("    </clipPath>\n  </defs>\n\n");

    // Shared-edge graph keyed by the unordered endpoint-id pair.
    let mut edge_map: HashMap<(VertexId, VertexId), Vec<Rgb>> = HashMap::new();
    for t in mesh.triangles() {
        for [a, b] in t.edges() {
            let key = (a.min(b), a.max(b));
            edge_map.entry(key).or_default().push(t.color);
        }
    }

    // Seam lines: one per edge shared by exactly two triangles, colored as
    // the blend of the two, to hide the color discontinuity.
    svg.push_str("  <g id=\"seam-lines\" clip-path=\"url(#mesh-clip-path)\">\n");
    let mut seams: Vec<(&(VertexId, VertexId), &Vec<Rgb>)> = edge_map.iter().collect();
    seams.sort_by_key(|(key, _)| **key);
    for (&(a, b), colors) in seams {
        if colors.len() == 2 {
            let p1 = mesh.vertex(a);
            let p2 = mesh.vertex(b);
            let stroke = Rgb::blend(colors[0], colors[1]);
            svg.push_str(&format!(
                "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\" stroke-linecap=\"round\" />\n",
                p1.x, p1.y, p2.x, p2.y, stroke.css()
            ));
        }
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g id=\"filled-triangles\">\n");
    for (i, t) in mesh.triangles().iter().enumerate() {
        svg.push_str(&format!(
            "    <polygon id=\"fill-triangle-{}\" points=\"{}\" fill=\"{}\" />\n",
            i,
            polygon_points(mesh, t),
            t.color.css()
        ));
    }
    svg.push_str("  </g>\n");

    // Wireframe ships hidden; vector editors can flip it on.
    svg.push_str("  <g id=\"wireframe-mesh\" display=\"none\">\n");
    for (i, t) in mesh.triangles().iter().enumerate() {
        svg.push_str(&format!(
            "    <polygon id=\"mesh-triangle-{}\" points=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"1\" stroke-linejoin=\"round\" />\n",
            i,
            polygon_points(mesh, t)
        ));
    }
    svg.push_str("  </g>\n");

    svg.push_str("</svg>");
    svg
}
