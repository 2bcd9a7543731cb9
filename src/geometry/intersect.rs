// Orientation and containment predicates over f32 points, computed in f64
// with a collinearity dead zone.

use super::tolerance::{near_zero, EPS_COLLINEAR};
use crate::model::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let val = (q.y as f64 - p.y as f64) * (r.x as f64 - q.x as f64)
        - (q.x as f64 - p.x as f64) * (r.y as f64 - q.y as f64);
    if near_zero(val, EPS_COLLINEAR) {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Given collinear p, q, r: does q lie on segment [p, r]?
pub fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Do segments [p1, q1] and [p2, q2] intersect? Pure coordinate test:
/// orientation pairs plus the three collinear-overlap special cases.
/// Endpoint-identity exclusion lives in the mesh store, not here.
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // General case: the segments straddle each other
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear endpoints lying on the other segment
    if o1 == Orientation::Collinear && on_segment(p1, p2, q1) {
        return true;
    }
    if o2 == Orientation::Collinear && on_segment(p1, q2, q1) {
        return true;
    }
    if o3 == Orientation::Collinear && on_segment(p2, p1, q2) {
        return true;
    }
    if o4 == Orientation::Collinear && on_segment(p2, q1, q2) {
        return true;
    }

    false
}

/// Closed point-in-triangle via signed barycentric coordinates; boundary
/// points count as inside, so containment checks stay conservative.
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (cx, cy) = (c.x as f64, c.y as f64);

    let area = 0.5 * (-by * cx + ay * (-bx + cx) + ax * (by - cy) + bx * cy);
    let sign = if area < 0.0 { -1.0 } else { 1.0 };
    let s = (ay * cx - ax * cy + (cy - ay) * px + (ax - cx) * py) * sign;
    let t = (ax * by - ay * bx + (ay - by) * px + (bx - ax) * py) * sign;

    s >= 0.0 && t >= 0.0 && (s + t) <= 2.0 * area * sign
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn orientation_basic() {
        assert_eq!(
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)),
            Orientation::Collinear
        );
        assert_eq!(
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, -1.0)),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn proper_cross() {
        assert!(segments_intersect(
            v(0.0, 0.0),
            v(2.0, 2.0),
            v(0.0, 2.0),
            v(2.0, 0.0)
        ));
    }

    #[test]
    fn disjoint_segments() {
        assert!(!segments_intersect(
            v(0.0, 0.0),
            v(1.0, 0.0),
            v(0.0, 1.0),
            v(1.0, 1.0)
        ));
    }

    #[test]
    fn collinear_overlap_detected() {
        assert!(segments_intersect(
            v(0.0, 0.0),
            v(3.0, 0.0),
            v(1.0, 0.0),
            v(2.0, 0.0)
        ));
    }

    #[test]
    fn coincident_endpoint_by_value_touches() {
        // Value-level touch still intersects; only identity sharing is
        // excluded, one level up in the mesh store.
        assert!(segments_intersect(
            v(0.0, 0.0),
            v(1.0, 0.0),
            v(1.0, 0.0),
            v(2.0, 1.0)
        ));
    }

    #[test]
    fn centroid_inside() {
        let (a, b, c) = (v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0));
        let centroid = v((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
        assert!(point_in_triangle(centroid, a, b, c));
    }

    #[test]
    fn far_point_outside() {
        let (a, b, c) = (v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0));
        assert!(!point_in_triangle(v(100.0, 100.0), a, b, c));
    }

    #[test]
    fn boundary_counts_as_inside() {
        let (a, b, c) = (v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0));
        assert!(point_in_triangle(v(5.0, 0.0), a, b, c));
        assert!(point_in_triangle(a, a, b, c));
    }
}
