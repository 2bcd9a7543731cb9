use crate::model::Vec2;

/// Squared distance from p to segment [a, b], plus the clamped projection
/// parameter t in [0, 1].
pub fn seg_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let vv = vx * vx + vy * vy;
    let mut t = if vv > 0.0 { (wx * vx + wy * vy) / vv } else { 0.0 };
    if t < 0.0 {
        t = 0.0;
    } else if t > 1.0 {
        t = 1.0;
    }
    let projx = a.x + t * vx;
    let projy = a.y + t * vy;
    let dx = p.x - projx;
    let dy = p.y - projy;
    (dx * dx + dy * dy, t)
}

pub fn seg_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    seg_distance_sq(p, a, b).0.sqrt()
}
