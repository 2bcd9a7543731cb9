use serde::{Deserialize, Serialize};

/// Identity of a vertex in the mesh arena. Two vertices with equal
/// coordinates are still distinct unless they share an id.
pub type VertexId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    #[inline]
    pub fn dist_sq(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dist(self, other: Vec2) -> f32 {
        self.dist_sq(other).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Fallback for triangles that cover no sample pixels.
    pub const NEUTRAL: Rgb = Rgb { r: 128, g: 128, b: 128 };

    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Midpoint of two colors, rounding halves up.
    pub fn blend(a: Rgb, b: Rgb) -> Rgb {
        Rgb {
            r: ((a.r as u16 + b.r as u16 + 1) / 2) as u8,
            g: ((a.g as u16 + b.g as u16 + 1) / 2) as u8,
            b: ((a.b as u16 + b.b as u16 + 1) / 2) as u8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    /// Arena ids, pairwise distinct. Order matters for edge iteration only.
    pub v: [VertexId; 3],
    pub color: Rgb,
}

impl Triangle {
    pub fn edges(&self) -> [[VertexId; 2]; 3] {
        [
            [self.v[0], self.v[1]],
            [self.v[1], self.v[2]],
            [self.v[2], self.v[0]],
        ]
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.v.contains(&id)
    }

    /// Same vertex set regardless of winding.
    pub fn same_vertex_set(&self, other: [VertexId; 3]) -> bool {
        let mut a = self.v;
        let mut b = other;
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

/// A triangle edge referenced by endpoint identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeRef {
    pub a: VertexId,
    pub b: VertexId,
}

/// What the pointer currently rests on, highest priority first: a vertex
/// beats an edge beats a triangle interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hover {
    Vertex(VertexId),
    Edge(EdgeRef),
    /// Index into the mesh's triangle list (top-most match).
    Triangle(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Z,
    Y,
    Escape,
    Digit1,
    Digit2,
    Digit3,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Ctrl on most platforms, Cmd on macOS.
    pub ctrl_or_cmd: bool,
    /// Set while a text input has focus; visibility toggles are suppressed.
    pub in_text_input: bool,
}
