//! Screen <-> world mapping: a uniform scale plus a pan offset.

use crate::model::Vec2;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 100.0;
pub const ZOOM_SENSITIVITY: f32 = 0.1;

#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    pub scale: f32,
    pub pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform {
            scale: 1.0,
            pan: Vec2::new(0.0, 0.0),
        }
    }
}

impl ViewTransform {
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.pan.x) / self.scale,
            (p.y - self.pan.y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x * self.scale + self.pan.x, p.y * self.scale + self.pan.y)
    }

    /// Exponential zoom by wheel ticks about a fixed screen point; the
    /// world point under the cursor stays put. Scale is clamped to
    /// [MIN_SCALE, MAX_SCALE].
    pub fn zoom_about(&mut self, screen: Vec2, ticks: f32) {
        let zoom = (ticks * ZOOM_SENSITIVITY).exp();
        let world = self.screen_to_world(screen);
        let new_scale = (self.scale * zoom).clamp(MIN_SCALE, MAX_SCALE);
        self.pan.x = screen.x - world.x * new_scale;
        self.pan.y = screen.y - world.y * new_scale;
        self.scale = new_scale;
    }

    /// Fit an image into a viewport: centered, never scaled up.
    pub fn fit(&mut self, image_w: u32, image_h: u32, viewport_w: f32, viewport_h: f32) {
        let h_ratio = viewport_w / image_w as f32;
        let v_ratio = viewport_h / image_h as f32;
        self.scale = h_ratio.min(v_ratio).min(1.0);
        self.pan.x = (viewport_w - image_w as f32 * self.scale) / 2.0;
        self.pan.y = (viewport_h - image_h as f32 * self.scale) / 2.0;
    }
}
