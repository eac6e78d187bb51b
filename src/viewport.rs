//! Pan/zoom transform between screen and canvas coordinates.
//!
//! `screen = canvas * scale + pan`, so `canvas = (screen - pan) / scale`.

use crate::config::ViewportConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f32,
    pan_x: f32,
    pan_y: f32,
    config: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            scale: 1.0f32.clamp(config.min_scale, config.max_scale),
            pan_x: 0.0,
            pan_y: 0.0,
            config,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan_offset(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    /// Zoom one wheel step around the cursor.
    ///
    /// A positive `delta` (wheel away from the user) zooms out. The canvas
    /// point under `(cursor_x, cursor_y)` stays under the cursor. Returns
    /// `false` when the scale is already at the limit and nothing changed.
    pub fn zoom(&mut self, delta: f32, cursor_x: f32, cursor_y: f32) -> bool {
        let factor = if delta > 0.0 {
            self.config.zoom_out_factor
        } else {
            self.config.zoom_in_factor
        };
        let new_scale = (self.scale * factor).clamp(self.config.min_scale, self.config.max_scale);
        if new_scale == self.scale {
            return false;
        }

        let change = new_scale / self.scale;
        self.pan_x = cursor_x - (cursor_x - self.pan_x) * change;
        self.pan_y = cursor_y - (cursor_y - self.pan_y) * change;
        self.scale = new_scale;
        log::trace!(
            "zoom {:.3} pan ({:.1}, {:.1})",
            self.scale,
            self.pan_x,
            self.pan_y
        );
        true
    }

    /// Translate by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn screen_to_canvas(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (
            (screen_x - self.pan_x) / self.scale,
            (screen_y - self.pan_y) / self.scale,
        )
    }

    pub fn canvas_to_screen(&self, canvas_x: f32, canvas_y: f32) -> (f32, f32) {
        (
            canvas_x * self.scale + self.pan_x,
            canvas_y * self.scale + self.pan_y,
        )
    }

    /// Set all three values at once; the scale is clamped.
    pub fn set(&mut self, scale: f32, pan_x: f32, pan_y: f32) {
        self.scale = scale.clamp(self.config.min_scale, self.config.max_scale);
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    pub fn reset(&mut self) {
        self.set(1.0, 0.0, 0.0);
    }

    /// SVG transform applied to the node and connection layers.
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.pan_x, self.pan_y, self.scale
        )
    }
}
