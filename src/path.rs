/// Default minimum horizontal distance of the control points.
pub const MIN_CONTROL_OFFSET: f32 = 50.0;

/// Generate SVG path command for a connection between two pin anchors
///
/// Creates a horizontal-biased cubic bezier: the curve always leaves the
/// start pin and enters the end pin horizontally.
///
/// # Arguments
/// * `start_x`, `start_y` - Start point (pin center)
/// * `end_x`, `end_y` - End point (pin center)
/// * `min_offset` - Minimum control point offset (default: 50.0)
///
/// # Returns
/// SVG path command string (e.g., "M 10 20 C 60 20 90 80 140 80")
pub fn generate_connection_path(
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    min_offset: f32,
) -> String {
    CubicBezier::horizontal((start_x, start_y), (end_x, end_y), min_offset).to_svg()
}

/// Zero-length path drawn the moment a connection gesture starts.
pub fn generate_stub_path(x: f32, y: f32) -> String {
    format!("M {} {} L {} {}", x, y, x, y)
}

/// Cubic bezier curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: (f32, f32), // Start point
    pub p1: (f32, f32), // Control point 1
    pub p2: (f32, f32), // Control point 2
    pub p3: (f32, f32), // End point
}

impl CubicBezier {
    /// Connection curve between two anchors.
    ///
    /// Control points sit `max(min_offset, |dx| / 2)` to the right of the
    /// start and to the left of the end.
    pub fn horizontal(start: (f32, f32), end: (f32, f32), min_offset: f32) -> Self {
        let dx_abs = (end.0 - start.0).abs();
        let offset = (dx_abs * 0.5).max(min_offset);

        CubicBezier {
            p0: start,
            p1: (start.0 + offset, start.1),
            p2: (end.0 - offset, end.1),
            p3: end,
        }
    }

    /// Evaluate the bezier curve at parameter t (0.0 to 1.0)
    pub fn eval(&self, t: f32) -> (f32, f32) {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * self.p0.0
            + 3.0 * mt2 * t * self.p1.0
            + 3.0 * mt * t2 * self.p2.0
            + t3 * self.p3.0;
        let y = mt3 * self.p0.1
            + 3.0 * mt2 * t * self.p1.1
            + 3.0 * mt * t2 * self.p2.1
            + t3 * self.p3.1;

        (x, y)
    }

    /// SVG path: M (move to), C (cubic bezier)
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} C {} {} {} {} {} {}",
            self.p0.0, self.p0.1, self.p1.0, self.p1.1, self.p2.0, self.p2.1, self.p3.0, self.p3.1
        )
    }
}
