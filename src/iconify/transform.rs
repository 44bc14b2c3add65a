//! Rotation and flip transforms for icon bodies
//!
//! Iconify describes transforms as flags on the icon record. They are applied by
//! wrapping the body in a single `<g transform="...">` group whose transform list
//! is ordered rotate, horizontal flip, vertical flip.
//!
//! Flips mirror around the far edge of the viewBox and translate back, so the
//! flipped shape occupies the same box:
//!
//! ```text
//! hFlip: translate(2 * left + width 0) scale(-1 1)
//! vFlip: translate(0 2 * top + height) scale(1 -1)
//! ```

/// The viewBox an icon is drawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Geometric center of the box
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }
}

/// Transform flags resolved for one icon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IconTransform {
    /// Quarter turns clockwise
    pub rotate: u8,
    pub h_flip: bool,
    pub v_flip: bool,
}

impl IconTransform {
    pub fn is_identity(&self) -> bool {
        self.rotate == 0 && !self.h_flip && !self.v_flip
    }
}

/// Wrap `body` in a group applying `transform` within `view_box`.
///
/// The identity transform returns the body untouched.
pub fn apply_transform(body: &str, view_box: ViewBox, transform: IconTransform) -> String {
    if transform.is_identity() {
        return body.to_string();
    }

    let mut parts = Vec::with_capacity(3);

    if transform.rotate != 0 {
        let (center_x, center_y) = view_box.center();
        parts.push(format!(
            "rotate({} {} {})",
            f64::from(transform.rotate) * 90.0,
            center_x,
            center_y
        ));
    }

    if transform.h_flip {
        parts.push(format!(
            "translate({} 0) scale(-1 1)",
            2.0 * view_box.left + view_box.width
        ));
    }

    if transform.v_flip {
        parts.push(format!(
            "translate(0 {}) scale(1 -1)",
            2.0 * view_box.top + view_box.height
        ));
    }

    format!(r#"<g transform="{}">{}</g>"#, parts.join(" "), body)
}
