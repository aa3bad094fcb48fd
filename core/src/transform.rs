pub const ZOOM_MIN_DEFAULT: f64 = 1.0;
pub const ZOOM_MAX_DEFAULT: f64 = 6.0;
pub const ZOOM_STEP_DEFAULT: f64 = 1.12;
pub const DOUBLE_CLICK_SCALE_DEFAULT: f64 = 2.0;

/// Scales this close to the lower limit land exactly on it.
const SCALE_SNAP_EPSILON: f64 = 1.0e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: ZOOM_MIN_DEFAULT,
            max: ZOOM_MAX_DEFAULT,
        }
    }
}

impl ZoomLimits {
    pub fn clamp(&self, scale: f64) -> f64 {
        let clamped = scale.clamp(self.min, self.max);
        if (clamped - self.min).abs() <= SCALE_SNAP_EPSILON {
            self.min
        } else {
            clamped
        }
    }
}

/// Offset of an anchor point from the rendered image's center, in display px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorOffset {
    pub dx: f64,
    pub dy: f64,
}

impl AnchorOffset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Offset of `(x, y)` from the center of a box at `(left, top)` sized `width` x `height`.
    /// `None` when the box has no measurable area yet.
    pub fn from_box(x: f64, y: f64, left: f64, top: f64, width: f64, height: f64) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            dx: x - left - width / 2.0,
            dy: y - top - height / 2.0,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    ZoomIn,
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::ZoomIn => "zoom-in",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// Scale plus pan offset applied to the displayed image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Multiplies the scale by `factor`, keeping the pixel under `anchor` stationary.
    ///
    /// Returns `false` when the clamped scale does not change. Without an anchor
    /// (image not laid out yet) only the scale is updated.
    pub fn zoom_at(&mut self, factor: f64, anchor: Option<AnchorOffset>, limits: ZoomLimits) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.zoom_to(self.scale * factor, anchor, limits)
    }

    /// Moves to an absolute scale with the same anchoring rules as [`Transform::zoom_at`].
    pub fn zoom_to(&mut self, target: f64, anchor: Option<AnchorOffset>, limits: ZoomLimits) -> bool {
        let prev = self.scale;
        let next = limits.clamp(target);
        if next == prev {
            return false;
        }
        if let Some(anchor) = anchor {
            let ratio = next / prev;
            self.tx -= anchor.dx * (ratio - 1.0);
            self.ty -= anchor.dy * (ratio - 1.0);
        }
        self.scale = next;
        if next == limits.min {
            self.tx = 0.0;
            self.ty = 0.0;
        }
        true
    }

    /// Adds a raw pixel delta; pan is intentionally not bounded by the image box.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    pub fn css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale({})",
            self.tx, self.ty, self.scale
        )
    }

    pub fn cursor(&self, dragging: bool) -> Cursor {
        if !self.is_zoomed() {
            Cursor::ZoomIn
        } else if dragging {
            Cursor::Grabbing
        } else {
            Cursor::Grab
        }
    }
}
