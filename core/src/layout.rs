pub const NAV_GAP_DEFAULT: f64 = 80.0;
pub const NAV_EDGE_DEFAULT: f64 = 12.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Horizontal insets of the prev/next buttons, in whole px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavPlacement {
    pub prev_left: f64,
    pub next_right: f64,
}

impl NavPlacement {
    /// Places the buttons `gap` px outside the media box, never closer than
    /// `edge` px to the viewport. `None` until the media has been laid out.
    pub fn around(media: Rect, viewport_width: f64, gap: f64, edge: f64) -> Option<Self> {
        if !media.has_area() {
            return None;
        }
        Some(Self {
            prev_left: (media.left - gap).round().max(edge),
            next_right: (viewport_width - media.right() - gap).round().max(edge),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_hug_the_media_box() {
        let media = Rect::new(300.0, 100.0, 600.0, 400.0);
        let placement = NavPlacement::around(media, 1200.0, 80.0, 12.0).expect("laid out");
        assert_eq!(placement.prev_left, 220.0);
        assert_eq!(placement.next_right, 220.0);
    }

    #[test]
    fn wide_media_is_kept_off_the_edge() {
        let media = Rect::new(10.4, 0.0, 1180.0, 400.0);
        let placement = NavPlacement::around(media, 1200.0, 80.0, 12.0).expect("laid out");
        assert_eq!(placement.prev_left, 12.0);
        assert_eq!(placement.next_right, 12.0);
    }

    #[test]
    fn unmeasured_media_has_no_placement() {
        assert!(NavPlacement::around(Rect::default(), 800.0, 80.0, 12.0).is_none());
    }
}
