//! Open/close lifecycle, navigation and gesture state of the single viewer.
//!
//! Every operation is synchronous and leaves the state consistent before the
//! next event is processed. Asynchronous media completions are matched against
//! a [`RenderTicket`] so that one issued before a later open, navigate or close
//! is recognised as stale.

use crate::gallery::{Gallery, NavState};
use crate::media::GalleryItem;
use crate::transform::{AnchorOffset, Cursor, Transform, ZoomLimits};

/// Identity of one render of one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    pub generation: u64,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub origin_x: f64,
    pub origin_y: f64,
    pub start_tx: f64,
    pub start_ty: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomSettings {
    pub limits: ZoomLimits,
    pub step: f64,
    pub double_click_scale: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            limits: ZoomLimits::default(),
            step: crate::transform::ZOOM_STEP_DEFAULT,
            double_click_scale: crate::transform::DOUBLE_CLICK_SCALE_DEFAULT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewerState {
    gallery: Option<Gallery>,
    transform: Transform,
    drag: Option<DragState>,
    natural_size: Option<NaturalSize>,
    generation: u64,
    zoom: ZoomSettings,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(ZoomSettings::default())
    }
}

impl ViewerState {
    pub fn new(zoom: ZoomSettings) -> Self {
        Self {
            gallery: None,
            transform: Transform::IDENTITY,
            drag: None,
            natural_size: None,
            generation: 0,
            zoom,
        }
    }

    pub fn is_open(&self) -> bool {
        self.gallery.is_some()
    }

    /// Items of the current group; empty while closed.
    pub fn group(&self) -> &[GalleryItem] {
        self.gallery
            .as_ref()
            .map(|gallery| gallery.items())
            .unwrap_or(&[])
    }

    /// Current position; `None` while closed.
    pub fn index(&self) -> Option<usize> {
        self.gallery.as_ref().map(Gallery::index)
    }

    pub fn current(&self) -> Option<&GalleryItem> {
        self.gallery.as_ref().map(Gallery::current)
    }

    pub fn current_is_image(&self) -> bool {
        self.current().map(GalleryItem::is_image).unwrap_or(false)
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn cursor(&self) -> Cursor {
        self.transform.cursor(self.drag.is_some())
    }

    pub fn natural_size(&self) -> Option<NaturalSize> {
        self.natural_size
    }

    pub fn zoom_settings(&self) -> ZoomSettings {
        self.zoom
    }

    pub fn nav_state(&self) -> NavState {
        self.gallery
            .as_ref()
            .map(Gallery::nav_state)
            .unwrap_or_default()
    }

    pub fn preload_targets(&self) -> Vec<&str> {
        self.gallery
            .as_ref()
            .map(Gallery::preload_targets)
            .unwrap_or_default()
    }

    pub fn ticket(&self) -> Option<RenderTicket> {
        self.index().map(|index| RenderTicket {
            generation: self.generation,
            index,
        })
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.ticket() == Some(ticket)
    }

    /// Replaces the group (opening if closed) and issues a fresh ticket.
    pub fn open(&mut self, gallery: Gallery) -> RenderTicket {
        self.gallery = Some(gallery);
        self.begin_render()
    }

    /// Returns `false` when already closed.
    pub fn close(&mut self) -> bool {
        let was_open = self.gallery.take().is_some();
        self.generation = self.generation.wrapping_add(1);
        self.reset_view();
        was_open
    }

    /// Steps through the group; `None` when closed or already at the end.
    pub fn navigate(&mut self, delta: isize) -> Option<RenderTicket> {
        let moved = self.gallery.as_mut()?.step(delta);
        if !moved {
            return None;
        }
        Some(self.begin_render())
    }

    fn begin_render(&mut self) -> RenderTicket {
        self.generation = self.generation.wrapping_add(1);
        self.reset_view();
        RenderTicket {
            generation: self.generation,
            index: self.index().unwrap_or_default(),
        }
    }

    fn reset_view(&mut self) {
        self.transform.reset();
        self.drag = None;
        self.natural_size = None;
    }

    /// Records the decoded size of the current image; stale tickets are ignored.
    pub fn set_natural_size(&mut self, ticket: RenderTicket, width: u32, height: u32) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.natural_size = Some(NaturalSize { width, height });
        true
    }

    pub fn zoom_at(&mut self, factor: f64, anchor: Option<AnchorOffset>) -> bool {
        if !self.current_is_image() {
            return false;
        }
        let changed = self.transform.zoom_at(factor, anchor, self.zoom.limits);
        if !self.transform.is_zoomed() {
            self.drag = None;
        }
        changed
    }

    /// One wheel notch: negative `delta_y` zooms in, positive zooms out, zero is ignored.
    pub fn wheel_zoom(&mut self, delta_y: f64, anchor: Option<AnchorOffset>) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y < 0.0 {
            self.zoom.step
        } else {
            1.0 / self.zoom.step
        };
        self.zoom_at(factor, anchor)
    }

    /// Double-click toggle between identity and the fixed zoomed scale.
    pub fn toggle_zoom(&mut self, anchor: Option<AnchorOffset>) -> bool {
        if !self.current_is_image() {
            return false;
        }
        if self.transform.is_zoomed() {
            self.drag = None;
            self.transform.reset();
            return true;
        }
        self.transform
            .zoom_to(self.zoom.double_click_scale, anchor, self.zoom.limits)
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
        if !self.current_is_image() || !self.transform.is_zoomed() {
            return false;
        }
        self.drag = Some(DragState {
            origin_x: x,
            origin_y: y,
            start_tx: self.transform.tx,
            start_ty: self.transform.ty,
        });
        true
    }

    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        self.transform.tx = drag.start_tx;
        self.transform.ty = drag.start_ty;
        self.transform.pan(x - drag.origin_x, y - drag.origin_y);
        true
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_images(state: &mut ViewerState, len: usize, index: usize) -> RenderTicket {
        let items = (0..len)
            .map(|idx| GalleryItem::image(format!("/p/{idx}.webp")))
            .collect();
        state.open(Gallery::new(items, index).expect("gallery"))
    }

    #[test]
    fn starts_closed() {
        let state = ViewerState::default();
        assert!(!state.is_open());
        assert!(state.group().is_empty());
        assert_eq!(state.index(), None);
        assert!(state.ticket().is_none());
    }

    #[test]
    fn close_clears_group_and_transform() {
        let mut state = ViewerState::default();
        open_images(&mut state, 2, 1);
        state.zoom_at(2.0, Some(AnchorOffset::new(3.0, 3.0)));
        assert!(state.close());
        assert!(state.group().is_empty());
        assert_eq!(state.index(), None);
        assert!(state.transform().is_identity());
        assert!(!state.close());
    }

    #[test]
    fn navigation_resets_transform() {
        let mut state = ViewerState::default();
        open_images(&mut state, 3, 0);
        state.zoom_at(2.0, Some(AnchorOffset::new(10.0, 0.0)));
        state.begin_drag(1.0, 1.0);
        let ticket = state.navigate(1).expect("moved");
        assert_eq!(ticket.index, 1);
        assert!(state.transform().is_identity());
        assert!(!state.is_dragging());
    }

    #[test]
    fn tickets_go_stale() {
        let mut state = ViewerState::default();
        let first = open_images(&mut state, 3, 0);
        assert!(state.is_current(first));
        let second = state.navigate(1).expect("moved");
        assert!(!state.is_current(first));
        assert!(!state.set_natural_size(first, 10, 10));
        assert!(state.set_natural_size(second, 640, 480));
        assert_eq!(
            state.natural_size(),
            Some(NaturalSize {
                width: 640,
                height: 480
            })
        );
        state.close();
        assert!(!state.is_current(second));
        let reopened = open_images(&mut state, 3, 1);
        assert_ne!(reopened, second);
    }

    #[test]
    fn drag_follows_pointer_from_origin() {
        let mut state = ViewerState::default();
        open_images(&mut state, 1, 0);
        assert!(!state.begin_drag(0.0, 0.0));
        state.zoom_at(2.0, None);
        assert!(state.begin_drag(100.0, 100.0));
        assert_eq!(state.cursor(), Cursor::Grabbing);
        assert!(state.drag_to(130.0, 90.0));
        assert!(state.drag_to(150.0, 80.0));
        assert_eq!((state.transform().tx, state.transform().ty), (50.0, -20.0));
        assert!(state.end_drag());
        assert!(!state.drag_to(0.0, 0.0));
        assert_eq!(state.cursor(), Cursor::Grab);
    }

    #[test]
    fn zero_wheel_delta_is_ignored() {
        let mut state = ViewerState::default();
        open_images(&mut state, 1, 0);
        assert!(!state.wheel_zoom(0.0, None));
        assert!(state.transform().is_identity());
    }

    #[test]
    fn zooming_back_to_identity_ends_the_drag() {
        let mut state = ViewerState::default();
        open_images(&mut state, 1, 0);
        assert!(state.zoom_at(1.12, Some(AnchorOffset::new(20.0, 10.0))));
        assert!(state.begin_drag(100.0, 100.0));
        assert!(state.wheel_zoom(120.0, Some(AnchorOffset::new(0.0, 0.0))));
        assert!(state.transform().is_identity());
        assert!(!state.is_dragging());
        assert!(!state.drag_to(300.0, 50.0));
        assert!(state.transform().is_identity());
        assert_eq!(state.cursor(), Cursor::ZoomIn);
    }
}
