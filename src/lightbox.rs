//! The page-wide viewer: one state machine bound to one overlay.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlImageElement};

use mizuki_lightbox_core::{AnchorOffset, Gallery, LightboxConfig, RenderTicket, ViewerState};

use crate::config;
use crate::dom;
use crate::error::{self, Result};
use crate::renderer;
use crate::surface::ViewerSurface;
use crate::trigger;

thread_local! {
    static LIGHTBOX: RefCell<Option<Rc<Lightbox>>> = RefCell::new(None);
}

pub(crate) struct Lightbox {
    config: LightboxConfig,
    state: RefCell<ViewerState>,
    surface: RefCell<Option<ViewerSurface>>,
    nav_frame: RefCell<Option<AnimationFrame>>,
}

impl Lightbox {
    /// The instance for this page, created with the page config on first use.
    pub(crate) fn shared() -> Rc<Self> {
        LIGHTBOX.with(|slot| {
            slot.borrow_mut()
                .get_or_insert_with(|| Rc::new(Self::new(config::load_config())))
                .clone()
        })
    }

    fn new(config: LightboxConfig) -> Self {
        Self {
            state: RefCell::new(ViewerState::new(config.zoom_settings())),
            config,
            surface: RefCell::new(None),
            nav_frame: RefCell::new(None),
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub(crate) fn showing_image(&self) -> bool {
        self.image_surface().is_some()
    }

    pub(crate) fn handle_resize(self: &Rc<Self>) {
        if self.is_open() {
            self.schedule_nav_placement();
        }
    }

    /// Returns the attached overlay, building it if the page lost it. A
    /// rebuilt overlay starts closed.
    pub(crate) fn ensure_surface(&self) -> Result<ViewerSurface> {
        if let Some(surface) = self.surface.borrow().as_ref() {
            if surface.is_attached() {
                return Ok(surface.clone());
            }
        }
        let (surface, created) = ViewerSurface::ensure(&self.config)?;
        if created && self.state.borrow_mut().close() {
            gloo::console::log!("lightbox: overlay was replaced, closing viewer");
            self.nav_frame.borrow_mut().take();
            surface.hide()?;
        }
        *self.surface.borrow_mut() = Some(surface.clone());
        Ok(surface)
    }

    /// The overlay while the viewer is showing.
    fn open_surface(&self) -> Option<ViewerSurface> {
        if !self.is_open() {
            return None;
        }
        self.surface.borrow().clone()
    }

    /// The overlay while an image is on screen; a failed image is hidden and
    /// takes no gestures.
    fn image_surface(&self) -> Option<ViewerSurface> {
        if !self.state.borrow().current_is_image() {
            return None;
        }
        self.open_surface().filter(|surface| !surface.image.hidden())
    }

    /// Opens the gallery around `trigger`; `false` when it has no usable source.
    pub(crate) fn open_trigger(self: &Rc<Self>, trigger: &Element) -> Result<bool> {
        let origin = trigger::read_attrs(trigger);
        let candidates = trigger::collect_candidates(trigger, &self.config);
        let Some(gallery) = Gallery::build(&origin, &candidates) else {
            return Ok(false);
        };
        let surface = self.ensure_surface()?;
        let ticket = self.state.borrow_mut().open(gallery);
        surface.show()?;
        self.render(&surface, ticket)?;
        dom::try_focus(surface.close.as_ref());
        Ok(true)
    }

    pub(crate) fn close(&self) -> Result<bool> {
        if !self.state.borrow_mut().close() {
            return Ok(false);
        }
        self.nav_frame.borrow_mut().take();
        let surface = self.surface.borrow().clone();
        if let Some(surface) = surface {
            renderer::clear_media(&surface)?;
            renderer::hide_notice(&surface);
            renderer::clear_transform(&surface)?;
            surface.hide()?;
        }
        Ok(true)
    }

    pub(crate) fn navigate(self: &Rc<Self>, delta: isize) -> Result<bool> {
        if !self.is_open() {
            return Ok(false);
        }
        let surface = self.ensure_surface()?;
        let Some(ticket) = self.state.borrow_mut().navigate(delta) else {
            return Ok(false);
        };
        self.render(&surface, ticket)?;
        Ok(true)
    }

    fn render(self: &Rc<Self>, surface: &ViewerSurface, ticket: RenderTicket) -> Result<()> {
        let (item, nav, neighbors) = {
            let state = self.state.borrow();
            let Some(item) = state.current().cloned() else {
                return Ok(());
            };
            let neighbors: Vec<String> = state
                .preload_targets()
                .into_iter()
                .map(String::from)
                .collect();
            (item, state.nav_state(), neighbors)
        };
        renderer::show_item(surface, &item, &self.config)?;
        self.sync_transform(surface)?;
        renderer::update_nav(surface, nav)?;
        renderer::preload(&neighbors);
        self.schedule_nav_placement();
        if item.is_image() {
            self.watch_decode(surface.image.clone(), ticket);
        }
        Ok(())
    }

    fn sync_transform(&self, surface: &ViewerSurface) -> Result<()> {
        let state = self.state.borrow();
        renderer::apply_transform(
            surface,
            state.transform(),
            state.cursor(),
            state.is_dragging(),
        )
    }

    fn watch_decode(self: &Rc<Self>, image: HtmlImageElement, ticket: RenderTicket) {
        let lightbox = Rc::clone(self);
        spawn_local(async move {
            let decoded = JsFuture::from(image.decode()).await.is_ok();
            lightbox.finish_decode(&image, ticket, decoded);
        });
    }

    fn finish_decode(self: &Rc<Self>, image: &HtmlImageElement, ticket: RenderTicket, decoded: bool) {
        if !self.state.borrow().is_current(ticket) {
            return;
        }
        if decoded || image.natural_width() > 0 {
            self.state
                .borrow_mut()
                .set_natural_size(ticket, image.natural_width(), image.natural_height());
            self.schedule_nav_placement();
            return;
        }
        let src = self
            .state
            .borrow()
            .current()
            .map(|item| item.src.clone())
            .unwrap_or_default();
        gloo::console::warn!(format!("lightbox: could not load {src}"));
        if let Some(surface) = self.open_surface() {
            renderer::show_failure(&surface, &self.config.labels.load_failed, &src);
        }
    }

    /// Replaces any pending placement frame with one for the current layout.
    fn schedule_nav_placement(self: &Rc<Self>) {
        self.nav_frame.borrow_mut().take();
        let lightbox = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            lightbox.nav_frame.borrow_mut().take();
            lightbox.place_nav();
        });
        *self.nav_frame.borrow_mut() = Some(handle);
    }

    fn place_nav(&self) {
        let Some(surface) = self.open_surface() else {
            return;
        };
        if !self.state.borrow().nav_state().visible {
            return;
        }
        if let Err(err) = renderer::place_nav(&surface, &self.config) {
            gloo::console::warn!(format!("lightbox: nav placement failed: {err}"));
        }
    }

    fn image_anchor(surface: &ViewerSurface, x: f64, y: f64) -> Option<AnchorOffset> {
        let rect = dom::client_rect(surface.image.as_ref());
        AnchorOffset::from_box(x, y, rect.left, rect.top, rect.width, rect.height)
    }

    /// One wheel step anchored at the pointer.
    pub(crate) fn wheel_at(&self, delta_y: f64, x: f64, y: f64) -> Result<bool> {
        let Some(surface) = self.image_surface() else {
            return Ok(false);
        };
        let anchor = Self::image_anchor(&surface, x, y);
        let changed = self.state.borrow_mut().wheel_zoom(delta_y, anchor);
        if changed {
            self.sync_transform(&surface)?;
        }
        Ok(changed)
    }

    pub(crate) fn toggle_zoom_at(&self, x: f64, y: f64) -> Result<bool> {
        let Some(surface) = self.image_surface() else {
            return Ok(false);
        };
        let anchor = Self::image_anchor(&surface, x, y);
        let changed = self.state.borrow_mut().toggle_zoom(anchor);
        if changed {
            self.sync_transform(&surface)?;
        }
        Ok(changed)
    }

    /// Starts a pan; the caller captures the pointer when this returns `true`.
    pub(crate) fn begin_drag(&self, x: f64, y: f64) -> Result<bool> {
        let Some(surface) = self.image_surface() else {
            return Ok(false);
        };
        if !self.state.borrow_mut().begin_drag(x, y) {
            return Ok(false);
        }
        self.sync_transform(&surface)?;
        Ok(true)
    }

    pub(crate) fn drag_to(&self, x: f64, y: f64) -> Result<()> {
        let Some(surface) = self.open_surface() else {
            return Ok(());
        };
        if self.state.borrow_mut().drag_to(x, y) {
            self.sync_transform(&surface)?;
        }
        Ok(())
    }

    pub(crate) fn end_drag(&self) -> Result<()> {
        if !self.state.borrow_mut().end_drag() {
            return Ok(());
        }
        if let Some(surface) = self.open_surface() {
            self.sync_transform(&surface)?;
        }
        Ok(())
    }

    pub(crate) fn image(&self) -> Option<HtmlImageElement> {
        self.open_surface().map(|surface| surface.image)
    }
}

/// Closes the shared viewer, logging instead of propagating DOM failures.
pub(crate) fn close_shared() {
    let lightbox = Lightbox::shared();
    error::report("close", lightbox.close().map(|_| ()));
}
