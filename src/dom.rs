use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use mizuki_lightbox_core::{Part, Rect, ClickTarget};

use crate::error::{LightboxError, Result};

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or(LightboxError::NoWindow)
}

pub(crate) fn document() -> Result<Document> {
    window()?.document().ok_or(LightboxError::NoDocument)
}

pub(crate) fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element
        .dyn_into::<T>()
        .map_err(|_| LightboxError::Dom(format!("<{tag}> has an unexpected type")))
}

pub(crate) fn query<T: JsCast>(root: &Element, selector: &str, name: &'static str) -> Result<T> {
    root.query_selector(selector)?
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or(LightboxError::MissingPart(name))
}

pub(crate) fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

pub(crate) fn event_target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn client_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(crate) fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

/// Focus is an enhancement; failures are ignored.
pub(crate) fn try_focus(element: &HtmlElement) {
    let _ = element.focus();
}

/// Pointer capture is an enhancement; failures are ignored.
pub(crate) fn try_capture_pointer(element: &Element, pointer_id: i32) {
    let _ = element.set_pointer_capture(pointer_id);
}

/// [`ClickTarget`] over an event target's ancestor chain.
pub(crate) struct DomTarget<'a> {
    target: &'a Element,
}

impl<'a> DomTarget<'a> {
    pub(crate) fn new(target: &'a Element) -> Self {
        Self { target }
    }
}

impl ClickTarget for DomTarget<'_> {
    fn within(&self, part: Part) -> bool {
        closest(self.target, part.selector()).is_some()
    }
}
