//! Delegated document listeners. Bound once per page; triggers added later by
//! client-side navigation are handled without rebinding.

use std::cell::{Cell, RefCell};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlAnchorElement, KeyboardEvent, MouseEvent, PointerEvent, WheelEvent};

use mizuki_lightbox_core::markup::TRIGGER_SELECTOR;
use mizuki_lightbox_core::{route_click, route_key, ClickRoute, KeyRoute, Part, ClickTarget};

use crate::dom::{self, DomTarget};
use crate::error::{self, Result};
use crate::lightbox::Lightbox;

pub(crate) const BOUND_FLAG: &str = "__mizukiLightboxBound__";
pub(crate) const PAGE_SWAP_EVENT: &str = "swup:contentReplaced";

thread_local! {
    static BOUND: Cell<bool> = Cell::new(false);
    static LISTENERS: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

fn options(phase: EventListenerPhase, passive: bool) -> EventListenerOptions {
    EventListenerOptions { phase, passive }
}

fn active() -> EventListenerOptions {
    options(EventListenerPhase::Bubble, false)
}

/// Installs the listeners unless this page already has them. Returns `true`
/// when this call did the binding.
pub(crate) fn bind_once() -> Result<bool> {
    if BOUND.with(Cell::get) {
        return Ok(false);
    }
    let window = dom::window()?;
    let flag = JsValue::from_str(BOUND_FLAG);
    if Reflect::get(&window, &flag)?.is_truthy() {
        gloo::console::warn!("lightbox: listeners already bound by another instance");
        BOUND.with(|bound| bound.set(true));
        return Ok(false);
    }
    let document = dom::document()?;
    let listeners = install(window.as_ref(), document.as_ref());
    Reflect::set(&window, &flag, &JsValue::TRUE)?;
    LISTENERS.with(|slot| slot.borrow_mut().extend(listeners));
    BOUND.with(|bound| bound.set(true));
    Ok(true)
}

/// Runs `action` now, or once the document has parsed.
pub(crate) fn when_ready(action: impl FnOnce() + 'static) -> Result<()> {
    let document = dom::document()?;
    if document.ready_state() != "loading" {
        action();
        return Ok(());
    }
    let listener = EventListener::once(&document, "DOMContentLoaded", move |_| action());
    LISTENERS.with(|slot| slot.borrow_mut().push(listener));
    Ok(())
}

fn install(window: &EventTarget, document: &EventTarget) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    listeners.push(EventListener::new_with_options(
        document,
        "click",
        options(EventListenerPhase::Capture, false),
        move |event: &Event| {
            let Some(target) = dom::event_target_element(event) else {
                return;
            };
            let route = route_click(&DomTarget::new(&target));
            let lightbox = Lightbox::shared();
            if route.requires_open() && !lightbox.is_open() {
                return;
            }
            match route {
                ClickRoute::Prev | ClickRoute::Next => {
                    event.prevent_default();
                    let delta = if route == ClickRoute::Prev { -1 } else { 1 };
                    error::report("navigate", lightbox.navigate(delta).map(drop));
                }
                ClickRoute::Close => {
                    event.prevent_default();
                    error::report("close", lightbox.close().map(drop));
                }
                ClickRoute::Open => {
                    let Some(trigger) = dom::closest(&target, TRIGGER_SELECTOR) else {
                        return;
                    };
                    if trigger.is_instance_of::<HtmlAnchorElement>() {
                        event.prevent_default();
                    }
                    error::report("open", lightbox.open_trigger(&trigger).map(drop));
                }
                ClickRoute::Swallow | ClickRoute::Ignore => {}
            }
        },
    ));

    listeners.push(EventListener::new_with_options(
        document,
        "wheel",
        active(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let lightbox = Lightbox::shared();
            if !lightbox.is_open() || !lightbox.showing_image() {
                return;
            }
            let Some(target) = dom::event_target_element(event) else {
                return;
            };
            if !DomTarget::new(&target).within(Part::Overlay) {
                return;
            }
            event.prevent_default();
            let x = f64::from(event.client_x());
            let y = f64::from(event.client_y());
            error::report("wheel zoom", lightbox.wheel_at(event.delta_y(), x, y).map(drop));
        },
    ));

    listeners.push(EventListener::new_with_options(
        document,
        "dblclick",
        active(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let lightbox = Lightbox::shared();
            if !lightbox.is_open() {
                return;
            }
            let Some(target) = dom::event_target_element(event) else {
                return;
            };
            if !DomTarget::new(&target).within(Part::Image) {
                return;
            }
            event.prevent_default();
            let x = f64::from(event.client_x());
            let y = f64::from(event.client_y());
            error::report("double-click zoom", lightbox.toggle_zoom_at(x, y).map(drop));
        },
    ));

    listeners.push(EventListener::new_with_options(
        document,
        "pointerdown",
        active(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let lightbox = Lightbox::shared();
            if !lightbox.is_open() {
                return;
            }
            let Some(target) = dom::event_target_element(event) else {
                return;
            };
            if !DomTarget::new(&target).within(Part::Image) {
                return;
            }
            let x = f64::from(event.client_x());
            let y = f64::from(event.client_y());
            match lightbox.begin_drag(x, y) {
                Ok(true) => {
                    if let Some(image) = lightbox.image() {
                        dom::try_capture_pointer(image.as_ref(), event.pointer_id());
                    }
                }
                Ok(false) => {}
                Err(err) => gloo::console::warn!(format!("lightbox: drag failed: {err}")),
            }
        },
    ));

    listeners.push(EventListener::new_with_options(
        document,
        "pointermove",
        active(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let x = f64::from(event.client_x());
            let y = f64::from(event.client_y());
            error::report("drag", Lightbox::shared().drag_to(x, y));
        },
    ));

    for name in ["pointerup", "pointercancel"] {
        listeners.push(EventListener::new_with_options(
            document,
            name,
            active(),
            move |_event: &Event| {
                error::report("drag end", Lightbox::shared().end_drag());
            },
        ));
    }

    listeners.push(EventListener::new_with_options(
        document,
        "keydown",
        active(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let lightbox = Lightbox::shared();
            if !lightbox.is_open() {
                return;
            }
            match route_key(&event.key()) {
                Some(KeyRoute::Close) => {
                    error::report("close", lightbox.close().map(drop));
                }
                Some(KeyRoute::Step(delta)) => {
                    error::report("navigate", lightbox.navigate(delta).map(drop));
                }
                None => {}
            }
        },
    ));

    listeners.push(EventListener::new_with_options(
        window,
        "resize",
        options(EventListenerPhase::Bubble, true),
        move |_event: &Event| {
            Lightbox::shared().handle_resize();
        },
    ));

    listeners.push(EventListener::new(document, PAGE_SWAP_EVENT, move |_event: &Event| {
        error::report("reinit", Lightbox::shared().ensure_surface().map(drop));
    }));

    listeners
}
