use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, Node};

use mizuki_lightbox_core::markup::{
    TRIGGER_CAPTION_ATTR, TRIGGER_SELECTOR, TRIGGER_SRC_ATTR, TRIGGER_TYPE_ATTR,
};
use mizuki_lightbox_core::{Candidate, LightboxConfig, TriggerAttrs};

use crate::dom;

pub(crate) fn read_attrs(trigger: &Element) -> TriggerAttrs {
    TriggerAttrs {
        src: trigger.get_attribute(TRIGGER_SRC_ATTR),
        caption: trigger.get_attribute(TRIGGER_CAPTION_ATTR),
        media_type: trigger.get_attribute(TRIGGER_TYPE_ATTR),
        alt: thumbnail_alt(trigger),
    }
}

fn thumbnail_alt(trigger: &Element) -> Option<String> {
    if let Some(image) = trigger.dyn_ref::<HtmlImageElement>() {
        return Some(image.alt());
    }
    trigger
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|node| node.dyn_into::<HtmlImageElement>().ok())
        .map(|image| image.alt())
}

/// Every trigger sharing the clicked trigger's gallery container, in
/// document order.
pub(crate) fn collect_candidates(trigger: &Element, config: &LightboxConfig) -> Vec<Candidate> {
    let container = config
        .container_selector()
        .and_then(|selector| dom::closest(trigger, &selector))
        .or_else(|| trigger.parent_element());
    let Some(nodes) =
        container.and_then(|container| container.query_selector_all(TRIGGER_SELECTOR).ok())
    else {
        return vec![Candidate::new(read_attrs(trigger), true)];
    };
    let origin: &Node = trigger.as_ref();
    (0..nodes.length())
        .filter_map(|idx| nodes.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|element| {
            let is_origin = element.is_same_node(Some(origin));
            Candidate::new(read_attrs(&element), is_origin)
        })
        .collect()
}
