//! Writes viewer state into the overlay DOM.

use wasm_bindgen::JsCast;
use web_sys::{
    HtmlButtonElement, HtmlIFrameElement, HtmlImageElement, HtmlMediaElement, HtmlSourceElement,
    HtmlVideoElement,
};

use mizuki_lightbox_core::markup::{
    NEXT_RIGHT_VAR, PREV_LEFT_VAR, VIDEO_FRAME_CLASS, VIDEO_PLAYER_CLASS,
};
use mizuki_lightbox_core::{
    Cursor, GalleryItem, LightboxConfig, MediaType, NavPlacement, NavState, Transform, VideoSource,
};

use crate::dom;
use crate::error::Result;
use crate::surface::ViewerSurface;

const IFRAME_ALLOW: &str = "autoplay; fullscreen; picture-in-picture";

pub(crate) fn show_item(
    surface: &ViewerSurface,
    item: &GalleryItem,
    config: &LightboxConfig,
) -> Result<()> {
    clear_media(surface)?;
    hide_notice(surface);
    surface.caption.set_text_content(Some(&item.caption));
    surface.caption.set_hidden(item.caption.is_empty());

    match item.media_type {
        MediaType::Image => {
            surface.image.set_alt(&item.alt);
            surface.image.set_hidden(false);
            surface.image.set_src(&item.src);
        }
        MediaType::Video => {
            surface.image.set_hidden(true);
            let document = dom::document()?;
            match VideoSource::for_src(&item.src) {
                VideoSource::Native { mime } => {
                    let video: HtmlVideoElement =
                        dom::create(&document, "video", VIDEO_PLAYER_CLASS)?;
                    video.set_controls(true);
                    video.set_preload("metadata");
                    video.set_attribute("playsinline", "")?;
                    let source: HtmlSourceElement = dom::create(&document, "source", "")?;
                    source.set_src(&item.src);
                    source.set_type(mime);
                    video.append_child(&source)?;
                    surface.video_box.append_child(&video)?;
                }
                VideoSource::Embed => {
                    let frame: HtmlIFrameElement =
                        dom::create(&document, "iframe", VIDEO_FRAME_CLASS)?;
                    frame.set_attribute("allow", IFRAME_ALLOW)?;
                    frame.set_allow_fullscreen(true);
                    frame.set_attribute("referrerpolicy", &config.referrer_policy)?;
                    if !item.caption.is_empty() {
                        frame.set_attribute("title", &item.caption)?;
                    }
                    frame.set_src(&item.src);
                    surface.video_box.append_child(&frame)?;
                }
            }
            surface.video_box.set_hidden(false);
        }
    }
    Ok(())
}

/// Stops and drops any player, and detaches the image from its source.
pub(crate) fn clear_media(surface: &ViewerSurface) -> Result<()> {
    let players = surface.video_box.query_selector_all("video")?;
    for idx in 0..players.length() {
        if let Some(media) = players
            .item(idx)
            .and_then(|node| node.dyn_into::<HtmlMediaElement>().ok())
        {
            let _ = media.pause();
        }
    }
    surface.video_box.set_inner_html("");
    surface.video_box.set_hidden(true);

    surface.image.remove_attribute("src")?;
    surface.image.remove_attribute("srcset")?;
    Ok(())
}

pub(crate) fn apply_transform(
    surface: &ViewerSurface,
    transform: Transform,
    cursor: Cursor,
    dragging: bool,
) -> Result<()> {
    let style = surface.image.style();
    style.set_property("transform", &transform.css())?;
    style.set_property("cursor", cursor.as_css())?;
    if dragging {
        style.set_property("transition", "none")?;
    } else {
        style.remove_property("transition")?;
    }
    Ok(())
}

/// Drops the inline transform, cursor and transition set while viewing.
pub(crate) fn clear_transform(surface: &ViewerSurface) -> Result<()> {
    let style = surface.image.style();
    for property in ["transform", "cursor", "transition"] {
        style.remove_property(property)?;
    }
    Ok(())
}

pub(crate) fn update_nav(surface: &ViewerSurface, nav: NavState) -> Result<()> {
    set_nav_button(&surface.prev, nav.visible, nav.can_prev)?;
    set_nav_button(&surface.next, nav.visible, nav.can_next)
}

fn set_nav_button(button: &HtmlButtonElement, visible: bool, enabled: bool) -> Result<()> {
    let style = button.style();
    if visible {
        style.remove_property("display")?;
    } else {
        style.set_property("display", "none")?;
    }
    button.set_disabled(!enabled);
    button.set_attribute("aria-disabled", if enabled { "false" } else { "true" })?;
    Ok(())
}

/// Pins the nav buttons beside whichever media element is showing. Returns
/// `false` while that element has no layout box.
pub(crate) fn place_nav(surface: &ViewerSurface, config: &LightboxConfig) -> Result<bool> {
    let media = if surface.video_box.hidden() {
        dom::client_rect(surface.image.as_ref())
    } else {
        dom::client_rect(surface.video_box.as_ref())
    };
    let Some(placement) =
        NavPlacement::around(media, dom::viewport_width(), config.nav_gap, config.nav_edge)
    else {
        return Ok(false);
    };
    let style = surface.root.style();
    style.set_property(PREV_LEFT_VAR, &format!("{}px", placement.prev_left))?;
    style.set_property(NEXT_RIGHT_VAR, &format!("{}px", placement.next_right))?;
    Ok(true)
}

/// Warms the browser cache for neighboring images.
pub(crate) fn preload(sources: &[String]) {
    for src in sources {
        match HtmlImageElement::new() {
            Ok(image) => {
                let _ = image.set_attribute("decoding", "async");
                image.set_src(src);
            }
            Err(err) => {
                gloo::console::warn!(format!(
                    "lightbox: preload {src} failed: {}",
                    crate::error::js_err(err)
                ));
                return;
            }
        }
    }
}

pub(crate) fn show_failure(surface: &ViewerSurface, label: &str, src: &str) {
    surface.image.set_hidden(true);
    surface
        .notice
        .set_text_content(Some(&format!("{label}: {src}")));
    surface.notice.set_hidden(false);
}

pub(crate) fn hide_notice(surface: &ViewerSurface) {
    surface.notice.set_text_content(None);
    surface.notice.set_hidden(true);
}
