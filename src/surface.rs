//! The single overlay element tree backing the viewer.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, Node};

use mizuki_lightbox_core::markup::*;
use mizuki_lightbox_core::LightboxConfig;

use crate::dom;
use crate::error::{LightboxError, Result};

const STYLE: &str = r#"
#mizuki-lightbox { position: fixed; inset: 0; z-index: 1000; display: flex; align-items: center; justify-content: center; }
#mizuki-lightbox[aria-hidden="true"] { display: none; }
#mizuki-lightbox .mizuki-lightbox__backdrop { position: absolute; inset: 0; background: rgba(0, 0, 0, 0.85); }
#mizuki-lightbox .mizuki-lightbox__panel { position: relative; margin: 0; max-width: 92vw; max-height: 92vh; display: flex; flex-direction: column; align-items: center; }
#mizuki-lightbox .mizuki-lightbox__img { max-width: 92vw; max-height: 85vh; object-fit: contain; user-select: none; touch-action: none; transform-origin: center center; will-change: transform; transition: transform 120ms ease-out; }
#mizuki-lightbox .mizuki-lightbox__video-player, #mizuki-lightbox .mizuki-lightbox__video-frame { width: min(92vw, 1280px); aspect-ratio: 16 / 9; max-height: 85vh; border: 0; background: #000; }
#mizuki-lightbox .mizuki-lightbox__caption { color: rgba(255, 255, 255, 0.85); padding: 8px 12px; text-align: center; }
#mizuki-lightbox .mizuki-lightbox__notice { color: rgba(255, 255, 255, 0.8); font-size: 14px; padding: 12px 16px; border-radius: 12px; background: rgba(0, 0, 0, 0.4); border: 1px solid rgba(255, 255, 255, 0.1); }
#mizuki-lightbox .mizuki-lightbox__close { position: fixed; top: 16px; right: 16px; z-index: 1001; width: 40px; height: 40px; border-radius: 50%; border: 0; background: rgba(0, 0, 0, 0.6); color: white; font-size: 24px; cursor: pointer; }
#mizuki-lightbox .mizuki-lightbox__nav { position: fixed; top: 50%; transform: translateY(-50%); z-index: 1001; margin: 0; background: rgba(0, 0, 0, 0.4); border: 1px solid rgba(255, 255, 255, 0.2); color: white; width: 48px; height: 48px; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-size: 24px; cursor: pointer; transition: background 0.2s, opacity 0.2s; }
#mizuki-lightbox .mizuki-lightbox__nav:hover { background: rgba(0, 0, 0, 0.7); }
#mizuki-lightbox .mizuki-lightbox__nav:disabled { opacity: 0.2; cursor: not-allowed; }
#mizuki-lightbox .mizuki-lightbox__nav--prev { left: var(--mizuki-lb-prev-left, 20px); }
#mizuki-lightbox .mizuki-lightbox__nav--next { right: var(--mizuki-lb-next-right, 20px); }
@media (max-width: 768px) {
  #mizuki-lightbox .mizuki-lightbox__nav { width: 40px; height: 40px; font-size: 20px; }
}
html.mizuki-lightbox-open { overflow: hidden; }
"#;

#[derive(Clone)]
pub(crate) struct ViewerSurface {
    pub(crate) root: HtmlElement,
    pub(crate) image: HtmlImageElement,
    pub(crate) video_box: HtmlElement,
    pub(crate) notice: HtmlElement,
    pub(crate) caption: HtmlElement,
    pub(crate) prev: HtmlButtonElement,
    pub(crate) next: HtmlButtonElement,
    pub(crate) close: HtmlButtonElement,
}

impl ViewerSurface {
    /// Finds the overlay in the document or builds it; the flag is `true` when
    /// a new tree was created.
    pub(crate) fn ensure(config: &LightboxConfig) -> Result<(Self, bool)> {
        let document = dom::document()?;
        inject_style(&document)?;
        if let Some(existing) = document.get_element_by_id(ROOT_ID) {
            match Self::locate(&existing) {
                Ok(surface) => return Ok((surface, false)),
                Err(err) => {
                    gloo::console::warn!(format!("lightbox: rebuilding overlay: {err}"));
                    existing.remove();
                }
            }
        }
        let root = build(&document, config)?;
        let body = document.body().ok_or(LightboxError::MissingRoot("body"))?;
        body.append_child(&root)?;
        gloo::console::log!("lightbox: overlay created");
        Ok((Self::locate(&root)?, true))
    }

    fn locate(root: &Element) -> Result<Self> {
        dom::query::<HtmlElement>(root, &format!(".{PANEL_CLASS}"), "panel")?;
        Ok(Self {
            root: root
                .clone()
                .dyn_into::<HtmlElement>()
                .map_err(|_| LightboxError::MissingPart("root"))?,
            image: dom::query(root, &format!(".{IMAGE_CLASS}"), "image")?,
            video_box: dom::query(root, &format!(".{VIDEO_BOX_CLASS}"), "video box")?,
            notice: dom::query(root, &format!(".{NOTICE_CLASS}"), "notice")?,
            caption: dom::query(root, &format!(".{CAPTION_CLASS}"), "caption")?,
            prev: dom::query(root, &format!("[{PREV_ATTR}]"), "prev button")?,
            next: dom::query(root, &format!("[{NEXT_ATTR}]"), "next button")?,
            close: dom::query(root, &format!(".{CLOSE_CLASS}"), "close button")?,
        })
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.root.is_connected()
    }

    pub(crate) fn show(&self) -> Result<()> {
        self.root.set_attribute("aria-hidden", "false")?;
        set_open_class(true)
    }

    pub(crate) fn hide(&self) -> Result<()> {
        self.root.set_attribute("aria-hidden", "true")?;
        set_open_class(false)
    }
}

fn set_open_class(open: bool) -> Result<()> {
    let html = dom::document()?
        .document_element()
        .ok_or(LightboxError::MissingRoot("html"))?;
    if open {
        html.class_list().add_1(OPEN_CLASS)?;
    } else {
        html.class_list().remove_1(OPEN_CLASS)?;
    }
    Ok(())
}

fn inject_style(document: &Document) -> Result<()> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style: Element = dom::create(document, "style", "")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(STYLE));
    head.append_child(&style)?;
    Ok(())
}

fn build(document: &Document, config: &LightboxConfig) -> Result<HtmlElement> {
    let labels = &config.labels;
    let root: HtmlElement = dom::create(document, "div", "")?;
    root.set_id(ROOT_ID);
    root.set_attribute("aria-hidden", "true")?;

    let backdrop: HtmlElement = dom::create(document, "div", BACKDROP_CLASS)?;
    backdrop.set_attribute(CLOSE_ATTR, "")?;

    let panel: HtmlElement = dom::create(document, "figure", PANEL_CLASS)?;
    panel.set_attribute("role", "dialog")?;
    panel.set_attribute("aria-modal", "true")?;
    panel.set_attribute(CLOSE_ATTR, "")?;

    let prev = nav_button(document, NAV_PREV_CLASS, PREV_ATTR, &labels.prev, "\u{2039}")?;
    let next = nav_button(document, NAV_NEXT_CLASS, NEXT_ATTR, &labels.next, "\u{203a}")?;

    let close: HtmlButtonElement = dom::create(document, "button", CLOSE_CLASS)?;
    close.set_type("button");
    close.set_attribute("aria-label", &labels.close)?;
    close.set_attribute(CLOSE_ATTR, "")?;
    close.set_text_content(Some("\u{00d7}"));

    let image: HtmlImageElement = dom::create(document, "img", IMAGE_CLASS)?;
    image.set_alt("");
    image.set_draggable(false);

    let video_box: HtmlElement = dom::create(document, "div", VIDEO_BOX_CLASS)?;
    video_box.set_hidden(true);

    let notice: HtmlElement = dom::create(document, "div", NOTICE_CLASS)?;
    notice.set_hidden(true);

    let caption: HtmlElement = dom::create(document, "div", CAPTION_CLASS)?;
    caption.set_attribute("aria-live", "polite")?;

    let children: [&Node; 7] = [
        prev.as_ref(),
        next.as_ref(),
        close.as_ref(),
        image.as_ref(),
        video_box.as_ref(),
        notice.as_ref(),
        caption.as_ref(),
    ];
    for child in children {
        panel.append_child(child)?;
    }
    root.append_child(&backdrop)?;
    root.append_child(&panel)?;
    Ok(root)
}

fn nav_button(
    document: &Document,
    modifier: &str,
    marker: &str,
    label: &str,
    glyph: &str,
) -> Result<HtmlButtonElement> {
    let button: HtmlButtonElement =
        dom::create(document, "button", &format!("{NAV_CLASS} {modifier}"))?;
    button.set_type("button");
    button.set_attribute("aria-label", label)?;
    button.set_attribute(marker, "")?;
    button.set_text_content(Some(glyph));
    Ok(button)
}
