#![cfg(target_arch = "wasm32")]

use gloo::timers::future::TimeoutFuture;
use js_sys::Date;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, HtmlElement, KeyboardEvent, KeyboardEventInit, WheelEvent,
    WheelEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("document")
}

fn setup() {
    console_error_panic_hook::set_once();
    mizuki_lightbox::start();
}

fn overlay() -> Element {
    document()
        .get_element_by_id("mizuki-lightbox")
        .expect("overlay mounted")
}

fn part<T: JsCast>(selector: &str) -> T {
    overlay()
        .query_selector(selector)
        .expect("valid selector")
        .unwrap_or_else(|| panic!("overlay has no {selector}"))
        .dyn_into::<T>()
        .unwrap_or_else(|_| panic!("{selector} has an unexpected type"))
}

fn is_open() -> bool {
    overlay().get_attribute("aria-hidden").as_deref() == Some("false")
}

fn page_locked() -> bool {
    document()
        .document_element()
        .expect("html")
        .class_list()
        .contains("mizuki-lightbox-open")
}

fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("event");
    document().dispatch_event(&event).expect("dispatch");
}

/// Triggers appended to the page; removed (and the viewer closed) on drop.
struct Fixture {
    container: Element,
}

impl Fixture {
    fn new(sources: &[&str]) -> Self {
        let doc = document();
        let container = doc.create_element("div").expect("div");
        container.set_class_name("markdown-content");
        for (idx, src) in sources.iter().enumerate() {
            let link = doc.create_element("a").expect("a");
            link.set_attribute("data-lightbox-src", src).expect("attr");
            link.set_attribute("data-lightbox-caption", &format!("caption {idx}"))
                .expect("attr");
            let thumb = doc.create_element("img").expect("img");
            thumb.set_attribute("alt", &format!("thumb {idx}")).expect("attr");
            link.append_child(&thumb).expect("append");
            container.append_child(&link).expect("append");
        }
        doc.body().expect("body").append_child(&container).expect("append");
        Self { container }
    }

    fn trigger(&self, idx: u32) -> HtmlElement {
        self.container
            .query_selector_all("[data-lightbox-src]")
            .expect("triggers")
            .item(idx)
            .expect("trigger exists")
            .dyn_into::<HtmlElement>()
            .expect("html trigger")
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        mizuki_lightbox::close();
        self.container.remove();
    }
}

#[wasm_bindgen_test]
fn overlay_is_mounted_once() {
    setup();
    mizuki_lightbox::reinit();
    mizuki_lightbox::reinit();
    let doc = document();
    assert_eq!(doc.query_selector_all("#mizuki-lightbox").expect("query").length(), 1);
    assert_eq!(
        doc.query_selector_all("#mizuki-lightbox-style").expect("query").length(),
        1
    );
    assert!(!is_open());
}

#[wasm_bindgen_test]
fn click_opens_the_group_at_the_trigger() {
    setup();
    let fixture = Fixture::new(&["url('/a.png')", "/b.png", "/c.png"]);
    fixture.trigger(1).click();

    assert!(is_open());
    assert!(page_locked());
    let image: web_sys::HtmlImageElement = part(".mizuki-lightbox__img");
    assert!(image.src().ends_with("/b.png"), "src was {}", image.src());
    assert_eq!(image.alt(), "thumb 1");
    let caption: HtmlElement = part(".mizuki-lightbox__caption");
    assert_eq!(caption.text_content().as_deref(), Some("caption 1"));
    let prev: web_sys::HtmlButtonElement = part("[data-lb-prev]");
    let next: web_sys::HtmlButtonElement = part("[data-lb-next]");
    assert!(!prev.disabled());
    assert!(!next.disabled());
}

#[wasm_bindgen_test]
fn css_wrapped_source_is_unwrapped() {
    setup();
    let fixture = Fixture::new(&["url('/a.png')", "/b.png"]);
    fixture.trigger(0).click();
    let image: web_sys::HtmlImageElement = part(".mizuki-lightbox__img");
    assert!(image.src().ends_with("/a.png"), "src was {}", image.src());
    assert!(!image.src().contains("url("));
}

#[wasm_bindgen_test]
fn arrow_keys_walk_and_escape_closes() {
    setup();
    let fixture = Fixture::new(&["/a.png", "/b.png"]);
    fixture.trigger(0).click();

    let prev: web_sys::HtmlButtonElement = part("[data-lb-prev]");
    assert!(prev.disabled());
    assert_eq!(prev.get_attribute("aria-disabled").as_deref(), Some("true"));

    press("ArrowRight");
    let image: web_sys::HtmlImageElement = part(".mizuki-lightbox__img");
    assert!(image.src().ends_with("/b.png"), "src was {}", image.src());
    press("ArrowRight");
    assert!(image.src().ends_with("/b.png"));
    let next: web_sys::HtmlButtonElement = part("[data-lb-next]");
    assert!(next.disabled());

    press("Escape");
    assert!(!is_open());
    assert!(!page_locked());
    assert!(image.get_attribute("src").is_none());
    assert_eq!(image.style().get_property_value("transform").expect("style"), "");
    assert_eq!(image.style().get_property_value("cursor").expect("style"), "");
}

#[wasm_bindgen_test]
fn single_item_hides_navigation() {
    setup();
    let fixture = Fixture::new(&["/only.png"]);
    fixture.trigger(0).click();
    let prev: HtmlElement = part("[data-lb-prev]");
    let next: HtmlElement = part("[data-lb-next]");
    assert_eq!(prev.style().get_property_value("display").expect("style"), "none");
    assert_eq!(next.style().get_property_value("display").expect("style"), "none");
}

#[wasm_bindgen_test]
fn backdrop_closes_but_image_does_not() {
    setup();
    let fixture = Fixture::new(&["/a.png", "/b.png"]);
    fixture.trigger(0).click();

    part::<HtmlElement>(".mizuki-lightbox__img").click();
    assert!(is_open());

    part::<HtmlElement>(".mizuki-lightbox__backdrop").click();
    assert!(!is_open());
}

#[wasm_bindgen_test]
fn next_button_steps_forward() {
    setup();
    let fixture = Fixture::new(&["/a.png", "/b.png"]);
    fixture.trigger(0).click();
    part::<HtmlElement>("[data-lb-next]").click();
    assert!(is_open());
    let image: web_sys::HtmlImageElement = part(".mizuki-lightbox__img");
    assert!(image.src().ends_with("/b.png"), "src was {}", image.src());
}

#[wasm_bindgen_test]
fn empty_source_does_not_open() {
    setup();
    let fixture = Fixture::new(&["url('')"]);
    fixture.trigger(0).click();
    assert!(!is_open());
}

#[wasm_bindgen_test]
fn direct_video_gets_a_native_player() {
    setup();
    let fixture = Fixture::new(&["/clips/intro.mp4"]);
    fixture.trigger(0).click();

    let video_box: HtmlElement = part(".mizuki-lightbox__video");
    assert!(!video_box.hidden());
    let image: HtmlElement = part(".mizuki-lightbox__img");
    assert!(image.hidden());
    let source: Element = part(".mizuki-lightbox__video video source");
    assert_eq!(source.get_attribute("type").as_deref(), Some("video/mp4"));

    part::<HtmlElement>(".mizuki-lightbox__video-player").click();
    assert!(is_open());
}

#[wasm_bindgen_test]
fn embed_video_gets_an_iframe() {
    setup();
    let fixture = Fixture::new(&["https://player.example/embed/1"]);
    fixture
        .trigger(0)
        .set_attribute("data-lightbox-type", "video")
        .expect("attr");
    fixture.trigger(0).click();

    let frame: Element = part(".mizuki-lightbox__video iframe");
    assert_eq!(frame.get_attribute("src").as_deref(), Some("https://player.example/embed/1"));
    assert_eq!(
        frame.get_attribute("allow").as_deref(),
        Some("autoplay; fullscreen; picture-in-picture")
    );
    assert_eq!(
        frame.get_attribute("referrerpolicy").as_deref(),
        Some("strict-origin-when-cross-origin")
    );

    mizuki_lightbox::close();
    let video_box: HtmlElement = part(".mizuki-lightbox__video");
    assert!(video_box.hidden());
    assert_eq!(video_box.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn overlay_returns_after_page_swap() {
    setup();
    mizuki_lightbox::reinit();
    overlay().remove();
    assert!(document().get_element_by_id("mizuki-lightbox").is_none());

    let event = Event::new("swup:contentReplaced").expect("event");
    document().dispatch_event(&event).expect("dispatch");
    assert!(document().get_element_by_id("mizuki-lightbox").is_some());
    assert!(!is_open());
}

#[wasm_bindgen_test]
fn repeated_start_binds_listeners_once() {
    setup();
    mizuki_lightbox::start();
    let fixture = Fixture::new(&["/a.png", "/b.png", "/c.png"]);
    fixture.trigger(0).click();

    press("ArrowRight");
    let image: web_sys::HtmlImageElement = part(".mizuki-lightbox__img");
    assert!(image.src().ends_with("/b.png"), "src was {}", image.src());
    let prev: web_sys::HtmlButtonElement = part("[data-lb-prev]");
    let next: web_sys::HtmlButtonElement = part("[data-lb-next]");
    assert!(!prev.disabled());
    assert!(!next.disabled());
}

#[wasm_bindgen_test(async)]
async fn broken_image_shows_notice_and_ignores_wheel() {
    setup();
    let missing = "/__mizuki_missing__/nothing-here.png";
    let fixture = Fixture::new(&[missing]);
    fixture.trigger(0).click();
    assert!(is_open());

    let notice: HtmlElement = part(".mizuki-lightbox__notice");
    let start = Date::now();
    while notice.hidden() {
        if Date::now() - start > 5000.0 {
            panic!("load failure notice not shown after 5s");
        }
        TimeoutFuture::new(10).await;
    }
    let image: HtmlElement = part(".mizuki-lightbox__img");
    assert!(image.hidden());
    let text = notice.text_content().unwrap_or_default();
    assert!(text.starts_with("Failed to load image"), "notice was {text}");
    assert!(text.contains(missing), "notice was {text}");

    let before = image.style().get_property_value("transform").expect("style");
    let init = WheelEventInit::new();
    init.set_delta_y(-120.0);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let wheel = WheelEvent::new_with_event_init_dict("wheel", &init).expect("event");
    overlay().dispatch_event(&wheel).expect("dispatch");
    assert!(!wheel.default_prevented());
    assert_eq!(image.style().get_property_value("transform").expect("style"), before);
}
