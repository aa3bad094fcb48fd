//! Attribute, id and class names shared by the page markup and the overlay.

pub const TRIGGER_SRC_ATTR: &str = "data-lightbox-src";
pub const TRIGGER_CAPTION_ATTR: &str = "data-lightbox-caption";
pub const TRIGGER_TYPE_ATTR: &str = "data-lightbox-type";
pub const TRIGGER_SELECTOR: &str = "[data-lightbox-src]";

pub const ROOT_ID: &str = "mizuki-lightbox";
pub const STYLE_ID: &str = "mizuki-lightbox-style";
pub const OPEN_CLASS: &str = "mizuki-lightbox-open";

pub const PREV_ATTR: &str = "data-lb-prev";
pub const NEXT_ATTR: &str = "data-lb-next";
pub const CLOSE_ATTR: &str = "data-lb-close";

pub const BACKDROP_CLASS: &str = "mizuki-lightbox__backdrop";
pub const PANEL_CLASS: &str = "mizuki-lightbox__panel";
pub const NAV_CLASS: &str = "mizuki-lightbox__nav";
pub const NAV_PREV_CLASS: &str = "mizuki-lightbox__nav--prev";
pub const NAV_NEXT_CLASS: &str = "mizuki-lightbox__nav--next";
pub const CLOSE_CLASS: &str = "mizuki-lightbox__close";
pub const IMAGE_CLASS: &str = "mizuki-lightbox__img";
pub const VIDEO_BOX_CLASS: &str = "mizuki-lightbox__video";
pub const VIDEO_PLAYER_CLASS: &str = "mizuki-lightbox__video-player";
pub const VIDEO_FRAME_CLASS: &str = "mizuki-lightbox__video-frame";
pub const NOTICE_CLASS: &str = "mizuki-lightbox__notice";
pub const CAPTION_CLASS: &str = "mizuki-lightbox__caption";

pub const PREV_LEFT_VAR: &str = "--mizuki-lb-prev-left";
pub const NEXT_RIGHT_VAR: &str = "--mizuki-lb-next-right";

/// Regions of the page an event target can fall inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    Overlay,
    PrevButton,
    NextButton,
    CloseControl,
    Image,
    VideoBox,
    Trigger,
}

impl Part {
    pub fn selector(self) -> &'static str {
        match self {
            Part::Overlay => "#mizuki-lightbox",
            Part::PrevButton => "[data-lb-prev]",
            Part::NextButton => "[data-lb-next]",
            Part::CloseControl => "[data-lb-close]",
            Part::Image => "#mizuki-lightbox .mizuki-lightbox__img",
            Part::VideoBox => "#mizuki-lightbox .mizuki-lightbox__video",
            Part::Trigger => TRIGGER_SELECTOR,
        }
    }
}
