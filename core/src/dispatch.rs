//! Gesture classification for the delegated document listeners.
//!
//! Click targets are classified by a fixed-priority table of predicates over
//! the regions a target falls inside, so precedence (prev/next before close,
//! the image never closing) does not depend on handler nesting.

use crate::markup::Part;

/// Answers whether an event target lies inside a region of the page.
pub trait ClickTarget {
    fn within(&self, part: Part) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickRoute {
    Prev,
    Next,
    /// Inside the player; consumed without action.
    Swallow,
    Close,
    Open,
    /// Not ours; the page handles it.
    Ignore,
}

impl ClickRoute {
    /// Routes that only make sense while the overlay is showing.
    pub fn requires_open(self) -> bool {
        matches!(self, ClickRoute::Prev | ClickRoute::Next | ClickRoute::Close)
    }
}

pub struct ClickRule {
    pub name: &'static str,
    pub matches: fn(&dyn ClickTarget) -> bool,
    pub route: ClickRoute,
}

pub const CLICK_RULES: &[ClickRule] = &[
    ClickRule {
        name: "prev-button",
        matches: |target| target.within(Part::PrevButton),
        route: ClickRoute::Prev,
    },
    ClickRule {
        name: "next-button",
        matches: |target| target.within(Part::NextButton),
        route: ClickRoute::Next,
    },
    ClickRule {
        name: "video-player",
        matches: |target| target.within(Part::CloseControl) && target.within(Part::VideoBox),
        route: ClickRoute::Swallow,
    },
    ClickRule {
        name: "close-target",
        matches: |target| target.within(Part::CloseControl) && !target.within(Part::Image),
        route: ClickRoute::Close,
    },
    ClickRule {
        name: "trigger",
        matches: |target| target.within(Part::Trigger),
        route: ClickRoute::Open,
    },
];

pub fn route_click(target: &dyn ClickTarget) -> ClickRoute {
    CLICK_RULES
        .iter()
        .find(|rule| (rule.matches)(target))
        .map(|rule| rule.route)
        .unwrap_or(ClickRoute::Ignore)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRoute {
    Close,
    Step(isize),
}

pub fn route_key(key: &str) -> Option<KeyRoute> {
    match key {
        "Escape" => Some(KeyRoute::Close),
        "ArrowLeft" => Some(KeyRoute::Step(-1)),
        "ArrowRight" => Some(KeyRoute::Step(1)),
        _ => None,
    }
}
