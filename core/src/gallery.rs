use crate::media::GalleryItem;
use crate::source::TriggerAttrs;

/// A trigger found in the clicked trigger's container, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub attrs: TriggerAttrs,
    pub is_origin: bool,
}

impl Candidate {
    pub fn new(attrs: TriggerAttrs, is_origin: bool) -> Self {
        Self { attrs, is_origin }
    }
}

/// Declarative state of the prev/next affordances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub visible: bool,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Ordered, non-empty list of items with a bounds-checked cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    index: usize,
}

impl Gallery {
    pub fn single(item: GalleryItem) -> Self {
        Self {
            items: vec![item],
            index: 0,
        }
    }

    /// `None` when `items` is empty. An out-of-range index falls back to 0.
    pub fn new(items: Vec<GalleryItem>, index: usize) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let index = if index < items.len() { index } else { 0 };
        Some(Self { items, index })
    }

    /// Builds the group for a clicked trigger.
    ///
    /// Candidates whose source normalizes to nothing are dropped; the index is the
    /// origin's position in the filtered list. Returns `None` only when the origin
    /// itself has no usable source.
    pub fn build(origin: &TriggerAttrs, candidates: &[Candidate]) -> Option<Self> {
        let origin_item = GalleryItem::from_trigger(origin)?;
        let mut items = Vec::with_capacity(candidates.len());
        let mut index = None;
        for candidate in candidates {
            let Some(item) = GalleryItem::from_trigger(&candidate.attrs) else {
                continue;
            };
            if candidate.is_origin && index.is_none() {
                index = Some(items.len());
            }
            items.push(item);
        }
        if items.is_empty() {
            return Some(Self::single(origin_item));
        }
        Self::new(items, index.unwrap_or(0))
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &GalleryItem {
        &self.items[self.index]
    }

    /// Moves the cursor by `delta`, clamped to the ends. Returns `true` when it moved.
    pub fn step(&mut self, delta: isize) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let last = self.items.len() - 1;
        let next = if delta.is_negative() {
            self.index.saturating_sub(delta.unsigned_abs())
        } else {
            self.index.saturating_add(delta as usize).min(last)
        };
        if next == self.index {
            return false;
        }
        self.index = next;
        true
    }

    pub fn nav_state(&self) -> NavState {
        let visible = self.items.len() > 1;
        NavState {
            visible,
            can_prev: visible && self.index > 0,
            can_next: visible && self.index + 1 < self.items.len(),
        }
    }

    /// Image neighbors of the current item, previous first.
    pub fn preload_targets(&self) -> Vec<&str> {
        let mut targets = Vec::with_capacity(2);
        let neighbors = [
            self.index.checked_sub(1),
            Some(self.index + 1).filter(|next| *next < self.items.len()),
        ];
        for idx in neighbors.into_iter().flatten() {
            let item = &self.items[idx];
            if item.is_image() {
                targets.push(item.src.as_str());
            }
        }
        targets
    }
}
