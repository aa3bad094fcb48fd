//! Host-independent core of the Mizuki lightbox: source normalization, the
//! media type table, zoom/pan geometry, gallery navigation, the viewer state
//! machine and the gesture dispatch tables used by the browser binding.

pub mod config;
pub mod dispatch;
pub mod gallery;
pub mod layout;
pub mod markup;
pub mod media;
pub mod source;
pub mod transform;
pub mod viewer;

pub use config::{ConfigError, Labels, LightboxConfig};
pub use dispatch::{route_click, route_key, ClickRoute, KeyRoute, ClickTarget};
pub use gallery::{Candidate, Gallery, NavState};
pub use layout::{NavPlacement, Rect};
pub use markup::Part;
pub use media::{video_mime, GalleryItem, MediaType, MediaTypeError, VideoSource};
pub use source::{normalize_src, TriggerAttrs};
pub use transform::{AnchorOffset, Cursor, Transform, ZoomLimits};
pub use viewer::{DragState, NaturalSize, RenderTicket, ViewerState, ZoomSettings};
