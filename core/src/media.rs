use std::fmt;

use crate::source::{normalize_src, TriggerAttrs};

/// Extensions played by a native `<video>` element, with their MIME types.
pub const VIDEO_MIME_TABLE: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    ("mov", "video/quicktime"),
    ("m3u8", "application/x-mpegURL"),
    ("mpd", "application/dash+xml"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    pub fn infer(src: &str) -> Self {
        if video_mime(src).is_some() {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            _ => Err(MediaTypeError::Unknown {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaTypeError {
    Unknown { value: String },
}

impl fmt::Display for MediaTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaTypeError::Unknown { value } => {
                write!(f, "unknown media type '{value}', expected image or video")
            }
        }
    }
}

impl std::error::Error for MediaTypeError {}

/// How a video item is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoSource {
    Native { mime: &'static str },
    Embed,
}

impl VideoSource {
    pub fn for_src(src: &str) -> Self {
        match video_mime(src) {
            Some(mime) => VideoSource::Native { mime },
            None => VideoSource::Embed,
        }
    }
}

/// MIME type for a direct video URL, ignoring query string and fragment.
pub fn video_mime(src: &str) -> Option<&'static str> {
    let path = src.split(['?', '#']).next().unwrap_or_default();
    let (_, ext) = path.rsplit_once('.')?;
    if ext.contains('/') {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    VIDEO_MIME_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// One displayable entry of a gallery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    pub src: String,
    pub alt: String,
    pub caption: String,
    pub media_type: MediaType,
}

impl GalleryItem {
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: String::new(),
            caption: String::new(),
            media_type: MediaType::Image,
        }
    }

    /// Builds an item from trigger attributes; `None` when the source normalizes to nothing.
    pub fn from_trigger(attrs: &TriggerAttrs) -> Option<Self> {
        let src = attrs.src.as_deref().map(normalize_src).unwrap_or_default();
        if src.is_empty() {
            return None;
        }
        let media_type = attrs
            .media_type
            .as_deref()
            .and_then(|value| value.parse::<MediaType>().ok())
            .unwrap_or_else(|| MediaType::infer(&src));
        Some(Self {
            alt: attrs.alt.clone().unwrap_or_default(),
            caption: attrs.caption.clone().unwrap_or_default(),
            media_type,
            src,
        })
    }

    pub fn is_image(&self) -> bool {
        self.media_type == MediaType::Image
    }
}
