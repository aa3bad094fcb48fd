/// Extracts a usable media URL from a trigger's raw source attribute.
///
/// Accepts a plain URL, a CSS wrapper (`url("...")`, `url('...')`, `url(...)`)
/// or a Markdown link fragment containing `(http...)`. An empty result means
/// the trigger has nothing to show.
pub fn normalize_src(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if let Some(inner) = css_url_inner(trimmed) {
        return inner.to_string();
    }
    if let Some(link) = markdown_link_target(trimmed) {
        return link.to_string();
    }
    trimmed.to_string()
}

fn css_url_inner(value: &str) -> Option<&str> {
    let head = value.get(..4)?;
    if !head.eq_ignore_ascii_case("url(") || !value.ends_with(')') || value.len() < 5 {
        return None;
    }
    let inner = &value[4..value.len() - 1];
    for quote in ['"', '\''] {
        if inner.len() >= 2 && inner.starts_with(quote) && inner.ends_with(quote) {
            return Some(&inner[1..inner.len() - 1]);
        }
    }
    Some(inner)
}

fn markdown_link_target(value: &str) -> Option<&str> {
    for (open, _) in value.match_indices('(') {
        let rest = &value[open + 1..];
        let scheme_len = if starts_with_ignore_case(rest, "https:") {
            6
        } else if starts_with_ignore_case(rest, "http:") {
            5
        } else {
            continue;
        };
        let Some(close) = rest.find(')') else {
            continue;
        };
        if close <= scheme_len {
            continue;
        }
        return Some(&rest[..close]);
    }
    None
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

/// Raw attribute values read from one trigger element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerAttrs {
    pub src: Option<String>,
    pub caption: Option<String>,
    pub media_type: Option<String>,
    pub alt: Option<String>,
}

impl TriggerAttrs {
    pub fn with_src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }

    pub fn normalized_src(&self) -> String {
        self.src.as_deref().map(normalize_src).unwrap_or_default()
    }
}
