use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use scraper::{Html, Selector};
use url::Url;

use crate::models::{Item, ItemKind};

// ── Constants ────────────────────────────────────────────────────────────────

const EMPTY_LABEL: &str = "None";

/// Bytes left untouched when a reference is escaped into a path: unreserved
/// characters plus the sub-delimiters that are legal inside a path segment.
const PATH_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

// ── Lazy static selectors ────────────────────────────────────────────────────

static ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

static IMAGE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

// ── Extraction ───────────────────────────────────────────────────────────────

/// Parse `body` and collect every linked anchor followed by every sourced image.
pub fn extract_items(body: &[u8], base: &Url) -> Vec<Item> {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);
    if !document.errors.is_empty() {
        tracing::debug!(recovered = document.errors.len(), "html parser recovered from errors");
    }

    let anchors = document.select(&ANCHOR_SEL).filter_map(|el| {
        let href = el.value().attr("href")?;
        Some(Item {
            label: normalize(&el.text().collect::<String>()),
            href: resolve(base, href),
            kind: ItemKind::Anchor,
        })
    });

    let images = document.select(&IMAGE_SEL).filter_map(|el| {
        let src = el.value().attr("src")?;
        Some(Item {
            label: normalize(el.value().attr("alt").unwrap_or("")),
            href: resolve(base, src),
            kind: ItemKind::Image,
        })
    });

    anchors.chain(images).collect()
}

// ── Text helpers ─────────────────────────────────────────────────────────────

/// Collapse every whitespace run to a single space and trim. Empty text
/// becomes the `"None"` sentinel so labels are never blank.
pub fn normalize(raw: &str) -> String {
    let spaced = raw.trim().replace(['\u{a0}', '\n', '\r', '\t'], " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        EMPTY_LABEL.to_string()
    } else {
        collapsed
    }
}

// ── URL helpers ──────────────────────────────────────────────────────────────

/// Resolve `reference` against `base`, treating the whole reference as the
/// path of a relative URL.
///
/// Scheme, host, query and fragment text inside `reference` are not
/// interpreted: `?` and `#` are escaped and `https://x/y` is merged like any
/// other relative path. An empty reference yields `base` unchanged.
// TODO: parse references as full URL strings once callers no longer depend on
// the path-only behaviour.
pub fn resolve(base: &Url, reference: &str) -> String {
    if reference.is_empty() {
        return base.to_string();
    }

    let escaped = utf8_percent_encode(reference, PATH_ESCAPE).to_string();
    let merged = if escaped.starts_with('/') {
        escaped
    } else {
        let base_path = base.path();
        let dir_end = base_path.rfind('/').map_or(0, |i| i + 1);
        format!("{}{}", &base_path[..dir_end], escaped)
    };

    let mut resolved = base.clone();
    resolved.set_query(None);
    resolved.set_fragment(None);
    resolved.set_path(&remove_dot_segments(&merged));
    resolved.to_string()
}

/// RFC 3986 dot-segment removal that keeps empty segments intact.
fn remove_dot_segments(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let mut ends_in_dir = false;

    for segment in path.split('/') {
        ends_in_dir = matches!(segment, "." | "..");
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    let mut out = format!("/{}", segments.join("/"));
    if ends_in_dir {
        out.push('/');
    }
    // Leading empty segment produces a doubled slash.
    if out.starts_with("//") {
        out.remove(0);
    }
    out
}
