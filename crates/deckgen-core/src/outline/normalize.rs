//! Boundary validation for outlines coming from the completion service.
//!
//! The model's reply is untrusted, loosely shaped JSON, and so is a plan
//! file a user has edited by hand. [`outline_from_reply`] and
//! [`outline_from_value`] turn either into a [`DeckOutline`] that satisfies
//! the deck invariants:
//! - the first slide uses the `title` layout;
//! - every layout is in the configured vocabulary;
//! - slide IDs are the contiguous sequence `01..`.
//!
//! Replies that cannot be turned into any slide are reported as a
//! [`ReplyError`] so the planner can fall back to the deterministic splitter.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::DeckConfig;

use super::types::{DeckOutline, Layout, Slide, SlideKind};

/// Reasons a completion reply or a plan file could not be used as an
/// outline.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("outline JSON is not an object")]
    NotAnObject,

    #[error("outline contains no usable slides")]
    NoSlides,
}

/// Parse a completion reply into a validated outline of at most
/// `planner.max_slides` slides.
pub fn outline_from_reply(reply: &str, config: &DeckConfig) -> Result<DeckOutline, ReplyError> {
    let value: Value = serde_json::from_str(strip_code_fence(reply))?;
    let mut outline = outline_from_value(&value, config)?;

    let max = config.planner.max_slides;
    if outline.slides.len() > max {
        tracing::warn!(
            planned = outline.slides.len(),
            max_slides = max,
            "model planned more slides than allowed, truncating"
        );
        outline.slides.truncate(max);
    }

    Ok(outline)
}

/// Build a validated outline from loosely shaped JSON.
///
/// Missing fields get defaults, unknown layouts and slide types are
/// coerced, and array `content` is joined line by line. Non-object entries
/// in `slides` are skipped. The slide count is not capped.
pub fn outline_from_value(value: &Value, config: &DeckConfig) -> Result<DeckOutline, ReplyError> {
    let object = value.as_object().ok_or(ReplyError::NotAnObject)?;

    let title = non_empty_str(object, "title")
        .unwrap_or(&config.defaults.deck_title)
        .to_owned();

    let raw_slides = object
        .get("slides")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let slides: Vec<Slide> = raw_slides
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(i, raw)| slide_from_object(i + 1, raw))
        .collect();

    if slides.is_empty() {
        return Err(ReplyError::NoSlides);
    }

    Ok(normalize_outline(DeckOutline { title, slides }, config))
}

/// Enforce the deck invariants on an already-typed outline.
///
/// Used both for model replies and for outlines loaded from disk. A valid
/// outline passes through unchanged.
pub fn normalize_outline(mut outline: DeckOutline, config: &DeckConfig) -> DeckOutline {
    for slide in &mut outline.slides {
        if !config.allows_layout(slide.layout) {
            tracing::debug!(
                slide = %slide.title,
                layout = %slide.layout,
                "layout not in configured vocabulary, using default"
            );
            slide.layout = Layout::DEFAULT;
        }
    }

    let needs_title_slide = outline
        .slides
        .first()
        .is_some_and(|first| first.layout != Layout::Title);
    if needs_title_slide {
        let title_slide = Slide {
            id: String::new(),
            kind: SlideKind::Title,
            title: outline.title.clone(),
            subtitle: Some(config.defaults.title_subtitle.clone()),
            content: String::new(),
            layout: Layout::Title,
        };
        outline.slides.insert(0, title_slide);
    }

    outline.renumber();
    outline
}

/// Extract the body of the first Markdown code fence in `reply`, if any.
///
/// The fence may follow a preamble and may sit on a single line
/// (```` ```json {"a": 1}``` ````). The info string runs up to the first
/// whitespace or opening bracket. The body ends at the last ```` ``` ````;
/// an unclosed fence runs to the end of the reply. A reply that already
/// starts with JSON is returned trimmed, even if a string inside it holds
/// backticks.
pub fn strip_code_fence(reply: &str) -> &str {
    const FENCE: &str = "```";

    let trimmed = reply.trim();
    if trimmed.starts_with(['{', '[']) {
        return trimmed;
    }
    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };
    let after_open = &trimmed[open + FENCE.len()..];
    let body_start = after_open
        .find(|c: char| c.is_whitespace() || c == '{' || c == '[')
        .unwrap_or(after_open.len());
    let body = &after_open[body_start..];
    let body = match body.rfind(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };
    body.trim()
}

fn slide_from_object(position: usize, raw: &Map<String, Value>) -> Slide {
    let kind = raw
        .get("type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(SlideKind::Content);

    let layout = match raw.get("layout").and_then(Value::as_str) {
        Some(name) => name.parse().unwrap_or_else(|_| {
            tracing::debug!(layout = name, "unknown layout from model, using default");
            Layout::DEFAULT
        }),
        None => Layout::DEFAULT,
    };

    Slide {
        id: String::new(),
        kind,
        title: non_empty_str(raw, "title")
            .map(str::to_owned)
            .unwrap_or_else(|| format!("第{position}页")),
        subtitle: non_empty_str(raw, "subtitle").map(str::to_owned),
        content: content_text(raw.get("content")),
        layout,
    }
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Flatten a `content` value to text. Models occasionally return a list of
/// bullet strings instead of one string; those become one line each.
fn content_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => other.to_string(),
    }
}
