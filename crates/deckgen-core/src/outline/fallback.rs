//! Deterministic outline used when the model's reply is unusable.
//!
//! The input is split into non-empty lines, which are packed greedily into
//! chunks of at most `words_per_slide` characters. Each chunk becomes a
//! text-heavy content slide behind a synthetic title slide. A single line
//! longer than the budget gets a chunk of its own.

use crate::config::DeckConfig;

use super::types::{DeckOutline, Layout, Slide, SlideKind, slide_id};

/// Build the fallback outline for `input`. Never fails and always yields a
/// title slide plus at least one content slide.
pub fn fallback_outline(input: &str, config: &DeckConfig) -> DeckOutline {
    let defaults = &config.defaults;
    let budget = config.planner.words_per_slide;

    let mut slides = vec![Slide {
        id: slide_id(1),
        kind: SlideKind::Title,
        title: defaults.deck_title.clone(),
        subtitle: Some(defaults.fallback_subtitle.clone()),
        content: String::new(),
        layout: Layout::Title,
    }];

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    for paragraph in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if current.chars().count() + paragraph.chars().count() > budget && !current.is_empty() {
            chunks.push(current.trim().to_owned());
            current.clear();
        }
        current.push_str(paragraph);
        current.push_str("\n\n");
    }
    if !current.is_empty() {
        chunks.push(current.trim().to_owned());
    }
    if chunks.is_empty() {
        chunks.push(String::new());
    }

    for (part, content) in chunks.into_iter().enumerate() {
        let part = part + 1;
        slides.push(Slide {
            id: slide_id(part + 1),
            kind: SlideKind::Content,
            title: format!("第{part}部分"),
            subtitle: None,
            content,
            layout: Layout::TextHeavy,
        });
    }

    DeckOutline {
        title: defaults.deck_title.clone(),
        slides,
    }
}
