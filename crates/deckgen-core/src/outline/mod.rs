//! Deck outline: types, boundary validation, fallback planning, persistence.

pub mod fallback;
pub mod normalize;
pub mod types;

use std::path::Path;

use anyhow::{Context as _, Result};
use serde_json::Value;

use crate::config::DeckConfig;
use crate::files;

pub use fallback::fallback_outline;
pub use normalize::{
    ReplyError, normalize_outline, outline_from_reply, outline_from_value, strip_code_fence,
};
pub use types::{DeckOutline, Layout, LayoutParseError, Slide, SlideKind, slide_id};

/// Persist an outline as pretty-printed JSON, creating parent directories.
pub fn save_outline(outline: &DeckOutline, path: &Path) -> Result<()> {
    files::save_json(outline, path)?;
    tracing::info!(path = %path.display(), slides = outline.slides.len(), "saved outline");
    Ok(())
}

/// Load a saved (possibly hand-edited) outline and re-establish the deck
/// invariants.
///
/// The file is read with the same leniency as a model reply, so unknown
/// layouts fall back to the default instead of failing the load. The slide
/// count is not capped.
pub fn load_outline(path: &Path, config: &DeckConfig) -> Result<DeckOutline> {
    let value: Value = files::load_json(path)?;
    let outline = outline_from_value(&value, config)
        .with_context(|| format!("invalid outline at {}", path.display()))?;
    tracing::debug!(path = %path.display(), slides = outline.slides.len(), "loaded outline");
    Ok(outline)
}
