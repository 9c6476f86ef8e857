//! Values handed to templates.
//!
//! Layout templates see one `slide` object of type [`SlideView`]. Every
//! field is present for every layout, so a template may reference any of
//! them without tripping tera's undefined-variable check. Fields ending in
//! `content` hold markup from [`html::blocks`] and are rendered with
//! `| safe`; the rest are plain text and get autoescaped.

use askama::Template;
use serde::Serialize;

use super::html;
use super::reshape::{Card, SlideBody};
use crate::outline::Slide;

/// The `slide` object of a layout template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlideView {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub tagline: String,
    pub content: String,
    pub items: Vec<String>,
    pub left_title: String,
    pub left_content: String,
    pub right_title: String,
    pub right_content: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub icon: String,
    pub title: String,
    pub content: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            icon: card.icon.clone(),
            title: card.title.clone(),
            content: html::blocks(&card.content),
        }
    }
}

impl SlideView {
    pub fn new(slide: &Slide, body: &SlideBody) -> Self {
        let mut view = Self {
            id: slide.id.clone(),
            title: slide.title.clone(),
            content: html::blocks(&slide.content),
            ..Self::default()
        };

        match body {
            SlideBody::Title { subtitle, tagline } => {
                view.subtitle = subtitle.clone();
                view.tagline = tagline.clone();
            }
            SlideBody::Text => {}
            SlideBody::Bullets { items } => view.items = items.clone(),
            SlideBody::Columns {
                left_title,
                left,
                right_title,
                right,
            } => {
                view.left_title = left_title.clone();
                view.left_content = html::blocks(left);
                view.right_title = right_title.clone();
                view.right_content = html::blocks(right);
            }
            SlideBody::Cards { cards } => view.cards = cards.iter().map(CardView::from).collect(),
        }
        view
    }
}

/// The `slide` object of `base_slide.html`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    /// Body of the layout's `<style>` block.
    pub custom_css: String,
    pub body_class: &'static str,
    /// Rendered layout markup with the style block removed.
    pub content: String,
}

/// Navigation page written to `<output>/index.html`. Compiled in, so it
/// does not depend on the template directory.
#[derive(Template)]
#[template(path = "viewer.html")]
pub struct ViewerPage<'a> {
    pub title: &'a str,
    pub total_slides: usize,
    /// JSON array of page paths relative to `pages/`.
    pub slides_json: String,
}
