//! Deck outline types.
//!
//! These map directly to the `plan.json` on-disk format and are
//! (de)serialized via `serde` + `serde_json`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Named presentation layout for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Title,
    TextHeavy,
    BulletList,
    TwoColumn,
    GridCards,
    Timeline,
    Conclusion,
}

impl Layout {
    /// Every layout, in the order they are presented to the model.
    pub const ALL: [Layout; 7] = [
        Self::Title,
        Self::TextHeavy,
        Self::BulletList,
        Self::TwoColumn,
        Self::GridCards,
        Self::Timeline,
        Self::Conclusion,
    ];

    /// Layout used when a slide names none or an unknown one.
    pub const DEFAULT: Layout = Self::TextHeavy;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TextHeavy => "text_heavy",
            Self::BulletList => "bullet_list",
            Self::TwoColumn => "two_column",
            Self::GridCards => "grid_cards",
            Self::Timeline => "timeline",
            Self::Conclusion => "conclusion",
        }
    }

    /// File name of the layout template inside the template directory.
    ///
    /// `timeline` and `conclusion` have no dedicated template yet and share
    /// the text-heavy one.
    pub fn template_file(self) -> &'static str {
        match self {
            Self::Title => "title_layout.html",
            Self::BulletList => "bullet_list_layout.html",
            Self::TwoColumn => "two_column_layout.html",
            Self::GridCards => "grid_cards_layout.html",
            Self::TextHeavy | Self::Timeline | Self::Conclusion => "text_heavy_layout.html",
        }
    }

    /// CSS class applied to `<body>` of the rendered page.
    pub fn body_class(self) -> &'static str {
        match self {
            Self::Title => "title-slide",
            _ => "",
        }
    }

    /// Short description used when listing layouts in the planner prompt.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Title => "标题页（用于开场）",
            Self::TextHeavy => "文字密集型（适合详细解释）",
            Self::BulletList => "要点列表（适合要点总结）",
            Self::TwoColumn => "双栏对比（适合对比分析）",
            Self::GridCards => "网格卡片（适合多个要点展示）",
            Self::Timeline => "时间线（适合历史发展或流程）",
            Self::Conclusion => "总结页（用于结尾）",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s)
            .ok_or_else(|| LayoutParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`Layout`] string.
#[derive(Debug, Clone)]
pub struct LayoutParseError(pub String);

impl fmt::Display for LayoutParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid layout: {:?}", self.0)
    }
}

impl std::error::Error for LayoutParseError {}

// ---------------------------------------------------------------------------

/// Role of a slide within the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Title,
    Content,
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Title => "title",
            Self::Content => "content",
        };
        f.write_str(s)
    }
}

impl FromStr for SlideKind {
    type Err = SlideKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            other => Err(SlideKindParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`SlideKind`] string.
#[derive(Debug, Clone)]
pub struct SlideKindParseError(pub String);

impl fmt::Display for SlideKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid slide type: {:?}", self.0)
    }
}

impl std::error::Error for SlideKindParseError {}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

/// The structured plan produced by the planner and consumed by the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeckOutline {
    /// Presentation title.
    pub title: String,
    /// Slides in display order.
    pub slides: Vec<Slide>,
}

/// A single slide in the outline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slide {
    /// Zero-padded position ("01", "02", ...). Also names the page directory.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SlideKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Plain text or an HTML fragment.
    #[serde(default)]
    pub content: String,
    pub layout: Layout,
}

impl Slide {
    /// Relative path of this slide's page below `pages/`.
    pub fn page_path(&self) -> String {
        format!("{}/index.html", self.id)
    }
}

/// Format a 1-based slide position as a slide ID.
pub fn slide_id(position: usize) -> String {
    format!("{position:02}")
}

impl DeckOutline {
    /// Relative page paths of every slide, in display order.
    pub fn page_paths(&self) -> Vec<String> {
        self.slides.iter().map(Slide::page_path).collect()
    }

    /// Rewrite slide IDs to the contiguous sequence `01..`.
    pub fn renumber(&mut self) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.id = slide_id(i + 1);
        }
    }
}
