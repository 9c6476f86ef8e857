//! Deck configuration.
//!
//! A single TOML document configures the completion model, the planner's
//! budgets and layout vocabulary, the template directory and the
//! presentation constants used when reshaping slides. Every section has
//! defaults, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outline::Layout;

/// The default configuration, as written by `deckgen init`.
pub static DEFAULT_CONFIG_TOML: &str = include_str!("../assets/config.toml");

/// Errors raised while parsing or validating a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("planner.slide_types must list at least one layout")]
    NoLayouts,

    #[error("planner.max_slides must be at least 2 (got {0})")]
    MaxSlidesTooSmall(usize),

    #[error("planner.words_per_slide must be positive")]
    ZeroWordBudget,

    #[error("defaults.card_icons must not be empty")]
    NoCardIcons,
}

// -----------------------------------------------------------------------
// Sections
// -----------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeckConfig {
    pub llm: LlmSection,
    pub planner: PlannerSection,
    pub generator: GeneratorSection,
    pub styles: StylesSection,
    pub defaults: PresentationDefaults,
}

/// Completion model settings in `[llm]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSection {
    pub model: String,
    pub temperature: f32,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_owned(),
            temperature: 0.7,
        }
    }
}

/// Planner budgets and layout vocabulary in `[planner]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerSection {
    /// Upper bound on the number of slides in a planned deck.
    pub max_slides: usize,
    /// Character budget per slide, used by the prompt and the fallback splitter.
    pub words_per_slide: usize,
    /// Layouts the model may choose from. Anything else is coerced to
    /// [`Layout::DEFAULT`].
    pub slide_types: Vec<Layout>,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            max_slides: 10,
            words_per_slide: 200,
            slide_types: Layout::ALL.to_vec(),
        }
    }
}

/// Generator settings in `[generator]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSection {
    /// Directory holding `base_slide.html`, the layout templates and `common.css`.
    pub template_dir: PathBuf,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
        }
    }
}

/// Branding in `[styles]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StylesSection {
    pub logo: String,
}

impl Default for StylesSection {
    fn default() -> Self {
        Self {
            logo: "deckgen".to_owned(),
        }
    }
}

/// Presentation constants in `[defaults]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresentationDefaults {
    /// Deck title when the model omits one, and the fallback deck's title.
    pub deck_title: String,
    /// Subtitle of a synthesized or subtitle-less title slide.
    pub title_subtitle: String,
    /// Subtitle of the fallback deck's title slide.
    pub fallback_subtitle: String,
    /// Tagline shown on title slides.
    pub tagline: String,
    pub left_column_title: String,
    pub right_column_title: String,
    /// Icons assigned to grid cards, cycling when there are more cards.
    pub card_icons: Vec<String>,
}

impl Default for PresentationDefaults {
    fn default() -> Self {
        Self {
            deck_title: "演示文稿".to_owned(),
            title_subtitle: "智能生成演示文稿".to_owned(),
            fallback_subtitle: "基于文本内容生成".to_owned(),
            tagline: "基于AI技术的自动化幻灯片生成".to_owned(),
            left_column_title: "方面一".to_owned(),
            right_column_title: "方面二".to_owned(),
            card_icons: ["🎯", "🔄", "💡", "⚡", "🚀", "🎨"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

// -----------------------------------------------------------------------
// Loading
// -----------------------------------------------------------------------

impl DeckConfig {
    /// Parse and validate a configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DeckConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// A relative `generator.template_dir` is resolved against the directory
    /// containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file at {}", path.display()))?;

        if config.generator.template_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.generator.template_dir = base.join(&config.generator.template_dir);
            }
        }

        tracing::debug!(
            path = %path.display(),
            template_dir = %config.generator.template_dir.display(),
            "loaded config"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.planner.slide_types.is_empty() {
            return Err(ConfigError::NoLayouts);
        }
        if self.planner.max_slides < 2 {
            return Err(ConfigError::MaxSlidesTooSmall(self.planner.max_slides));
        }
        if self.planner.words_per_slide == 0 {
            return Err(ConfigError::ZeroWordBudget);
        }
        if self.defaults.card_icons.is_empty() {
            return Err(ConfigError::NoCardIcons);
        }
        Ok(())
    }

    /// Whether `layout` belongs to the configured vocabulary.
    pub fn allows_layout(&self, layout: Layout) -> bool {
        self.planner.slide_types.contains(&layout)
    }
}
