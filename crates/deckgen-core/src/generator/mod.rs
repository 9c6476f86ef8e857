//! Static-site generation for a deck outline.
//!
//! [`Generator::generate`] turns a validated [`DeckOutline`] into a directory
//! of independent HTML pages:
//!
//! 1. parse the base template and every layout template the outline uses;
//! 2. clear and recreate the output tree (one directory per slide), unless
//!    that would delete the working directory or the templates;
//! 3. copy the shared stylesheet;
//! 4. render each slide: reshape content for its layout, render the layout
//!    template, then wrap it in `base_slide.html`;
//! 5. render the navigation page;
//! 6. write the `slides.json` manifest;
//! 7. check that the expected files exist.
//!
//! Nothing is retried. A missing or broken template aborts the run before
//! the output directory is touched; missing output files are reported in
//! the [`GenerationReport`].

pub mod html;
pub mod reshape;
pub mod view;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use askama::Template as _;

use crate::config::{DeckConfig, PresentationDefaults};
use crate::files::{self, ValidationReport};
use crate::outline::{DeckOutline, Slide};
use crate::template::TemplateSet;

pub use reshape::{Card, MAX_BULLETS, MAX_CARDS, SlideBody, bullet_items, reshape};
pub use view::{CardView, PageView, SlideView, ViewerPage};

/// Base page template wrapping every rendered layout.
pub const BASE_TEMPLATE: &str = "base_slide.html";

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Slide page paths relative to `pages/`, in display order.
    pub pages: Vec<String>,
    pub validation: ValidationReport,
}

/// Renders outlines using the templates in a template directory.
#[derive(Debug, Clone)]
pub struct Generator {
    template_dir: PathBuf,
    logo: String,
    defaults: PresentationDefaults,
}

impl Generator {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            template_dir: config.generator.template_dir.clone(),
            logo: config.styles.logo.clone(),
            defaults: config.defaults.clone(),
        }
    }

    /// Parse the base template plus every layout template `outline` needs.
    pub fn load_templates(&self, outline: &DeckOutline) -> Result<TemplateSet> {
        let layouts: BTreeSet<&str> = outline
            .slides
            .iter()
            .map(|slide| slide.layout.template_file())
            .collect();
        let names = std::iter::once(BASE_TEMPLATE).chain(layouts);
        Ok(TemplateSet::load(&self.template_dir, names)?)
    }

    /// Render `outline` into `output_dir`, replacing anything already there.
    pub fn generate(&self, outline: &DeckOutline, output_dir: &Path) -> Result<GenerationReport> {
        tracing::info!(
            output = %output_dir.display(),
            slides = outline.slides.len(),
            "generating deck"
        );

        let templates = self.load_templates(outline)?;

        files::check_output_dir(output_dir, &[templates.dir()])?;
        files::clean_output_dir(output_dir)?;
        files::create_slide_structure(output_dir, outline.slides.len())?;
        files::copy_common_assets(templates.dir(), output_dir)?;

        for slide in &outline.slides {
            self.write_slide(&templates, slide, output_dir)?;
        }

        write_index(outline, output_dir)?;
        let pages = files::write_manifest(outline, output_dir)?;
        let validation = files::validate_output(output_dir, outline);

        Ok(GenerationReport {
            output_dir: output_dir.to_path_buf(),
            pages,
            validation,
        })
    }

    /// Render one slide to a complete HTML page.
    pub fn render_slide(&self, templates: &TemplateSet, slide: &Slide) -> Result<String> {
        let body = reshape(slide, &self.defaults);
        let mut layout_ctx = tera::Context::new();
        layout_ctx.insert("slide", &SlideView::new(slide, &body));
        let rendered_layout = templates.render(slide.layout.template_file(), &layout_ctx)?;

        let (custom_css, content) = html::split_style(&rendered_layout);
        let page = PageView {
            id: &slide.id,
            title: &slide.title,
            custom_css,
            body_class: slide.layout.body_class(),
            content,
        };
        let mut page_ctx = tera::Context::new();
        page_ctx.insert("slide", &page);
        page_ctx.insert("logo", &self.logo);
        Ok(templates.render(BASE_TEMPLATE, &page_ctx)?)
    }

    fn write_slide(&self, templates: &TemplateSet, slide: &Slide, output_dir: &Path) -> Result<()> {
        tracing::info!(id = %slide.id, layout = %slide.layout, "rendering slide");
        let page = self.render_slide(templates, slide)?;
        let path = output_dir.join(files::PAGES_DIR).join(slide.page_path());
        std::fs::write(&path, page).with_context(|| format!("failed to write {}", path.display()))
    }
}

fn write_index(outline: &DeckOutline, output_dir: &Path) -> Result<()> {
    let pages = outline.page_paths();
    let viewer = ViewerPage {
        title: &outline.title,
        total_slides: pages.len(),
        slides_json: serde_json::to_string(&pages)?,
    };
    let rendered = viewer.render().context("failed to render navigation page")?;

    let path = output_dir.join(files::INDEX_FILE);
    std::fs::write(&path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote navigation page");
    Ok(())
}
