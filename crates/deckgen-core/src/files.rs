//! File-system helpers for the output tree.
//!
//! Output layout:
//!
//! ```text
//! <output>/
//!   index.html          navigation shell
//!   slides.json         manifest: ["01/index.html", ...]
//!   plan.json           outline the deck was rendered from
//!   pages/
//!     common.css
//!     01/index.html
//!     02/index.html
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::outline::{DeckOutline, slide_id};

/// Name of the shared stylesheet copied from the template directory.
pub const COMMON_CSS: &str = "common.css";
/// Navigation page at the root of the output tree.
pub const INDEX_FILE: &str = "index.html";
/// Manifest of slide page paths.
pub const MANIFEST_FILE: &str = "slides.json";
/// Directory holding the per-slide pages.
pub const PAGES_DIR: &str = "pages";

// -----------------------------------------------------------------------
// Scaffolding
// -----------------------------------------------------------------------

/// Refuse an output directory whose removal would take the working
/// directory or any `protected` path with it.
///
/// Paths are compared after resolving symlinks and `..`. An output
/// directory that does not exist yet is always accepted, as are protected
/// paths that do not exist.
pub fn check_output_dir(output_dir: &Path, protected: &[&Path]) -> Result<()> {
    let Ok(output) = output_dir.canonicalize() else {
        return Ok(());
    };
    let cwd = std::env::current_dir().ok();
    for path in protected.iter().copied().chain(cwd.as_deref()) {
        let Ok(path) = path.canonicalize() else {
            continue;
        };
        if path.starts_with(&output) {
            bail!(
                "refusing to use {} as the output directory: it contains {}",
                output_dir.display(),
                path.display()
            );
        }
    }
    Ok(())
}

/// Remove the output directory and everything below it, if it exists.
pub fn clean_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        std::fs::remove_dir_all(output_dir)
            .with_context(|| format!("failed to remove {}", output_dir.display()))?;
        tracing::info!(path = %output_dir.display(), "cleaned output directory");
    }
    Ok(())
}

/// Create `<output>/pages/NN/` for slides `01..=slide_count`.
pub fn create_slide_structure(output_dir: &Path, slide_count: usize) -> Result<()> {
    let pages = output_dir.join(PAGES_DIR);
    for position in 1..=slide_count {
        let dir = pages.join(slide_id(position));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    // Covers slide_count == 0.
    std::fs::create_dir_all(&pages)
        .with_context(|| format!("failed to create {}", pages.display()))?;
    tracing::info!(path = %output_dir.display(), slide_count, "created slide structure");
    Ok(())
}

/// Copy `common.css` from the template directory into `<output>/pages/`.
///
/// Returns `false` (and logs a warning) when the template directory has no
/// stylesheet; output validation will then report it as missing.
pub fn copy_common_assets(template_dir: &Path, output_dir: &Path) -> Result<bool> {
    let src = template_dir.join(COMMON_CSS);
    if !src.is_file() {
        tracing::warn!(path = %src.display(), "shared stylesheet not found, skipping");
        return Ok(false);
    }
    let dst = output_dir.join(PAGES_DIR).join(COMMON_CSS);
    std::fs::copy(&src, &dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    tracing::debug!(dst = %dst.display(), "copied shared stylesheet");
    Ok(true)
}

/// Write `slides.json` listing every slide page in display order.
pub fn write_manifest(outline: &DeckOutline, output_dir: &Path) -> Result<Vec<String>> {
    let pages = outline.page_paths();
    let path = output_dir.join(MANIFEST_FILE);
    save_json(&pages, &path)?;
    tracing::info!(path = %path.display(), entries = pages.len(), "wrote manifest");
    Ok(pages)
}

// -----------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------

/// Outcome of checking the output tree for expected artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Expected files that do not exist.
    pub missing: Vec<PathBuf>,
}

impl ValidationReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check that the navigation page, manifest, shared stylesheet and every
/// slide page exist. Missing files are reported, not treated as errors.
pub fn validate_output(output_dir: &Path, outline: &DeckOutline) -> ValidationReport {
    let pages = output_dir.join(PAGES_DIR);
    let mut required = vec![
        output_dir.join(INDEX_FILE),
        output_dir.join(MANIFEST_FILE),
        pages.join(COMMON_CSS),
    ];
    required.extend(outline.page_paths().iter().map(|p| pages.join(p)));

    let missing: Vec<PathBuf> = required.into_iter().filter(|p| !p.is_file()).collect();
    if missing.is_empty() {
        tracing::info!(path = %output_dir.display(), "output validation passed");
    } else {
        tracing::warn!(count = missing.len(), ?missing, "output is missing files");
    }
    ValidationReport { missing }
}

// -----------------------------------------------------------------------
// JSON
// -----------------------------------------------------------------------

/// Read and deserialize a UTF-8 JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse JSON from {}", path.display()))
}

/// Serialize as pretty JSON (two-space indent) and write, creating parent
/// directories as needed.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let mut contents = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    contents.push('\n');
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
