//! Built-in templates and starter files, embedded at compile time.
//!
//! `deckgen init` writes these out so a fresh directory has a working
//! configuration and template set. The navigation page is not among them;
//! it is compiled in as [`crate::generator::ViewerPage`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::DEFAULT_CONFIG_TOML;

/// Sample input text for trying the pipeline.
pub static SAMPLE_INPUT: &str = include_str!("../assets/sample_input.txt");

/// Default template set: `(file name, contents)`.
pub static TEMPLATE_FILES: [(&str, &str); 7] = [
    ("base_slide.html", include_str!("../assets/templates/base_slide.html")),
    ("title_layout.html", include_str!("../assets/templates/title_layout.html")),
    ("text_heavy_layout.html", include_str!("../assets/templates/text_heavy_layout.html")),
    ("bullet_list_layout.html", include_str!("../assets/templates/bullet_list_layout.html")),
    ("two_column_layout.html", include_str!("../assets/templates/two_column_layout.html")),
    ("grid_cards_layout.html", include_str!("../assets/templates/grid_cards_layout.html")),
    ("common.css", include_str!("../assets/templates/common.css")),
];

/// Files written (or left alone) by [`write_starter`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StarterReport {
    pub written: Vec<PathBuf>,
    /// Existing files that were kept because `force` was not set.
    pub skipped: Vec<PathBuf>,
}

/// Write the default template set into `dir`.
pub fn write_templates(dir: &Path, force: bool) -> Result<StarterReport> {
    let mut report = StarterReport::default();
    for (name, contents) in TEMPLATE_FILES {
        write_file(&dir.join(name), contents, force, &mut report)?;
    }
    Ok(report)
}

/// Write `config.toml`, `templates/` and `sample_input.txt` into `dir`.
pub fn write_starter(dir: &Path, force: bool) -> Result<StarterReport> {
    let mut report = write_templates(&dir.join("templates"), force)?;
    write_file(&dir.join("config.toml"), DEFAULT_CONFIG_TOML, force, &mut report)?;
    write_file(&dir.join("sample_input.txt"), SAMPLE_INPUT, force, &mut report)?;
    Ok(report)
}

fn write_file(path: &Path, contents: &str, force: bool, report: &mut StarterReport) -> Result<()> {
    if path.exists() && !force {
        tracing::debug!(path = %path.display(), "file exists, keeping it");
        report.skipped.push(path.to_path_buf());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    report.written.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::Layout;

    #[test]
    fn every_layout_has_a_builtin_template() {
        for layout in Layout::ALL {
            assert!(
                TEMPLATE_FILES.iter().any(|(name, _)| *name == layout.template_file()),
                "no builtin template for {layout}"
            );
        }
    }

    #[test]
    fn starter_skips_existing_files_unless_forced() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = tmp.path().join("config.toml");
        std::fs::write(&config, "# mine").unwrap();

        let report = write_starter(tmp.path(), false).unwrap();
        assert_eq!(report.skipped, vec![config.clone()]);
        assert_eq!(report.written.len(), TEMPLATE_FILES.len() + 1);
        assert_eq!(std::fs::read_to_string(&config).unwrap(), "# mine");
        assert!(tmp.path().join("templates/base_slide.html").is_file());

        let report = write_starter(tmp.path(), true).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(std::fs::read_to_string(&config).unwrap(), DEFAULT_CONFIG_TOML);
    }
}
