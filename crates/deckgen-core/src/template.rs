//! Runtime template loading with tera.
//!
//! Slide templates live in the user-editable template directory and use
//! tera (Jinja2) syntax:
//!
//! ```text
//! <h2>{{ slide.title }}</h2>
//! {%- for item in slide.items %}
//!     <li>{{ item }}</li>
//! {%- endfor %}
//! ```
//!
//! Templates are registered under their file name, so every `.html`
//! template is autoescaped; values that already carry markup go through
//! `| safe`. Referencing a variable the context lacks is a render error.

use std::path::{Path, PathBuf};

use tera::Tera;
use thiserror::Error;

/// Errors from loading or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to parse template {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("failed to render template {name}")]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },
}

/// A set of templates parsed from one directory.
#[derive(Debug)]
pub struct TemplateSet {
    tera: Tera,
    dir: PathBuf,
}

impl TemplateSet {
    /// Parse the named templates from `dir`. Every name must exist as a
    /// file; nothing else in the directory is read.
    pub fn load<'a>(
        dir: &Path,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        for name in names {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(TemplateError::Missing(path));
            }
            tera.add_template_file(&path, Some(name))
                .map_err(|source| TemplateError::Load { path, source })?;
            tracing::debug!(name, "loaded template");
        }
        Ok(Self {
            tera,
            dir: dir.to_path_buf(),
        })
    }

    /// Render the template registered as `name`.
    pub fn render(&self, name: &str, ctx: &tera::Context) -> Result<String, TemplateError> {
        self.tera.render(name, ctx).map_err(|source| TemplateError::Render {
            name: name.to_owned(),
            source,
        })
    }

    /// Directory the templates were loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
