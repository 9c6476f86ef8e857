use std::path::Path;

use anyhow::{Context, Result};

/// Interpret `--input`: an existing file is read as UTF-8, anything else is
/// taken as the literal text.
pub fn read_input(arg: &str) -> Result<String> {
    let path = Path::new(arg);
    if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        tracing::info!(path = %path.display(), chars = text.chars().count(), "read input file");
        Ok(text)
    } else {
        Ok(arg.to_owned())
    }
}
