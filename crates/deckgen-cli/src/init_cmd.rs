use std::path::Path;

use anyhow::Result;

use deckgen_core::assets;

pub fn run_init(dir: &Path, force: bool) -> Result<()> {
    let report = assets::write_starter(dir, force)?;

    for path in &report.written {
        println!("  wrote {}", path.display());
    }
    for path in &report.skipped {
        println!("  kept  {} (exists; use --force to overwrite)", path.display());
    }
    println!();
    println!(
        "Starter files ready in {} ({} written, {} kept).",
        dir.display(),
        report.written.len(),
        report.skipped.len()
    );
    println!("Next: export OPENAI_API_KEY, then run `deckgen generate -i sample_input.txt`.");

    Ok(())
}
