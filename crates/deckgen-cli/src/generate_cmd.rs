use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use deckgen_core::completion::{CompletionClient, CompletionError, OpenAiClient};
use deckgen_core::files;
use deckgen_core::outline::{self, DeckOutline};
use deckgen_core::{DeckConfig, Generator, PlanSource, Planner};

use crate::input::read_input;

/// File name of the persisted outline inside the output directory.
pub const PLAN_FILE: &str = "plan.json";

/// Arguments of `deckgen generate`.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub input: Option<String>,
    pub output: PathBuf,
    pub plan_only: bool,
    pub from_plan: Option<PathBuf>,
    /// Config file the run was configured from, if any.
    pub config_file: Option<PathBuf>,
}

/// Run `deckgen generate` against the OpenAI-compatible endpoint configured
/// in the environment.
pub async fn run_generate(args: &GenerateArgs, config: &DeckConfig) -> Result<()> {
    execute(args, config, || {
        OpenAiClient::from_env().map(|c| Box::new(c) as Box<dyn CompletionClient>)
    })
    .await
}

async fn execute<F>(args: &GenerateArgs, config: &DeckConfig, make_client: F) -> Result<()>
where
    F: FnOnce() -> Result<Box<dyn CompletionClient>, CompletionError>,
{
    if let Some(path) = &args.config_file {
        println!("Using config {}", path.display());
    }
    check_output(args, config)?;

    let outline = match &args.from_plan {
        Some(path) => {
            let outline = outline::load_outline(path, config)?;
            println!("Loaded plan from {} ({} slides)", path.display(), outline.slides.len());
            outline
        }
        None => {
            let raw = args
                .input
                .as_deref()
                .context("either --input or --from-plan is required")?;
            let text = read_input(raw)?;
            let planner = Planner::new(config.clone(), make_client()?);
            let planned = planner.plan(&text).await.context("planning failed")?;
            match planned.source {
                PlanSource::Model => println!("Planned {} slides", planned.outline.slides.len()),
                PlanSource::Fallback => println!(
                    "Model reply was unusable; split input into {} slides",
                    planned.outline.slides.len()
                ),
            }
            planned.outline
        }
    };

    let plan_path = args.output.join(PLAN_FILE);

    if args.plan_only {
        outline::save_outline(&outline, &plan_path)?;
        print_outline(&outline);
        println!();
        println!("Plan written to {}", plan_path.display());
        println!("Next: deckgen generate --from-plan {}", plan_path.display());
        return Ok(());
    }

    let generator = Generator::new(config);
    let report = generator.generate(&outline, &args.output)?;
    // Written after generation: the output directory is recreated first.
    outline::save_outline(&outline, &plan_path)?;

    print_outline(&outline);
    println!();
    println!("Deck written to {}", report.output_dir.display());
    println!("  open {}", index_path(&report.output_dir).display());

    if !report.validation.is_complete() {
        println!();
        println!("Warning: {} expected files are missing:", report.validation.missing.len());
        for path in &report.validation.missing {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

/// Fail before planning if generating into `args.output` would delete the
/// templates, the config file or the input file.
fn check_output(args: &GenerateArgs, config: &DeckConfig) -> Result<()> {
    if args.plan_only {
        return Ok(());
    }
    let input_file = args.input.as_deref().map(Path::new).filter(|p| p.is_file());
    let protected: Vec<&Path> = [
        Some(config.generator.template_dir.as_path()),
        args.config_file.as_deref(),
        input_file,
    ]
    .into_iter()
    .flatten()
    .collect();
    files::check_output_dir(&args.output, &protected)
}

fn print_outline(outline: &DeckOutline) {
    println!("{}", outline.title);
    for slide in &outline.slides {
        println!("  {}  {:<12} {}", slide.id, slide.layout.as_str(), slide.title);
    }
}

fn index_path(output_dir: &Path) -> PathBuf {
    output_dir.join(files::INDEX_FILE)
}
