mod config;
mod generate_cmd;
mod init_cmd;
mod input;
#[cfg(test)]
mod test_util;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use generate_cmd::GenerateArgs;

#[derive(Parser)]
#[command(name = "deckgen", about = "Turn free-form text into an HTML slide deck")]
struct Cli {
    /// Config file (overrides DECKGEN_CONFIG and the default search path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a deck from text and render it
    Generate {
        /// Input text, or a path to a UTF-8 file containing it
        #[arg(short, long, required_unless_present = "from_plan")]
        input: Option<String>,
        /// Output directory (recreated on every run)
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
        /// Write OUTPUT/plan.json and stop before rendering
        #[arg(long)]
        plan_only: bool,
        /// Render a previously saved plan instead of calling the model
        #[arg(long, conflicts_with_all = ["input", "plan_only"])]
        from_plan: Option<PathBuf>,
    },
    /// Write the default config, templates and a sample input
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            plan_only,
            from_plan,
        } => {
            let resolved = config::resolve(cli.config.as_deref())?;
            let args = GenerateArgs {
                input,
                output,
                plan_only,
                from_plan,
                config_file: resolved.source.path().map(Path::to_path_buf),
            };
            generate_cmd::run_generate(&args, &resolved.config).await?;
        }
        Commands::Init { dir, force } => {
            init_cmd::run_init(&dir, force)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
