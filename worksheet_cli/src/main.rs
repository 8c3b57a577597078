//! # Worksheet CLI
//!
//! Command-line front end for the worksheet engine: pick an operation and
//! its difficulty, how many grid and list pages to produce, and an output
//! directory. Each page is written as a worksheet PDF plus its answer key.
//!
//! ```text
//! worksheet generate --operator division --remainder mixed --grid-pages 2
//! worksheet generate --config request.json --dump-problems sets.json
//! worksheet render --problems sets.json --out reprint
//! ```

mod commands;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use worksheet_core::file_io::{load_problem_sets, save_documents, save_problem_sets};
use worksheet_core::problems::{DifficultyConfig, Operator};
use worksheet_core::worksheet::{generate_problem_sets, render_problem_sets, RenderedDocument};
use worksheet_core::SheetError;

use commands::{Commands, GenerateArgs, RenderArgs};

#[derive(Parser, Debug)]
#[command(
    name = "worksheet",
    version,
    about = "Generate printable math worksheets and matching answer keys."
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => run_generate(args),
            Commands::Render(args) => run_render(args),
            Commands::Defaults => {
                print_defaults();
                Ok(())
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.run() {
        if let Some(sheet_error) = e.downcast_ref::<SheetError>() {
            if let Ok(json) = serde_json::to_string_pretty(sheet_error) {
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        return Err(e);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("worksheet={level},worksheet_core={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let request = args.to_request()?;

    println!("Worksheet Summary");
    println!("=================");
    println!("{}", request.summary());
    println!();

    if request.total_pages() == 0 {
        println!("Nothing to generate: select at least one page.");
        return Ok(());
    }

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let sets = generate_problem_sets(&request, &mut rng)?;
    if let Some(path) = &args.dump_problems {
        save_problem_sets(&sets, path)?;
        info!(path = %path.display(), "wrote problem sets");
    }

    let docs = render_problem_sets(&sets)?;
    write_documents(&args.out, &docs)
}

fn run_render(args: RenderArgs) -> Result<()> {
    let sets = load_problem_sets(&args.problems)?;
    if sets.is_empty() {
        println!("Nothing to render: {} holds no problem sets.", args.problems.display());
        return Ok(());
    }

    let docs = render_problem_sets(&sets)?;
    write_documents(&args.out, &docs)
}

fn write_documents(out: &Path, docs: &[RenderedDocument]) -> Result<()> {
    let paths = save_documents(out, docs)?;
    println!("Wrote {} files to {}:", paths.len(), out.display());
    for path in &paths {
        println!("  {}", path.display());
    }
    Ok(())
}

fn print_defaults() {
    for operator in Operator::ALL {
        let config = DifficultyConfig::default_for(operator);
        println!("{:<15} {}", operator.display_name(), config.describe());
    }
}
