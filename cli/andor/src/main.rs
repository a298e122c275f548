//! andor CLI: explore AND/OR grammars by guided construction.

mod commands;
mod logging;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::debug;

use commands::Project;
use manifest::AndorManifest;

#[derive(Parser)]
#[command(name = "andor", version, about = "Guided traversal of AND/OR grammar graphs")]
struct Cli {
    /// Grammar file (.toml, .json or .aog); defaults to [grammar] path in andor.toml
    #[arg(long, global = true)]
    grammar: Option<PathBuf>,
    /// Start symbol; overrides andor.toml and the grammar file
    #[arg(long, global = true)]
    start: Option<String>,
    /// Log level or filter directive (e.g. debug, andor_core=trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create andor.toml and a sample grammar
    Init {
        /// Project directory (default: current directory)
        dir: Option<PathBuf>,
    },
    /// Show vertex counts for the grammar
    Stats {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List what can come next after the given tokens
    Choices {
        /// Tokens already chosen ("-" is the accept marker)
        tokens: Vec<String>,
        /// Length of the token sequences to list (at least 1)
        #[arg(long, value_parser = commands::parse_depth)]
        depth: Option<usize>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List partially expanded forms after the given tokens
    Constructs {
        /// Tokens already chosen ("-" is the accept marker)
        tokens: Vec<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a sentence interactively
    Walk,
    /// Write a compiled .aog snapshot
    Compile {
        /// Output file
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let found = AndorManifest::find_and_load(&cwd)?;
    let manifest = found.as_ref().map(|(m, dir)| (m, dir.as_path()));

    logging::init_logging(
        cli.log_level.as_deref(),
        manifest.and_then(|(m, _)| m.logging.as_ref()),
    )?;
    if let Some((_, dir)) = manifest {
        debug!(dir = %dir.display(), "Using andor.toml");
    }

    match cli.command {
        Commands::Init { dir } => commands::init::run(&dir.unwrap_or(cwd)),

        Commands::Stats { json } => {
            let project = load_project(&cwd, manifest, &cli.grammar, &cli.start)?;
            commands::stats::run(&project, json)
        }

        Commands::Choices {
            tokens,
            depth,
            json,
        } => {
            let project = load_project(&cwd, manifest, &cli.grammar, &cli.start)?;
            let depth = depth.unwrap_or(project.default_depth);
            commands::query::run_choices(&project, &tokens, depth, json)
        }

        Commands::Constructs { tokens, json } => {
            let project = load_project(&cwd, manifest, &cli.grammar, &cli.start)?;
            commands::query::run_constructs(&project, &tokens, json)
        }

        Commands::Walk => {
            let project = load_project(&cwd, manifest, &cli.grammar, &cli.start)?;
            commands::walk::run(&project)
        }

        Commands::Compile { output } => {
            let project = load_project(&cwd, manifest, &cli.grammar, &cli.start)?;
            commands::compile::run(&project, &cwd.join(output))
        }
    }
}

fn load_project(
    cwd: &Path,
    manifest: Option<(&AndorManifest, &Path)>,
    grammar: &Option<PathBuf>,
    start: &Option<String>,
) -> anyhow::Result<Project> {
    Project::load(cwd, manifest, grammar.as_deref(), start.as_deref())
}
