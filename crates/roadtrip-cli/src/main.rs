use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadtrip_cli::output::OutputFormat;
use roadtrip_lib::{resolve_dataset, DatasetPaths, RoadAtlas};

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest land routes between countries")]
struct Cli {
    /// Directory containing borders.txt, capdist.csv and state_name.tsv.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the border list file.
    #[arg(long, global = true)]
    borders: Option<PathBuf>,

    /// Override the capital distance table.
    #[arg(long, global = true)]
    capdist: Option<PathBuf>,

    /// Override the country registry file.
    #[arg(long, global = true)]
    state_names: Option<PathBuf>,

    /// Output format for one-shot queries.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the shortest land distance between two countries.
    Distance {
        /// Origin country name.
        #[arg(long = "from")]
        from: String,
        /// Destination country name.
        #[arg(long = "to")]
        to: String,
    },
    /// Print the border crossings on the shortest land route.
    Path {
        /// Origin country name.
        #[arg(long = "from")]
        from: String,
        /// Destination country name.
        #[arg(long = "to")]
        to: String,
    },
    /// Prompt for country pairs until EXIT (the default).
    Interactive,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = dataset_paths(&cli)?;
    let atlas = RoadAtlas::load(&paths).with_context(|| {
        format!(
            "failed to load dataset from {}",
            paths.borders.parent().unwrap_or(paths.borders.as_path()).display()
        )
    })?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Distance { from, to } => {
            commands::query::handle_distance_command(&atlas, cli.format, &from, &to)
        }
        Command::Path { from, to } => {
            commands::query::handle_path_command(&atlas, cli.format, &from, &to)
        }
        Command::Interactive => commands::interactive::handle_interactive_command(&atlas),
    }
}

fn dataset_paths(cli: &Cli) -> Result<DatasetPaths> {
    let mut paths = resolve_dataset(cli.data_dir.as_deref())
        .context("failed to locate the road trip dataset directory")?;
    if let Some(borders) = &cli.borders {
        paths = paths.with_borders(borders);
    }
    if let Some(capdist) = &cli.capdist {
        paths = paths.with_distances(capdist);
    }
    if let Some(state_names) = &cli.state_names {
        paths = paths.with_registry(state_names);
    }
    Ok(paths)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
