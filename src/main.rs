//! Command-line interface for synth-tree
//!
//! # Usage Examples
//!
//! ```bash
//! # Draw values from a single address
//! synth-tree sample --seed 7 --path x --count 3 --kind f64
//!
//! # Generate rows, seed taken from SYNTH_SEED or the schema
//! SYNTH_SEED=42 synth-tree generate --schema schema.yaml --table users --rows 100
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG`.

use clap::{Parser, Subcommand};
use nested_random::KeyPath;
use std::io::Write;
use std::path::PathBuf;
use synth_tree::commands::{self, DrawKind, GenerateArgs};
use synth_tree::SeedOpts;

#[derive(Parser)]
#[command(name = "synth-tree")]
#[command(about = "Reproducible synthetic data from a nested tree of random streams")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first draws of the stream at an address
    Sample {
        #[command(flatten)]
        seed: SeedOpts,

        /// Address below the root, e.g. "users/17/email"
        #[arg(long, default_value = "")]
        path: KeyPath,

        /// Number of draws
        #[arg(long, default_value = "10")]
        count: usize,

        /// Representation of each draw
        #[arg(long, value_enum, default_value = "u64")]
        kind: DrawKind,
    },

    /// Print the derived seed of every node along an address
    Derive {
        #[command(flatten)]
        seed: SeedOpts,

        /// Address below the root, e.g. "users/17/email"
        #[arg(long)]
        path: KeyPath,
    },

    /// Generate rows of a table from a YAML schema as JSON lines
    Generate {
        #[command(flatten)]
        seed: SeedOpts,

        /// Schema file
        #[arg(long, value_name = "PATH")]
        schema: PathBuf,

        /// Table to generate
        #[arg(long)]
        table: String,

        /// Number of rows
        #[arg(long, default_value = "10")]
        rows: u64,

        /// Index of the first row
        #[arg(long, default_value = "0")]
        start_index: u64,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Logs on stderr; stdout is reserved for generated data
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Sample {
            seed,
            path,
            count,
            kind,
        } => {
            let (seed, _) = seed.resolve(None);
            commands::sample(seed, &path, count, kind, &mut out)?;
        }
        Commands::Derive { seed, path } => {
            let (seed, _) = seed.resolve(None);
            commands::derive_path(seed, &path, &mut out)?;
        }
        Commands::Generate {
            seed,
            schema,
            table,
            rows,
            start_index,
        } => {
            let args = GenerateArgs {
                schema: &schema,
                table: &table,
                rows,
                start_index,
                seed: &seed,
            };
            commands::generate(&args, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
