//! Subcommand implementations.
//!
//! Each command writes its data to the given writer and logs through
//! `tracing`, so stdout carries nothing but output.

use anyhow::Context;
use clap::ValueEnum;
use nested_random::{derive, KeyPath, Node, Seed};
use rand::{Rng, RngCore};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use synth_generator::{DataGenerator, Schema};
use tracing::{debug, info};

use crate::config::SeedOpts;

/// Representation of each draw printed by `sample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DrawKind {
    /// Unsigned 64-bit integers
    U64,
    /// Unsigned 32-bit integers
    U32,
    /// Uniform doubles in [0, 1)
    F64,
}

/// Print the first `count` draws of the stream at `path`.
pub fn sample<W: Write>(
    seed: Seed,
    path: &KeyPath,
    count: usize,
    kind: DrawKind,
    out: &mut W,
) -> anyhow::Result<()> {
    let root = Arc::new(Node::new(seed));
    let node = root.descend(path);
    debug!(seed, %path, node_seed = node.seed(), "Sampling node stream");

    let mut stream = node.stream();
    for _ in 0..count {
        let written = match kind {
            DrawKind::U64 => writeln!(out, "{}", stream.next_u64()),
            DrawKind::U32 => writeln!(out, "{}", stream.next_u32()),
            DrawKind::F64 => writeln!(out, "{}", stream.gen::<f64>()),
        };
        written.context("Failed to write sample")?;
    }
    Ok(())
}

/// Print the seed of every node from the root down to `path`.
///
/// The root line uses `/` as its path.
pub fn derive_path<W: Write>(seed: Seed, path: &KeyPath, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "/\t{seed:#018x}").context("Failed to write seed")?;

    let mut current = seed;
    let mut prefix = KeyPath::default();
    for key in path {
        current = derive(current, key);
        prefix = prefix.join(key);
        writeln!(out, "{prefix}\t{current:#018x}").context("Failed to write seed")?;
    }
    Ok(())
}

/// Options of the `generate` command.
#[derive(Debug, Clone)]
pub struct GenerateArgs<'a> {
    pub schema: &'a Path,
    pub table: &'a str,
    pub rows: u64,
    pub start_index: u64,
    pub seed: &'a SeedOpts,
}

/// Generate rows of one table and print them as JSON lines.
pub fn generate<W: Write>(args: &GenerateArgs<'_>, out: &mut W) -> anyhow::Result<()> {
    let schema = Schema::from_file(args.schema)
        .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;
    let (seed, _) = args.seed.resolve(schema.seed);

    let mut generator = DataGenerator::new(schema, seed).with_start_index(args.start_index);
    info!(
        table = args.table,
        rows = args.rows,
        start_index = args.start_index,
        "Generating rows"
    );

    for row in generator.rows(args.table, args.rows)? {
        serde_json::to_writer(&mut *out, &row.to_json()).context("Failed to write row")?;
        writeln!(out).context("Failed to write row")?;
    }

    info!(table = args.table, next_index = generator.current_index(), "Done");
    Ok(())
}
