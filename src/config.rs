//! Root seed configuration.

use clap::Parser;
use nested_random::{Seed, DEFAULT_SEED};
use tracing::info;

/// Seed options shared by every subcommand.
#[derive(Parser, Clone, Debug, Default)]
pub struct SeedOpts {
    /// Root seed of the random tree
    #[arg(long, env = "SYNTH_SEED")]
    pub seed: Option<Seed>,
}

/// Where the effective root seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    CommandLine,
    Schema,
    Default,
}

impl SeedOpts {
    /// Pick the root seed: command line (or `SYNTH_SEED`), then the schema's
    /// `seed:`, then [`DEFAULT_SEED`].
    pub fn resolve(&self, schema_seed: Option<Seed>) -> (Seed, SeedSource) {
        let (seed, source) = match (self.seed, schema_seed) {
            (Some(seed), _) => (seed, SeedSource::CommandLine),
            (None, Some(seed)) => (seed, SeedSource::Schema),
            (None, None) => (DEFAULT_SEED, SeedSource::Default),
        };
        info!(seed, ?source, "Resolved root seed");
        (seed, source)
    }
}
