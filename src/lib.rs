//! synth-tree
//!
//! Command-line front end for reproducible synthetic data built on a nested
//! tree of random streams.
//!
//! # Crates
//!
//! - `nested_random` - the addressable tree of seeded streams
//! - `synth_generator` - schema-driven rows generated on top of the tree
//!
//! # CLI Usage
//!
//! ```bash
//! # First draws of the stream at users/17/email under root seed 7
//! synth-tree sample --seed 7 --path users/17/email --count 5
//!
//! # Seeds along a path
//! synth-tree derive --seed 7 --path users/17/email
//!
//! # Rows 1000..1010 of a table, as JSON lines
//! synth-tree generate --schema schema.yaml --table users --rows 10 --start-index 1000
//! ```

pub mod commands;
pub mod config;

pub use config::{SeedOpts, SeedSource};
