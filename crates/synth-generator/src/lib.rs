//! Schema-driven synthetic data generator.
//!
//! This crate provides the `DataGenerator`, which produces deterministic rows
//! from a YAML schema. Every row, field, nested record and repeated element
//! draws from its own stream in a [`nested_random::Node`] tree, so the same
//! seed always reproduces the same dataset and fields never share randomness.
//!
//! # Architecture
//!
//! ```text
//! Schema (YAML)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │  DataGenerator  │
//! │                 │
//! │  - seed         │──▶ Node(seed) ─ table ─ index ─ field ─ ...
//! │  - index        │
//! └────────┬────────┘
//!          │
//!          ▼
//!    GeneratedRow { table, index, id, fields }
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_generator::{DataGenerator, Schema};
//!
//! let schema = Schema::from_yaml(r#"
//! version: 1
//! seed: 42
//! tables:
//!   - name: users
//!     id:
//!       generator:
//!         type: uuid_v4
//!     fields:
//!       - name: email
//!         generator:
//!           type: pattern
//!           pattern: "user_{index}@example.com"
//! "#).unwrap();
//!
//! let mut generator = DataGenerator::from_schema(schema);
//! let row = generator.next_row("users").unwrap();
//! println!("Generated row: {}", row.to_json());
//! ```
//!
//! # Generators
//!
//! - `uuid_v4` - UUID with v4 layout
//! - `sequential` - Sequential integers
//! - `pattern` - Pattern strings with placeholders (`{index}`, `{uuid}`, `{rand:N}`)
//! - `int_range` - Random integers in a range
//! - `float_range` - Random floats in a range
//! - `timestamp_range` - Random timestamps in a date range
//! - `weighted_bool` - Boolean with configurable true probability
//! - `one_of` - Random selection from a list
//! - `sample_array` - Array of random samples from a pool
//! - `repeat` - Variable-length array of generated elements
//! - `object` - Nested record
//! - `static` - Static value
//! - `null` - Null value

pub mod generator;
pub mod generators;
pub mod schema;
pub mod value;

// Re-exports for convenience
pub use generator::{DataGenerator, GeneratorError, RowIterator};
pub use schema::{FieldSchema, GeneratorConfig, IdField, Schema, SchemaError, TableSchema};
pub use value::{GeneratedRow, GeneratedValue};
