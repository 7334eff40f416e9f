//! Main data generator for producing rows.

use nested_random::{Node, Seed, DEFAULT_SEED};
use tracing::{debug, trace};

use crate::generators::{generate_fields, generate_value};
use crate::schema::{Schema, TableSchema, ID_KEY};
use crate::value::GeneratedRow;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] crate::schema::SchemaError),
}

/// Data generator that produces deterministic rows.
///
/// Row `i` of table `t` is generated at address `t/i` of a random tree rooted
/// at the generator's seed. Each row is built from a freshly constructed root,
/// so a row depends only on `(seed, table, index)`: generating it again, out of
/// order, or after a dry run gives the same values.
pub struct DataGenerator {
    /// Schema defining the tables and field generators
    schema: Schema,
    /// Root seed of the random tree
    seed: Seed,
    /// Current row index (for incremental generation)
    index: u64,
}

impl DataGenerator {
    /// Create a new data generator with the given schema and seed.
    pub fn new(schema: Schema, seed: Seed) -> Self {
        Self {
            schema,
            seed,
            index: 0,
        }
    }

    /// Create a generator seeded from the schema, or the default seed.
    pub fn from_schema(schema: Schema) -> Self {
        let seed = schema.seed.unwrap_or(DEFAULT_SEED);
        Self::new(schema, seed)
    }

    /// Set the starting index for row generation.
    ///
    /// Rows are addressed directly, so this costs nothing regardless of how
    /// far ahead the index is.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// The root seed.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Get the current row index.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate row `index` of `table` without moving the current index.
    pub fn row_at(&self, table: &str, index: u64) -> Result<GeneratedRow, GeneratorError> {
        let table_schema = self
            .schema
            .get_table(table)
            .ok_or_else(|| GeneratorError::TableNotFound(table.to_string()))?;
        Ok(build_row(self.seed, table_schema, index))
    }

    /// Generate the next row for the given table.
    pub fn next_row(&mut self, table: &str) -> Result<GeneratedRow, GeneratorError> {
        let row = self.row_at(table, self.index)?;
        self.index += 1;
        Ok(row)
    }

    /// Generate multiple rows for the given table.
    ///
    /// Returns an iterator that lazily generates rows.
    pub fn rows(&mut self, table: &str, count: u64) -> Result<RowIterator<'_>, GeneratorError> {
        let table_schema = self
            .schema
            .get_table(table)
            .cloned()
            .ok_or_else(|| GeneratorError::TableNotFound(table.to_string()))?;

        debug!(table, start = self.index, count, "Generating rows");
        Ok(RowIterator {
            generator: self,
            table: table_schema,
            remaining: count,
        })
    }

    /// Get a reference to the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// Build row `index` of `table` from a fresh root.
fn build_row(seed: Seed, table: &TableSchema, index: u64) -> GeneratedRow {
    let root = Node::new(seed);
    let row = root.get(table.name.as_str()).get(index);

    let id = generate_value(&table.id.generator, &row.get(ID_KEY), index);
    let fields = generate_fields(&table.fields, &row, index);

    trace!(table = %table.name, index, row_seed = row.seed(), "Generated row");
    GeneratedRow::new(table.name.clone(), index, id, fields)
}

/// Iterator that lazily generates rows.
///
/// The table is resolved once when the iterator is created, so producing a
/// row cannot fail.
pub struct RowIterator<'a> {
    generator: &'a mut DataGenerator,
    table: TableSchema,
    remaining: u64,
}

impl Iterator for RowIterator<'_> {
    type Item = GeneratedRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;

        let row = build_row(self.generator.seed, &self.table, self.generator.index);
        self.generator.index += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowIterator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::GeneratedValue;

    fn test_schema() -> Schema {
        let yaml = r#"
version: 1
seed: 42

tables:
  - name: users
    id:
      generator:
        type: uuid_v4

    fields:
      - name: email
        generator:
          type: pattern
          pattern: "user_{index}@example.com"

      - name: age
        generator:
          type: int_range
          min: 18
          max: 80

      - name: is_active
        generator:
          type: weighted_bool
          true_weight: 0.8

      - name: tags
        generator:
          type: repeat
          min_count: 1
          max_count: 3
          element:
            type: object
            fields:
              - name: label
                generator:
                  type: one_of
                  values: [red, green, blue]
              - name: score
                generator:
                  type: float_range
                  min: 0.0
                  max: 1.0
"#;
        Schema::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_generate_single_row() {
        let mut generator = DataGenerator::new(test_schema(), 42);

        let row = generator.next_row("users").unwrap();

        assert_eq!(row.table, "users");
        assert_eq!(row.index, 0);
        assert!(matches!(row.id, GeneratedValue::Uuid(_)));
        assert_eq!(
            row.get_field("email"),
            Some(&GeneratedValue::String("user_0@example.com".to_string()))
        );

        let age = row.get_field("age").and_then(GeneratedValue::as_i64).unwrap();
        assert!((18..=80).contains(&age));

        let tags = row.get_field("tags").and_then(GeneratedValue::as_array).unwrap();
        assert!((1..=3).contains(&tags.len()));
        for tag in tags {
            let tag = tag.as_object().expect("Expected Object tag");
            assert!(tag.contains_key("label"));
            assert!(tag.contains_key("score"));
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let schema = test_schema();

        let mut gen1 = DataGenerator::new(schema.clone(), 42);
        let mut gen2 = DataGenerator::new(schema, 42);

        for _ in 0..20 {
            assert_eq!(gen1.next_row("users").unwrap(), gen2.next_row("users").unwrap());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let schema = test_schema();
        let a = DataGenerator::new(schema.clone(), 1).row_at("users", 0).unwrap();
        let b = DataGenerator::new(schema, 2).row_at("users", 0).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_generate_multiple_rows() {
        let mut generator = DataGenerator::new(test_schema(), 42);

        let rows: Vec<_> = generator.rows("users", 10).unwrap().collect();

        assert_eq!(rows.len(), 10);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.index, i as u64);
            let email = row.get_field("email").and_then(GeneratedValue::as_str).unwrap();
            assert!(email.contains(&format!("user_{i}")));
        }
        assert_eq!(generator.current_index(), 10);
    }

    #[test]
    fn test_rows_yields_exactly_count() {
        let mut generator = DataGenerator::new(test_schema(), 42).with_start_index(7);
        let expected: Vec<_> = (7..12)
            .map(|i| generator.row_at("users", i).unwrap())
            .collect();

        let iter = generator.rows("users", 5).unwrap();
        assert_eq!(iter.len(), 5);
        let rows: Vec<_> = iter.collect();

        assert_eq!(rows, expected);
        assert_eq!(generator.current_index(), 12);
        assert_eq!(generator.rows("users", 0).unwrap().count(), 0);
    }

    #[test]
    fn test_table_not_found() {
        let mut generator = DataGenerator::new(test_schema(), 42);

        let result = generator.next_row("nonexistent");
        assert!(matches!(result, Err(GeneratorError::TableNotFound(_))));
        assert!(matches!(
            generator.rows("nonexistent", 1),
            Err(GeneratorError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_with_start_index_matches_sequential() {
        let schema = test_schema();

        let mut sequential = DataGenerator::new(schema.clone(), 42);
        let rows: Vec<_> = sequential.rows("users", 10).unwrap().collect();

        let mut resumed = DataGenerator::new(schema, 42).with_start_index(5);
        let row = resumed.next_row("users").unwrap();
        assert_eq!(row.index, 5);
        assert_eq!(row, rows[5]);
    }

    #[test]
    fn test_row_at_is_repeatable() {
        let mut generator = DataGenerator::new(test_schema(), 42);

        // Dry run, then real generation over the same addresses
        let dry_run = generator.row_at("users", 3).unwrap();
        let rows: Vec<_> = generator.rows("users", 5).unwrap().collect();
        assert_eq!(rows[3], dry_run);
        assert_eq!(generator.row_at("users", 3).unwrap(), dry_run);

        // Far-away rows are addressed directly
        let far = generator.row_at("users", u64::MAX / 2).unwrap();
        assert_eq!(generator.row_at("users", u64::MAX / 2).unwrap(), far);
    }

    #[test]
    fn test_from_schema_uses_schema_seed() {
        let from_schema = DataGenerator::from_schema(test_schema());
        assert_eq!(from_schema.seed(), 42);

        let explicit = DataGenerator::new(test_schema(), 42);
        assert_eq!(
            from_schema.row_at("users", 0).unwrap(),
            explicit.row_at("users", 0).unwrap()
        );
    }

    #[test]
    fn test_current_index() {
        let mut generator = DataGenerator::new(test_schema(), 42);

        assert_eq!(generator.current_index(), 0);
        generator.next_row("users").unwrap();
        assert_eq!(generator.current_index(), 1);
        generator.next_row("users").unwrap();
        assert_eq!(generator.current_index(), 2);
    }
}
