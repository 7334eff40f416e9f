//! Generator schema loaded from YAML.
//!
//! A schema lists tables; each table has an id generator and a list of field
//! generators. Fields may nest (`object`) and repeat (`repeat`), which maps
//! one to one onto the address space of the random tree:
//!
//! ```text
//! root ─ <table> ─ <row index> ─┬─ "id"
//!                               ├─ <field>
//!                               └─ <object field> ─ <sub field>
//!                               └─ <repeat field> ─┬─ "count"
//!                                                  └─ "items" ─ 0, 1, 2, ...
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::generators::timestamp::parse_timestamp;

/// Key under a row node that the id generator draws from.
pub const ID_KEY: &str = "id";

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Schema parsed but describes something that cannot be generated
    #[error("Invalid schema at '{location}': {reason}")]
    Invalid { location: String, reason: String },
}

impl SchemaError {
    fn invalid(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Generator Types
// ============================================================================

/// Generator configuration for a field.
///
/// This enum defines the different types of value generators available
/// for producing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Generate UUIDs (v4 layout, bytes drawn from the field's stream)
    UuidV4,

    /// Generate sequential integers
    Sequential {
        /// Starting value
        #[serde(default)]
        start: i64,
    },

    /// Generate values using a pattern with placeholders
    Pattern {
        /// Pattern string (supports {index}, {uuid}, {rand:N})
        pattern: String,
    },

    /// Generate random integers in a range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Generate random floats in a range
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate timestamps in a range
    TimestampRange {
        /// Start timestamp (RFC 3339 or YYYY-MM-DD)
        start: String,
        /// End timestamp (RFC 3339 or YYYY-MM-DD)
        end: String,
    },

    /// Generate weighted boolean values
    WeightedBool {
        /// Weight for true value (0.0 to 1.0)
        true_weight: f64,
    },

    /// Generate random selection from a pool of values
    OneOf {
        /// Pool of values to select from
        values: Vec<serde_yaml::Value>,
    },

    /// Generate arrays by sampling from a pool
    SampleArray {
        /// Pool of values to sample from
        pool: Vec<String>,
        /// Minimum array length
        #[serde(default)]
        min_length: usize,
        /// Maximum array length
        max_length: usize,
    },

    /// Generate a variable number of sub-values, each from its own node
    Repeat {
        /// Minimum number of elements
        #[serde(default)]
        min_count: usize,
        /// Maximum number of elements
        max_count: usize,
        /// Generator for every element
        element: Box<GeneratorConfig>,
    },

    /// Generate a nested record
    Object {
        /// Fields of the nested record
        fields: Vec<FieldSchema>,
    },

    /// Static value
    Static {
        /// The value to emit
        value: serde_yaml::Value,
    },

    /// Null value
    Null,
}

/// Field with generator config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name, also the key of the field's node under its record
    pub name: String,

    /// Generator configuration
    pub generator: GeneratorConfig,
}

/// Primary key with generator config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdField {
    /// Generator configuration for the primary key
    pub generator: GeneratorConfig,
}

/// Table with generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,

    /// Primary key definition with generator
    pub id: IdField,

    /// Field definitions with generators
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl TableSchema {
    /// Get a field schema by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

fn default_version() -> u32 {
    1
}

/// Full schema with generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Root seed used when none is given on the command line
    #[serde(default)]
    pub seed: Option<u64>,

    /// Table definitions with generators
    pub tables: Vec<TableSchema>,

    /// Cached table lookup (not serialized)
    #[serde(skip)]
    table_map: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from table definitions.
    pub fn new(seed: Option<u64>, tables: Vec<TableSchema>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            version: default_version(),
            seed,
            tables,
            table_map: HashMap::new(),
        };
        schema.validate()?;
        schema.build_table_map();
        Ok(schema)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: Schema = serde_yaml::from_str(yaml)?;
        schema.validate()?;
        schema.build_table_map();
        Ok(schema)
    }

    /// Build the internal table lookup map.
    fn build_table_map(&mut self) {
        self.table_map = self
            .tables
            .iter()
            .enumerate()
            .map(|(idx, table)| (table.name.clone(), idx))
            .collect();
    }

    /// Get a table schema by name.
    pub fn get_table(&self, name: &str) -> Option<&TableSchema> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get all table names in the schema.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Check that every generator can actually produce values.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(SchemaError::invalid(&table.name, "duplicate table name"));
            }
            validate_generator(&format!("{}.id", table.name), &table.id.generator)?;
            if table.fields.iter().any(|f| f.name == ID_KEY) {
                return Err(SchemaError::invalid(
                    &table.name,
                    "field name 'id' is reserved for the primary key",
                ));
            }
            validate_fields(&table.name, &table.fields)?;
        }
        Ok(())
    }
}

fn validate_fields(location: &str, fields: &[FieldSchema]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in fields {
        let field_location = format!("{location}.{}", field.name);
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::invalid(field_location, "duplicate field name"));
        }
        validate_generator(&field_location, &field.generator)?;
    }
    Ok(())
}

fn validate_generator(location: &str, config: &GeneratorConfig) -> Result<(), SchemaError> {
    match config {
        GeneratorConfig::IntRange { min, max } if min > max => Err(SchemaError::invalid(
            location,
            format!("int_range min {min} is greater than max {max}"),
        )),
        GeneratorConfig::FloatRange { min, max } => {
            if !min.is_finite() || !max.is_finite() {
                return Err(SchemaError::invalid(
                    location,
                    format!("float_range bounds must be finite, got {min} and {max}"),
                ));
            }
            if min > max {
                return Err(SchemaError::invalid(
                    location,
                    format!("float_range min {min} is greater than max {max}"),
                ));
            }
            if !(max - min).is_finite() {
                return Err(SchemaError::invalid(
                    location,
                    format!("float_range span from {min} to {max} overflows"),
                ));
            }
            Ok(())
        }
        GeneratorConfig::WeightedBool { true_weight } if !(0.0..=1.0).contains(true_weight) => {
            Err(SchemaError::invalid(
                location,
                format!("weighted_bool true_weight {true_weight} is outside [0, 1]"),
            ))
        }
        GeneratorConfig::SampleArray {
            min_length,
            max_length,
            ..
        } if min_length > max_length => Err(SchemaError::invalid(
            location,
            format!("sample_array min_length {min_length} is greater than max_length {max_length}"),
        )),
        GeneratorConfig::TimestampRange { start, end } => {
            for bound in [start, end] {
                if parse_timestamp(bound).is_none() {
                    return Err(SchemaError::invalid(
                        location,
                        format!("unparseable timestamp '{bound}'"),
                    ));
                }
            }
            Ok(())
        }
        GeneratorConfig::Repeat {
            min_count,
            max_count,
            element,
        } => {
            if min_count > max_count {
                return Err(SchemaError::invalid(
                    location,
                    format!("repeat min_count {min_count} is greater than max_count {max_count}"),
                ));
            }
            validate_generator(&format!("{location}[]"), element)
        }
        GeneratorConfig::Object { fields } => validate_fields(location, fields),
        _ => Ok(()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
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

      - name: address
        generator:
          type: object
          fields:
            - name: zip
              generator:
                type: pattern
                pattern: "{rand:5}"

      - name: orders
        generator:
          type: repeat
          max_count: 4
          element:
            type: float_range
            min: 1.0
            max: 500.0

  - name: products
    id:
      generator:
        type: sequential
        start: 1000
"#;

    #[test]
    fn test_parse_schema() {
        let schema = Schema::from_yaml(SCHEMA).unwrap();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.seed, Some(42));
        assert_eq!(schema.table_names(), vec!["users", "products"]);

        let users = schema.get_table("users").unwrap();
        assert_eq!(users.field_names(), vec!["email", "age", "address", "orders"]);
        assert!(matches!(users.id.generator, GeneratorConfig::UuidV4));

        match &users.get_field("orders").unwrap().generator {
            GeneratorConfig::Repeat {
                min_count,
                max_count,
                element,
            } => {
                assert_eq!(*min_count, 0);
                assert_eq!(*max_count, 4);
                assert!(matches!(**element, GeneratorConfig::FloatRange { .. }));
            }
            other => panic!("Expected Repeat, got {other:?}"),
        }

        let products = schema.get_table("products").unwrap();
        assert!(products.fields.is_empty());
        assert!(schema.get_table("missing").is_none());
    }

    #[test]
    fn test_seed_is_optional() {
        let schema = Schema::from_yaml(
            r#"
tables:
  - name: t
    id:
      generator:
        type: "null"
"#,
        )
        .unwrap();
        assert_eq!(schema.seed, None);
        assert_eq!(schema.version, 1);
    }

    fn invalid_field(generator: &str) -> SchemaError {
        let yaml = format!(
            r#"
tables:
  - name: t
    id:
      generator:
        type: "null"
    fields:
      - name: f
        generator:
{generator}
"#
        );
        Schema::from_yaml(&yaml).unwrap_err()
    }

    #[test]
    fn test_rejects_inverted_int_range() {
        let err = invalid_field("          type: int_range\n          min: 5\n          max: 1");
        match err {
            SchemaError::Invalid { location, .. } => assert_eq!(location, "t.f"),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_finite_float_range() {
        for bounds in [
            "min: 0.0\n          max: .inf",
            "min: -.inf\n          max: 1.0",
            "min: .nan\n          max: 1.0",
            "min: -1.0e308\n          max: 1.0e308",
        ] {
            let err = invalid_field(&format!("          type: float_range\n          {bounds}"));
            match err {
                SchemaError::Invalid { location, .. } => assert_eq!(location, "t.f"),
                other => panic!("Expected Invalid for {bounds}, got {other:?}"),
            }
        }

        let accepted = Schema::from_yaml(
            "tables:\n  - name: t\n    id:\n      generator:\n        type: float_range\n        min: -1.0e300\n        max: 1.0e300\n",
        );
        assert!(accepted.is_ok());
    }

    #[test]
    fn test_rejects_bad_weight() {
        let err = invalid_field("          type: weighted_bool\n          true_weight: 1.5");
        assert!(matches!(err, SchemaError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        let err = invalid_field(
            "          type: timestamp_range\n          start: yesterday\n          end: 2024-01-01",
        );
        assert!(matches!(err, SchemaError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_nested_inverted_repeat() {
        let err = invalid_field(
            "          type: object\n          fields:\n            - name: inner\n              generator:\n                type: repeat\n                min_count: 3\n                max_count: 1\n                element:\n                  type: \"null\"",
        );
        match err {
            SchemaError::Invalid { location, .. } => assert_eq!(location, "t.f.inner"),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_reserved_and_duplicate_names() {
        let reserved = Schema::new(
            None,
            vec![TableSchema {
                name: "t".to_string(),
                id: IdField {
                    generator: GeneratorConfig::Null,
                },
                fields: vec![FieldSchema {
                    name: "id".to_string(),
                    generator: GeneratorConfig::Null,
                }],
            }],
        );
        assert!(matches!(reserved, Err(SchemaError::Invalid { .. })));

        let table = TableSchema {
            name: "t".to_string(),
            id: IdField {
                generator: GeneratorConfig::Null,
            },
            fields: vec![],
        };
        let duplicate = Schema::new(None, vec![table.clone(), table]);
        assert!(matches!(duplicate, Err(SchemaError::Invalid { .. })));
    }

    #[test]
    fn test_yaml_error() {
        let err = Schema::from_yaml("tables: [").unwrap_err();
        assert!(matches!(err, SchemaError::YamlError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Schema::from_file("/nonexistent/schema.yaml").unwrap_err();
        assert!(matches!(err, SchemaError::IoError(_)));
    }
}
