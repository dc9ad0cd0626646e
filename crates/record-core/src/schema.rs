//! Table definitions.
//!
//! A [`TableDefinition`] names a table, its ordered columns and its ordered
//! primary-key columns. A [`DatabaseSchema`] is a collection of definitions
//! looked up by table name, typically loaded from YAML:
//!
//! ```yaml
//! tables:
//!   - name: USERS
//!     columns: [ID, NAME, BALANCE]
//!     primary_keys: [ID]
//! ```

use crate::table::Table;
use crate::values::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Error type for schema and table construction.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Table declared without primary keys
    #[error("Table '{0}' has no primary key columns")]
    NoPrimaryKey(String),

    /// Primary key that is not one of the declared columns
    #[error("Primary key '{column}' is not a column of table '{table}'")]
    PrimaryKeyNotColumn { table: String, column: String },

    /// Table declared more than once
    #[error("Table '{0}' is declared more than once")]
    DuplicateTable(String),

    /// Column declared more than once
    #[error("Column '{column}' is declared twice in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// Row whose fields differ from the declared columns
    #[error("Row {row} of table '{table}' {detail}")]
    RowShape {
        table: String,
        row: usize,
        detail: String,
    },
}

/// Table definition: name, columns and primary keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name
    pub name: String,

    /// Column names in declaration order
    pub columns: Vec<String>,

    /// Primary key column names, a non-empty subset of `columns`
    pub primary_keys: Vec<String>,
}

impl TableDefinition {
    /// Create a new table definition.
    pub fn new<C, P>(name: impl Into<String>, columns: C, primary_keys: P) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            primary_keys: primary_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the definition's own invariants.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.primary_keys.is_empty() {
            return Err(SchemaError::NoPrimaryKey(self.name.clone()));
        }
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(column) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.clone(),
                });
            }
        }
        if let Some(pk) = self.primary_keys.iter().find(|pk| !self.columns.contains(*pk)) {
            return Err(SchemaError::PrimaryKeyNotColumn {
                table: self.name.clone(),
                column: pk.clone(),
            });
        }
        Ok(())
    }

    /// Check whether `name` is a primary key column.
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_keys.iter().any(|pk| pk == name)
    }

    /// Build a table of this shape from rows.
    pub fn table(&self, rows: Vec<Record>) -> Result<Table, SchemaError> {
        Table::from_definition(self.clone(), rows)
    }
}

/// Collection of table definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSchema {
    /// Table definitions
    #[serde(default)]
    pub tables: Vec<TableDefinition>,

    /// Cached table lookup (not serialized)
    #[serde(skip)]
    table_map: HashMap<String, usize>,
}

impl DatabaseSchema {
    /// Create a new database schema from a list of table definitions.
    pub fn new(tables: Vec<TableDefinition>) -> Result<Self, SchemaError> {
        let mut schema = Self {
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
        let schema: DatabaseSchema = serde_yaml::from_str(yaml)?;
        Self::new(schema.tables)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for (i, table) in self.tables.iter().enumerate() {
            table.validate()?;
            if self.tables[..i].iter().any(|t| t.name == table.name) {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
        }
        Ok(())
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

    /// Get a table definition by name.
    pub fn get_table(&self, name: &str) -> Option<&TableDefinition> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get a table definition by name, failing if absent.
    pub fn table(&self, name: &str) -> Result<&TableDefinition, SchemaError> {
        self.get_table(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// Get all table names in the schema.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Add a table to the schema, replacing any definition of the same name.
    pub fn add_table(&mut self, table: TableDefinition) -> Result<(), SchemaError> {
        table.validate()?;
        match self.table_map.get(&table.name) {
            Some(&idx) => self.tables[idx] = table,
            None => {
                self.table_map.insert(table.name.clone(), self.tables.len());
                self.tables.push(table);
            }
        }
        Ok(())
    }
}
