//! Tables: a named, keyed collection of rows.

use crate::normalize::{NormalizeOptions, NULL_DISPLAY};
use crate::schema::{SchemaError, TableDefinition};
use crate::values::{Record, Value};

/// A named collection of rows sharing one set of columns.
///
/// Every row carries exactly the declared columns. Primary key values are
/// expected to be unique on the expected side of a comparison, but that is
/// not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    definition: TableDefinition,
    rows: Vec<Record>,
}

impl Table {
    /// Create a table, validating its definition and row shapes.
    pub fn new<C, P>(
        name: impl Into<String>,
        columns: C,
        primary_keys: P,
        rows: Vec<Record>,
    ) -> Result<Self, SchemaError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::from_definition(TableDefinition::new(name, columns, primary_keys), rows)
    }

    /// Create a table from an existing definition.
    pub fn from_definition(
        definition: TableDefinition,
        rows: Vec<Record>,
    ) -> Result<Self, SchemaError> {
        definition.validate()?;
        for (idx, row) in rows.iter().enumerate() {
            check_row_shape(&definition, idx, row)?;
        }
        Ok(Self { definition, rows })
    }

    /// A table with the same definition holding different rows.
    ///
    /// Used to pair an expected table with the rows read back from a store.
    pub fn with_rows(&self, rows: Vec<Record>) -> Result<Self, SchemaError> {
        Self::from_definition(self.definition.clone(), rows)
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.definition.columns
    }

    /// Primary key column names in declaration order.
    pub fn primary_keys(&self) -> &[String] {
        &self.definition.primary_keys
    }

    /// The table's definition.
    pub fn definition(&self) -> &TableDefinition {
        &self.definition
    }

    /// All rows.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.rows[row].value(column)
    }

    /// Render the primary key of row `row` as `PK1=v1,PK2=v2`.
    pub fn pk_values(&self, row: usize) -> String {
        self.pk_values_with(row, &NormalizeOptions::default(), NULL_DISPLAY)
    }

    /// [`Table::pk_values`] with values normalized under `options` and
    /// nulls shown as `null_display`.
    pub fn pk_values_with(
        &self,
        row: usize,
        options: &NormalizeOptions,
        null_display: &str,
    ) -> String {
        self.primary_keys()
            .iter()
            .map(|pk| {
                let shown = options
                    .normalize(self.value(row, pk))
                    .display_with(null_display);
                format!("{pk}={shown}")
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn check_row_shape(
    definition: &TableDefinition,
    idx: usize,
    row: &Record,
) -> Result<(), SchemaError> {
    let shape_error = |detail: String| SchemaError::RowShape {
        table: definition.name.clone(),
        row: idx + 1,
        detail,
    };

    if let Some(missing) = definition.columns.iter().find(|c| !row.contains_field(c)) {
        return Err(shape_error(format!("is missing column '{missing}'")));
    }
    if let Some(extra) = row
        .field_names()
        .find(|name| !definition.columns.iter().any(|c| c == *name))
    {
        return Err(shape_error(format!("has undeclared column '{extra}'")));
    }
    Ok(())
}
