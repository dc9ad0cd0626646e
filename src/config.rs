//! Assertion configuration.
//!
//! A YAML document with comparison options and table definitions:
//!
//! ```yaml
//! options:
//!   trim_decimal_zeros: true
//!   null_display: "<NULL>"
//! tables:
//!   - name: USERS
//!     columns: [ID, NAME]
//!     primary_keys: [ID]
//! ```
//!
//! Both sections are optional.

use anyhow::{Context, Result};
use record_core::{DatabaseSchema, Record, Table, TableDefinition};
use record_verify::CompareOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the configuration file for [`AssertConfig::from_env`].
pub const CONFIG_ENV_VAR: &str = "RECORD_ASSERT_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssertConfig {
    #[serde(default)]
    pub options: CompareOptions,

    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

impl AssertConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        info!(
            "Loaded assertion config from {} ({} tables)",
            path.display(),
            config.tables.len()
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AssertConfig =
            serde_yaml::from_str(yaml).context("Failed to parse assertion config")?;
        config.schema()?;
        Ok(config)
    }

    /// Load configuration from the file named by `RECORD_ASSERT_CONFIG`, or
    /// defaults when the variable is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(CONFIG_ENV_VAR)
    }

    fn from_env_var(key: &str) -> Result<Self> {
        match std::env::var_os(key) {
            Some(path) => Self::from_file(path),
            None => {
                debug!("{} not set, using default assertion config", key);
                Ok(Self::default())
            }
        }
    }

    /// The configured table definitions as a validated schema.
    pub fn schema(&self) -> Result<DatabaseSchema> {
        DatabaseSchema::new(self.tables.clone()).context("Invalid table definitions")
    }

    /// Build a table from rows using the configured definition for `name`.
    pub fn table(&self, name: &str, rows: Vec<Record>) -> Result<Table> {
        let schema = self.schema()?;
        let definition = schema.table(name)?;
        definition
            .table(rows)
            .with_context(|| format!("Rows do not fit table {name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
options:
  null_display: "<NULL>"
tables:
  - name: USERS
    columns: [ID, NAME]
    primary_keys: [ID]
"#;

    #[test]
    fn test_from_yaml() {
        let config = AssertConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.options.null_display, "<NULL>");
        assert!(config.options.normalize.trim_decimal_zeros);
        assert_eq!(config.tables.len(), 1);
        assert_eq!(config.schema().unwrap().table_names(), vec!["USERS"]);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AssertConfig::from_yaml("{}").unwrap();
        assert_eq!(config.options, CompareOptions::default());
        assert!(config.tables.is_empty());
    }

    #[test]
    fn test_invalid_table_definition_is_rejected() {
        let yaml = "tables:\n  - name: T\n    columns: [A]\n    primary_keys: [B]\n";
        let err = AssertConfig::from_yaml(yaml).unwrap_err();
        assert!(format!("{err:#}").contains("Primary key 'B' is not a column of table 'T'"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();
        let config = AssertConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tables[0].primary_keys, vec!["ID"]);
    }

    #[test]
    fn test_from_missing_file() {
        let err = AssertConfig::from_file("/nonexistent/record-assert.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_from_env_var() {
        assert!(AssertConfig::from_env_var("RECORD_ASSERT_CONFIG_UNSET_FOR_TEST")
            .unwrap()
            .tables
            .is_empty());

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();
        let key = "RECORD_ASSERT_CONFIG_FOR_TEST";
        std::env::set_var(key, file.path());
        let config = AssertConfig::from_env_var(key).unwrap();
        std::env::remove_var(key);
        assert_eq!(config.options.null_display, "<NULL>");
    }

    #[test]
    fn test_table_from_config() {
        let config = AssertConfig::from_yaml(YAML).unwrap();
        let row = Record::builder().field("ID", 1).field("NAME", "a").build();
        let table = config.table("USERS", vec![row]).unwrap();
        assert_eq!(table.pk_values(0), "ID=1");

        assert!(config.table("ORDERS", vec![]).is_err());
    }
}
