//! Configuration settings for orm-domain-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};
use crate::schema::RelationKind;

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the SQL schema file
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Output directory for generated headers and sources
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Tables to generate (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to skip (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Prefix stripped from table names when deriving class names (e.g. "t_")
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// Namespace wrapping the generated classes
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Directory prefix for includes between generated headers
    #[serde(default = "default_include_prefix")]
    pub include_prefix: String,

    /// Spaces per tab in generated text
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Collapse repeated includes of the same foreign table
    #[serde(default = "default_dedup_includes")]
    pub dedup_includes: bool,

    /// Dry run mode - render everything but write nothing
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,

    /// Per-table overrides keyed by physical table name
    #[serde(default)]
    pub tables: BTreeMap<String, TableOverride>,

    /// Named relations between classes
    #[serde(default)]
    pub relations: Vec<RelationConfig>,
}

/// Per-table settings that cannot be derived from DDL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOverride {
    /// Generated class name (defaults to the PascalCase table name)
    #[serde(default)]
    pub class_name: Option<String>,

    /// Columns without a generated setter
    #[serde(default)]
    pub read_only: Vec<String>,

    /// Accessor names keyed by column name
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// A relation between two classes as written in the config file
///
/// ```toml
/// [[relations]]
/// kind = "one-to-many"
/// one = { class = "Client", property = "orders" }
/// many = { class = "Order", property = "owner" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationConfig {
    #[serde(default)]
    pub kind: RelationKind,

    /// The parent side (owns the collection)
    pub one: RelationSideConfig,

    /// The child side (owns the foreign key)
    pub many: RelationSideConfig,
}

/// One side of a configured relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSideConfig {
    pub class: String,

    #[serde(default)]
    pub property: Option<String>,
}

// Default value functions for serde
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_table_prefix() -> String {
    defaults::TABLE_PREFIX.to_string()
}
fn default_namespace() -> String {
    defaults::NAMESPACE.to_string()
}
fn default_include_prefix() -> String {
    defaults::INCLUDE_PREFIX.to_string()
}
fn default_tab_width() -> usize {
    defaults::TAB_WIDTH
}
fn default_dedup_includes() -> bool {
    defaults::DEDUP_INCLUDES
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            output_dir: default_output_dir(),
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            table_prefix: default_table_prefix(),
            namespace: default_namespace(),
            include_prefix: default_include_prefix(),
            tab_width: default_tab_width(),
            dedup_includes: default_dedup_includes(),
            dry_run: default_dry_run(),
            log_level: None,
            tables: BTreeMap::new(),
            relations: Vec::new(),
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    ///
    /// A relative `schema_file` is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.resolve_schema_path(path);
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("orm-domain-codegen").required(false));
        }

        // Override with environment variables (ORM_DOMAIN_CODEGEN__*)
        builder = builder.add_source(Environment::with_prefix("ORM_DOMAIN_CODEGEN").separator("__"));

        let mut config: CodegenConfig = builder.build()?.try_deserialize()?;
        if let Some(path) = config_path {
            config.resolve_schema_path(path);
        }

        Ok(config)
    }

    /// Make a relative `schema_file` relative to the config file's directory
    fn resolve_schema_path(&mut self, config_path: &Path) {
        if self.schema_file.is_relative() && !self.schema_file.as_os_str().is_empty() {
            if let Some(dir) = config_path.parent() {
                self.schema_file = dir.join(&self.schema_file);
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if !self.schema_file.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        if self.namespace.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "namespace must not be empty".into(),
            ));
        }

        if self.tab_width == 0 {
            return Err(CodegenError::ValidationError(
                "tab_width must be at least 1".into(),
            ));
        }

        for relation in &self.relations {
            for side in [&relation.one, &relation.many] {
                if side.class.trim().is_empty() {
                    return Err(CodegenError::ValidationError(
                        "relation side is missing a class name".into(),
                    ));
                }
            }
        }

        Ok(())
    }
}
