//! orm-domain-codegen: Generate ORM domain classes from a relational schema
//!
//! This crate provides both a CLI tool and a library that turn a MySQL schema
//! file plus a small TOML description of relations into one domain class per
//! table for the `Yb` C++ ORM runtime:
//!
//! - `<Class>.h`: the class declaration with typed getters and setters, relation
//!   accessors, managed collections and constructors
//! - `<Class>.cpp`: constructor bodies applying column defaults, the static
//!   `find` and the factory registration bootstrap
//!
//! # Configuration
//!
//! ```toml
//! schema_file = "schema.sql"
//! output_dir = "src/domain"
//! table_prefix = "t_"
//!
//! [tables.t_order]
//! read_only = ["created_at"]
//!
//! [[relations]]
//! kind = "one-to-many"
//! one = { class = "Client", property = "orders" }
//! many = { class = "Order", property = "owner" }
//! ```
//!
//! # Programmatic usage
//!
//! ```rust,ignore
//! orm_domain_codegen::CodegenBuilder::new("schema.sql")
//!     .output_dir("src/domain")
//!     .table_prefix("t_")
//!     .relation("Client", Some("orders"), "Order", Some("owner"))
//!     .generate()
//!     .expect("Failed to generate domain classes");
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! orm-domain-codegen --config codegen.toml --output ./src/domain generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod schema;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use codegen::{DomainGenerator, EmitOptions};
pub use config::{CodegenConfig, RelationConfig, RelationSideConfig};
pub use error::{CodegenError, Result};
pub use schema::{RelationKind, Schema};

/// Main entry point for code generation
///
/// Returns the paths of the generated (or, in dry-run mode, planned) files.
pub fn generate(config: &CodegenConfig) -> Result<Vec<PathBuf>> {
    info!("Generation started, schema: {:?}", config.schema_file);
    let schema = schema::load_schema(config)?;
    info!(
        "Found {} tables and {} relations",
        schema.len(),
        schema.relations().len()
    );

    let filter = TableFilter::new(&config.include_tables, &config.exclude_tables);
    debug!(
        "Table filter: include={}, exclude={}",
        config.include_tables, config.exclude_tables
    );

    let generator = DomainGenerator::new(&schema, EmitOptions::from(config)).dry_run(config.dry_run);
    let files = generator.generate(&config.output_dir, |name| filter.accepts(name))?;

    info!("Generation successfully finished, {} files", files.len());
    Ok(files)
}

/// Table inclusion predicate built from include/exclude lists
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    include: Option<HashSet<String>>,
    exclude: HashSet<String>,
}

impl TableFilter {
    /// `include` and `exclude` are comma-separated; an empty or `*` include
    /// accepts every table
    pub fn new(include: &str, exclude: &str) -> Self {
        let include = match include.trim() {
            "" | "*" => None,
            list => Some(split_list(list)),
        };
        Self {
            include,
            exclude: split_list(exclude),
        }
    }

    pub fn accepts(&self, table_name: &str) -> bool {
        let included = self
            .include
            .as_ref()
            .map_or(true, |set| set.contains(table_name));
        included && !self.exclude.contains(table_name)
    }
}

fn split_list(list: &str) -> HashSet<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Builder pattern for easy configuration in build.rs
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given schema file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: CodegenConfig) -> Self {
        Self { config }
    }

    /// Set the output directory for generated files
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Prefix stripped from table names when deriving class names
    pub fn table_prefix(mut self, prefix: &str) -> Self {
        self.config.table_prefix = prefix.to_string();
        self
    }

    /// Set the namespace of the generated classes
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.config.namespace = namespace.to_string();
        self
    }

    /// Collapse repeated includes of the same foreign table
    pub fn dedup_includes(mut self) -> Self {
        self.config.dedup_includes = true;
        self
    }

    /// Add a one-to-many relation between two classes
    pub fn relation(
        mut self,
        one_class: &str,
        one_property: Option<&str>,
        many_class: &str,
        many_property: Option<&str>,
    ) -> Self {
        self.config.relations.push(RelationConfig {
            kind: RelationKind::OneToMany,
            one: RelationSideConfig {
                class: one_class.to_string(),
                property: one_property.map(str::to_string),
            },
            many: RelationSideConfig {
                class: many_class.to_string(),
                property: many_property.map(str::to_string),
            },
        });
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Generate the code
    pub fn generate(self) -> Result<Vec<PathBuf>> {
        generate(&self.config)
    }
}

/// Configuration for `[package.metadata.orm-domain-codegen]` in Cargo.toml
#[derive(Debug, Clone, Default, serde::Deserialize)]
struct CargoMetadataConfig {
    /// Path to the codegen TOML config (required)
    config_file: Option<String>,

    /// Output directory (optional, defaults to `$OUT_DIR/domain`)
    output_dir: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoToml {
    package: Option<CargoPackage>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackage {
    metadata: Option<CargoPackageMetadata>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackageMetadata {
    #[serde(rename = "orm-domain-codegen")]
    orm_domain_codegen: Option<CargoMetadataConfig>,
}

/// Generate code from `[package.metadata.orm-domain-codegen]` in Cargo.toml
///
/// ```rust,ignore
/// // build.rs
/// fn main() {
///     orm_domain_codegen::generate_from_cargo_metadata()
///         .expect("Failed to generate domain classes");
/// }
/// ```
///
/// Configure in Cargo.toml:
///
/// ```toml
/// [package.metadata.orm-domain-codegen]
/// config_file = "codegen.toml"
/// ```
pub fn generate_from_cargo_metadata() -> Result<Vec<PathBuf>> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map_err(|_| {
        CodegenError::ConfigError(
            "CARGO_MANIFEST_DIR not set - are you running from build.rs?".into(),
        )
    })?;

    let cargo_toml_path = PathBuf::from(&manifest_dir).join("Cargo.toml");
    let cargo_toml_content = std::fs::read_to_string(&cargo_toml_path)?;

    let cargo_toml: CargoToml = toml::from_str(&cargo_toml_content).map_err(|e| {
        CodegenError::ConfigError(format!(
            "Failed to parse {}: {}",
            cargo_toml_path.display(),
            e
        ))
    })?;

    let metadata_config = cargo_toml
        .package
        .and_then(|p| p.metadata)
        .and_then(|m| m.orm_domain_codegen)
        .ok_or_else(|| {
            CodegenError::ConfigError(
                "Missing [package.metadata.orm-domain-codegen] section in Cargo.toml".into(),
            )
        })?;

    let config_file = metadata_config.config_file.ok_or_else(|| {
        CodegenError::ConfigError(
            "config_file is required in [package.metadata.orm-domain-codegen]".into(),
        )
    })?;
    let config_path = PathBuf::from(&manifest_dir).join(&config_file);
    let mut config = CodegenConfig::from_file(&config_path)?;

    config.output_dir = match metadata_config.output_dir {
        Some(dir) => PathBuf::from(&manifest_dir).join(dir),
        None => std::env::var("OUT_DIR")
            .map(|dir| PathBuf::from(dir).join("domain"))
            .map_err(|_| {
                CodegenError::ConfigError("OUT_DIR not set - are you running from build.rs?".into())
            })?,
    };

    println!("cargo:rerun-if-changed={}", config_path.display());
    println!("cargo:rerun-if-changed={}", config.schema_file.display());
    println!("cargo:rerun-if-changed={}", cargo_toml_path.display());

    generate(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_filter() {
        let all = TableFilter::new("*", "");
        assert!(all.accepts("t_client"));

        let some = TableFilter::new("t_client, t_order", "t_order");
        assert!(some.accepts("t_client"));
        assert!(!some.accepts("t_order"));
        assert!(!some.accepts("t_note"));

        let empty = TableFilter::new("", "t_log");
        assert!(empty.accepts("t_client"));
        assert!(!empty.accepts("t_log"));
    }

    #[test]
    fn test_builder_generates_from_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(
            &schema,
            r#"
            CREATE TABLE t_client (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(100) NOT NULL
            );
            CREATE TABLE t_order (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                client_id BIGINT,
                FOREIGN KEY (client_id) REFERENCES t_client(id)
            );
            CREATE TABLE t_audit (
                message TEXT
            );
            "#,
        )
        .unwrap();
        let out = dir.path().join("domain");

        let files = CodegenBuilder::new(&schema)
            .output_dir(&out)
            .table_prefix("t_")
            .exclude_tables(&["t_audit"])
            .relation("Client", Some("orders"), "Order", Some("owner"))
            .generate()
            .unwrap();

        assert_eq!(files.len(), 4);
        assert!(!out.join("Audit.h").exists());

        let order = std::fs::read_to_string(out.join("Order.h")).unwrap();
        assert!(order.contains("#include \"domain/Client.h\""));
        assert!(order.contains("void set_owner(Client &owner__)"));
        assert!(order.contains("bool has_owner() const"));

        let client = std::fs::read_to_string(out.join("Client.h")).unwrap();
        assert!(client.contains("Yb::ManagedList<Order> orders_;"));
    }
}
