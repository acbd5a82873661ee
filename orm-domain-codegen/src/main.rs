//! CLI entry point for orm-domain-codegen

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use orm_domain_codegen::codegen::TableRelations;
use orm_domain_codegen::config::CodegenConfig;
use orm_domain_codegen::schema::{self, Schema};
use orm_domain_codegen::TableFilter;

#[derive(Parser)]
#[command(name = "orm-domain-codegen")]
#[command(about = "Generate ORM domain classes from a relational schema")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to SQL schema file (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate headers and sources for all selected tables
    Generate,
    /// Inspect schema (show resolved tables, keys and relations)
    Inspect,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("Exception: {:#}", e);
            error!("{}", message);
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // File (explicit, or ./orm-domain-codegen.toml if present) plus ORM_DOMAIN_CODEGEN__* variables
    let mut config = match CodegenConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // No configured level yet; still get the failure into the log
            init_logging(default_log_level());
            return Err(e.into());
        }
    };
    init_logging(config.log_level.as_deref().unwrap_or(default_log_level()));

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    config.validate()?;

    if let Some(Commands::Inspect) = &cli.command {
        return inspect_schema(&config);
    }

    let files = orm_domain_codegen::generate(&config)?;

    if config.dry_run {
        println!("Dry run mode - would generate:");
        for file in &files {
            println!("  {}", file.display());
        }
    }

    info!("Generation completed successfully");
    Ok(())
}

/// Debug for dev builds, info for release
fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// RUST_LOG wins over `log_level`
fn init_logging(log_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .try_init();
}

fn inspect_schema(config: &CodegenConfig) -> Result<()> {
    let schema = schema::load_schema(config)?;
    let filter = TableFilter::new(&config.include_tables, &config.exclude_tables);

    println!("Resolved {} tables:\n", schema.len());
    for table in schema.tables() {
        let generated = if filter.accepts(&table.name) {
            ""
        } else {
            " (skipped)"
        };
        println!("Table: {} -> class {}{}", table.name, table.class_name, generated);
        println!("  Key: {}", table.key_shape());
        println!("  Columns:");
        for col in &table.columns {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            let mut flags = Vec::new();
            if col.primary_key {
                flags.push("PK".to_string());
            }
            if col.read_only {
                flags.push("RO".to_string());
            }
            if let Some(target) = &col.foreign_key {
                flags.push(format!("FK -> {}", target));
            }
            println!(
                "    - {} ({}) {:?} {} {}",
                col.name,
                col.property,
                col.semantic_type,
                nullable,
                flags.join(", ")
            );
        }
        print_relations(&schema, table)?;
        println!();
    }

    Ok(())
}

fn print_relations(schema: &Schema, table: &schema::Table) -> Result<()> {
    let relations = TableRelations::resolve(schema, table)?;
    if relations.collections.is_empty() && relations.references.is_empty() {
        return Ok(());
    }
    println!("  Relations:");
    for collection in &relations.collections {
        println!(
            "    - {}: list of {} by {}",
            collection.property, collection.many_class, collection.fk_column.name
        );
    }
    for reference in &relations.references {
        let backref = reference
            .backref
            .map(|b| format!(" (backref {})", b))
            .unwrap_or_default();
        println!(
            "    - {}: {} by {}{}",
            reference.property, reference.one_class, reference.fk_column.name, backref
        );
    }
    Ok(())
}
