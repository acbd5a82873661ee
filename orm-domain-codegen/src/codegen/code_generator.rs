//! Main code generator orchestrator

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::context::TableContext;
use super::header_generator::generate_header;
use super::naming::{header_file_name, source_file_name};
use super::source_generator::generate_source;
use super::{expand_tabs, EmitOptions};
use crate::error::Result;
use crate::schema::{Schema, Table};

/// Drives generation of both artifacts for every selected table
pub struct DomainGenerator<'a> {
    schema: &'a Schema,
    options: EmitOptions,
    dry_run: bool,
}

impl<'a> DomainGenerator<'a> {
    pub fn new(schema: &'a Schema, options: EmitOptions) -> Self {
        Self {
            schema,
            options,
            dry_run: false,
        }
    }

    /// Render everything but write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Generate `<Class>.h` and `<Class>.cpp` for every table accepted by
    /// `accepts`, in physical-name order.
    ///
    /// Stops at the first failure; files already written are left in place.
    /// Returns the paths of the artifacts produced.
    pub fn generate<F>(&self, output_dir: &Path, accepts: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(&str) -> bool,
    {
        if !self.dry_run {
            fs::create_dir_all(output_dir)?;
        }

        let mut written = Vec::new();
        for table in self.schema.tables() {
            if !accepts(&table.name) {
                debug!("Skipping table '{}'", table.name);
                continue;
            }
            written.extend(self.generate_table(table, output_dir)?);
        }

        Ok(written)
    }

    /// Header first, then source
    fn generate_table(&self, table: &Table, output_dir: &Path) -> Result<[PathBuf; 2]> {
        let ctx = TableContext::new(self.schema, table, &self.options)?;
        debug!("Table '{}' key shape: {}", table.name, ctx.key);

        let header_path = output_dir.join(header_file_name(&table.class_name));
        info!(
            "Generating file: {} for table '{}'",
            header_path.display(),
            table.name
        );
        let header = generate_header(&ctx)?;
        self.write(&header_path, &header)?;

        let source_path = output_dir.join(source_file_name(&table.class_name));
        info!(
            "Generating cpp file: {} for table '{}'",
            source_path.display(),
            table.name
        );
        let source = generate_source(&ctx)?;
        self.write(&source_path, &source)?;

        Ok([header_path, source_path])
    }

    fn write(&self, path: &Path, text: &str) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        fs::write(path, expand_tabs(text, self.options.tab_width))?;
        Ok(())
    }

    /// Render a table's header with tabs expanded, without touching disk
    pub fn render_header(&self, table: &Table) -> Result<String> {
        let ctx = TableContext::new(self.schema, table, &self.options)?;
        Ok(expand_tabs(&generate_header(&ctx)?, self.options.tab_width))
    }

    /// Render a table's source with tabs expanded, without touching disk
    pub fn render_source(&self, table: &Table) -> Result<String> {
        let ctx = TableContext::new(self.schema, table, &self.options)?;
        Ok(expand_tabs(&generate_source(&ctx)?, self.options.tab_width))
    }
}
