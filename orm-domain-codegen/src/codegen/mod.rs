//! Code generation module

mod code_generator;
mod context;
mod header_generator;
mod naming;
mod relations;
mod source_generator;
mod type_mapper;

pub use code_generator::*;
pub use context::*;
pub use header_generator::generate_header;
pub use naming::*;
pub use relations::*;
pub use source_generator::generate_source;
pub use type_mapper::*;

use crate::config::{defaults, CodegenConfig};

/// Settings that shape the emitted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Namespace wrapping every generated class
    pub namespace: String,

    /// Directory prefix for includes between generated headers
    pub include_prefix: String,

    /// Spaces per tab when the text is written out
    pub tab_width: usize,

    /// Emit one include per foreign table instead of one per foreign key column
    pub dedup_includes: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace: defaults::NAMESPACE.to_string(),
            include_prefix: defaults::INCLUDE_PREFIX.to_string(),
            tab_width: defaults::TAB_WIDTH,
            dedup_includes: defaults::DEDUP_INCLUDES,
        }
    }
}

impl From<&CodegenConfig> for EmitOptions {
    fn from(config: &CodegenConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            include_prefix: config.include_prefix.clone(),
            tab_width: config.tab_width,
            dedup_includes: config.dedup_includes,
        }
    }
}

/// Replace every tab with `width` spaces.
pub fn expand_tabs(text: &str, width: usize) -> String {
    let spaces = " ".repeat(width);
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\t' {
            out.push_str(&spaces);
        } else {
            out.push(ch);
        }
    }
    out
}
