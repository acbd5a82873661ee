//! Default configuration values - single source of truth

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default output directory for generated domain classes
pub const OUTPUT_DIR: &str = "./generated/domain";

/// Prefix stripped from table names before deriving class names (none)
pub const TABLE_PREFIX: &str = "";

/// C++ namespace wrapping every generated class
pub const NAMESPACE: &str = "Domain";

/// Directory prefix used in `#include` directives between generated headers
pub const INCLUDE_PREFIX: &str = "domain/";

/// Number of spaces each tab expands to in generated text
pub const TAB_WIDTH: usize = 4;

/// Whether repeated foreign-key includes are collapsed into one
pub const DEDUP_INCLUDES: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
