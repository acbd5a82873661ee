//! Configuration for orm-domain-codegen

pub mod defaults;
mod settings;

pub use settings::*;
