//! # Generator Module
//!
//! Turns a scanned source file into the generated companion code.
//!
//! ## Architecture
//!
//! The generator uses Askama templates to produce Rust code:
//!
//! ```text
//! Annotated Source → Scanner → Rule Compilation → Template Rendering → Output File
//! ```
//!
//! 1. **Compile** - Field tags become [`compile::StructValidator`] records
//!    with every Rust literal pre-rendered for the templates
//! 2. **Group** - Annotated methods are grouped per receiver and explicitly
//!    sorted so regeneration is byte-identical
//! 3. **Render** - Two independent Askama passes: dispatch wrappers
//!    (`templates/dispatch.rs.txt`) and validator functions
//!    (`templates/validator.rs.txt`)
//! 4. **Write** - Both passes are concatenated behind a fixed header and
//!    written with a single filesystem operation
//!
//! Any failure before the write aborts the run with no partial output.

mod compile;
mod emit;
mod templates;
#[cfg(test)]
mod tests;

pub use compile::{compile_struct, method_rule_lit, to_snake_case, CompiledField, StructValidator};
pub use emit::{generate, render_output};
pub use templates::{
    render_dispatchers, render_validators, ApiSurface, DispatchTemplateData, RouteData,
    ValidatorTemplateData,
};
