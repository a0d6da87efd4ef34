//! # apigen
//!
//! **apigen** is a build-time code generator: it reads one annotated Rust
//! source file, scans its declarations, and emits companion code wiring
//! hand-written business logic into HTTP dispatch with request validation.
//!
//! ## Overview
//!
//! Two annotation kinds drive generation:
//!
//! - a doc comment `apigen:api {"url": ..., "auth": ..., "method": ...}` on
//!   an inherent method marks it for dispatch generation; all annotated
//!   methods of one receiver type form one API surface with one generated
//!   `serve_http` entry point
//! - an `#[apivalidator("required, min=10, ...")]` attribute on a struct
//!   field compiles into a validation rule; each tagged struct gets one
//!   generated `validate_*` function returning the populated struct or the
//!   first failing rule's message
//!
//! ## Architecture
//!
//! The library is organized into these modules:
//!
//! - **[`source`]** - Source loading (`syn`) and annotation scanning
//! - **[`generator`]** - Rule compilation and Askama template rendering
//! - **[`dispatcher`]** - Runtime request envelope and dispatch sequence
//!   consumed by generated wrappers
//! - **[`validator`]** - Rule records and their pure request-time evaluation
//! - **[`cli`]** - The `apigen <source> <output>` command line
//!
//! The generation pipeline is strictly sequential and batch:
//!
//! ```text
//! Source File → Scanner → Rule Compilation → Template Rendering → Output File
//! ```
//!
//! Any fatal error aborts the run before the output file is written. The
//! generated wrappers are re-entrant and free of shared mutable state, so a
//! host may serve them concurrently.

pub mod cli;
pub mod dispatcher;
pub mod generator;
pub mod source;
pub mod validator;

pub use generator::generate;
