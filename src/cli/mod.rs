//! # CLI Module
//!
//! Command-line interface for the `apigen` generator binary.
//!
//! ## Usage
//!
//! ```bash
//! apigen <source-path> <output-path>
//! ```
//!
//! Reads the annotated source file, runs both rendering passes, and writes
//! the generated companion code to the output path. The process exits
//! non-zero on any parse, annotation, or write error; zero only on full
//! success.

mod commands;


pub use commands::{run_cli, Cli};
