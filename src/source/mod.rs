//! # Source Module
//!
//! Loads the annotated Rust source file and scans its declarations.
//!
//! The loader parses the target file with `syn` into an ordered item list.
//! The scanner walks that list and classifies each item as an annotated
//! method (doc comment carrying the `apigen:api` marker on an inherent
//! method), an annotated type (struct with at least one `apivalidator`
//! field), or irrelevant. Annotated methods have their payload parsed into
//! route metadata on the spot; tagged fields keep their raw tag text for the
//! generator's compile step.

mod load;
mod scan;
mod types;

pub use load::{load_source, parse_source};
pub use scan::{scan_file, ScanOutcome, API_MARKER, VALIDATOR_ATTR};
pub use types::{AnnotatedMethod, MethodAnnotation, RawField, TaggedStruct};
