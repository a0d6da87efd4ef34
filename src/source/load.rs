use anyhow::Context;
use std::path::Path;

/// Parse Rust source text into its ordered item list.
pub fn parse_source(text: &str) -> anyhow::Result<syn::File> {
    syn::parse_file(text).context("failed to parse source file")
}

/// Load and parse one annotated source file.
///
/// A missing or malformed file aborts the whole run; there is no recovery
/// path.
pub fn load_source(path: &Path) -> anyhow::Result<syn::File> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {path:?}"))?;
    parse_source(&text).with_context(|| format!("failed to parse source file {path:?}"))
}
