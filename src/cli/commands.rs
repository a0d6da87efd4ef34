use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for the apigen code generator
///
/// One invocation performs one full generation run: load, scan, compile,
/// render, write.
#[derive(Parser)]
#[command(name = "apigen")]
#[command(
    about = "Generate HTTP dispatchers and request validators from annotated Rust source",
    long_about = None
)]
pub struct Cli {
    /// Path to the annotated Rust source file
    pub source: PathBuf,

    /// Path the generated code is written to
    pub output: PathBuf,
}

/// Execute the generator with the arguments provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The source file cannot be read or parsed
/// - An annotation payload or validator tag is malformed
/// - A template fails to render
/// - The output file cannot be written
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    crate::generator::generate(&cli.source, &cli.output)
}
