//! `oas2tf schemas`.

use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use crate::cli::run_command;
use crate::document::Document;

/// Arguments of `oas2tf schemas`.
#[derive(Args, Debug, Clone)]
pub struct SchemasArgs {
    /// OpenAPI document (JSON, or YAML by extension)
    #[arg(long, short, value_name = "DOCUMENT")]
    pub input: PathBuf,
}

/// List component schema names, one per line, in document order.
pub fn run(args: SchemasArgs) -> i32 {
    run_command(|| {
        let document = Document::load(&args.input)?;
        let mut stdout = std::io::stdout().lock();
        for name in document.schemas().into_iter().flat_map(|s| s.keys()) {
            writeln!(stdout, "{name}").map_err(|e| format!("Failed to write output: {e}"))?;
        }
        Ok(())
    })
}
