//! `oas2tf lower`: one component schema to provider attribute JSON.

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use oas2tf_core::{
    Attribute, Target, build_data_source_attributes, build_resource_attributes,
};

use crate::cli::run_command;
use crate::config::Config;
use crate::document::Document;

/// Provider schema kind to generate.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetArg {
    /// Managed resource
    #[default]
    Resource,
    /// Data source
    DataSource,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Resource => Target::Resource,
            TargetArg::DataSource => Target::DataSource,
        }
    }
}

/// Arguments of `oas2tf lower`.
#[derive(Args, Debug, Clone)]
pub struct LowerArgs {
    /// OpenAPI document (JSON, or YAML by extension)
    #[arg(long, short, value_name = "DOCUMENT")]
    pub input: PathBuf,
    /// Name of the schema under components.schemas
    #[arg(long, short, value_name = "NAME")]
    pub schema: String,
    /// Provider schema kind
    #[arg(long, short, value_enum, default_value_t = TargetArg::Resource)]
    pub target: TargetArg,
    /// Config file (defaults to ./oas2tf.toml when present)
    #[arg(long, short, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
    /// Write JSON here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Lowered schema as written by the command.
#[derive(Debug, Serialize)]
pub struct LowerOutput {
    /// Component schema name.
    pub schema: String,
    /// Provider schema kind.
    pub target: Target,
    /// Top level attributes in declaration order.
    pub attributes: Vec<Attribute>,
}

/// Lower a schema and print or write the JSON result.
pub fn run(args: LowerArgs) -> i32 {
    run_command(|| {
        let output = lower(&args)?;
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("Failed to serialize attributes: {e}"))?;

        match &args.output {
            Some(path) => fs::write(path, json + "\n")
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?,
            None => println!("{json}"),
        }
        Ok(())
    })
}

/// Load the document and config named by `args` and lower the schema.
pub fn lower(args: &LowerArgs) -> Result<LowerOutput, String> {
    let document = Document::load(&args.input)?;
    let config = Config::load(args.config.as_deref())?;
    let schema = document.schema(&args.schema)?;
    let target = Target::from(args.target);

    let attributes = match target {
        Target::Resource => build_resource_attributes(schema, &config.lowering),
        Target::DataSource => build_data_source_attributes(schema, &config.lowering),
    }
    .map_err(|e| format!("Failed to lower schema '{}': {e}", args.schema))?;

    info!(
        schema = %args.schema,
        kind = target.as_str(),
        attributes = attributes.len(),
        "Lowered schema."
    );

    Ok(LowerOutput {
        schema: args.schema.clone(),
        target,
        attributes,
    })
}
