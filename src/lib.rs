//! cql2cfn: converts CQL schema scripts into CloudFormation templates
//!
//! This library reads a script of USE / CREATE KEYSPACE / CREATE TABLE
//! statements and maps them onto `AWS::Cassandra::Keyspace` and
//! `AWS::Cassandra::Table` resources for Amazon Keyspaces.

pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod template;

use std::path::PathBuf;

use tracing::info;

pub use error::ConvertError;
use generator::{Generator, GeneratorOptions};

/// Options for converting a script file
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Path to the CQL script
    pub input_path: PathBuf,
    /// Output path for the template (stdout when absent)
    pub output_path: Option<PathBuf>,
    /// Enable debug logging
    pub debug: bool,
    /// Treat warnings as errors
    pub strict: bool,
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Rendered JSON template
    pub template: String,
    /// Warnings reported while mapping statements
    pub warnings: Vec<String>,
}

/// Convert a CQL script into a CloudFormation template
pub fn convert(script: &str, options: GeneratorOptions) -> Result<Conversion, ConvertError> {
    // Step 1: Parse the script
    let statements = parser::parse_script(script)?;

    // Step 2: Map every statement, in order
    let mut generator = Generator::new(options);
    for statement in &statements {
        generator.handle(statement)?;
    }

    // Step 3: Render the template
    let template = generator.generate()?;
    Ok(Conversion {
        template,
        warnings: generator.into_warnings(),
    })
}

/// Convert a script file, writing the template when an output path is given
pub fn convert_file(options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    info!("Converting CQL script: {}", options.input_path.display());

    let script = parser::read_script_file(&options.input_path)?;
    let conversion = convert(
        &script,
        GeneratorOptions {
            strict: options.strict,
        },
    )?;

    if let Some(output_path) = &options.output_path {
        std::fs::write(output_path, format!("{}\n", conversion.template)).map_err(|source| {
            ConvertError::TemplateWrite {
                path: output_path.clone(),
                source,
            }
        })?;
        info!("Wrote CloudFormation template: {}", output_path.display());
    }

    Ok(conversion)
}
