use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cql2cfn::{convert_file, ConvertError, ConvertOptions};

#[derive(Parser)]
#[command(name = "cql2cfn")]
#[command(author, version, about = "Convert a CQL script into a CloudFormation template for Amazon Keyspaces")]
struct Cli {
    /// Path to a CQL script to be converted
    #[arg(value_name = "CQL_SCRIPT")]
    cql_script: PathBuf,

    /// Path to the generated CloudFormation template (defaults to stdout)
    #[arg(value_name = "CFN_TEMPLATE")]
    cfn_template: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Exit on warnings in addition to errors
    #[arg(short, long)]
    strict: bool,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = ConvertOptions {
        input_path: cli.cql_script,
        output_path: cli.cfn_template,
        debug: cli.debug,
        strict: cli.strict,
    };

    let conversion = convert_file(&options)?;
    if options.output_path.is_none() {
        println!("{}", conversion.template);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is::<ConvertError>() {
                error!("{:#}", e);
            } else {
                error!("Encountered an unexpected error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
