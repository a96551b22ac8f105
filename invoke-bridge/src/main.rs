//! Bridge process entry point
//!
//! Reads the whole invocation envelope from stdin, performs exactly one
//! invocation, writes the rendered result to stdout, and exits. All
//! diagnostics go to stderr so stdout carries nothing but the result.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use invoke_bridge::mapper::MapperRegistry;
use invoke_bridge::{run, BridgeConfig};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "invoke-bridge")]
#[command(about = "Single-shot local function-invocation bridge", long_about = None)]
struct Args {
    /// Path to the compiled handler artifact (shared library)
    #[arg(long, env = "INVOKE_BRIDGE_ARTIFACT_PATH")]
    artifact_path: PathBuf,

    /// Fully qualified handler type name registered by the artifact
    #[arg(long, env = "INVOKE_BRIDGE_CLASS_NAME")]
    class_name: String,

    /// Entry point member name to resolve on the type
    #[arg(
        long,
        default_value = "handleRequest",
        env = "INVOKE_BRIDGE_HANDLER_NAME"
    )]
    handler_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "INVOKE_BRIDGE_LOG_LEVEL")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("invoke_bridge={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BridgeConfig {
        artifact_path: args.artifact_path,
        class_name: args.class_name,
        handler_name: args.handler_name,
    };

    // The mapper table is fixed configuration, built once and passed in.
    let mappers = MapperRegistry::with_builtin_builders();

    match read_stdin().and_then(|input| run(&config, &mappers, &input)) {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            // Alternate format prints the whole cause chain.
            error!("{:#}", anyhow::Error::from(err));
            ExitCode::FAILURE
        }
    }
}

fn read_stdin() -> Result<String, invoke_bridge::BridgeError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}
