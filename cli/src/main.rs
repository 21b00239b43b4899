use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use social_graph_cli::{CliArgs, Settings};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &CliArgs) -> anyhow::Result<social_graph_cli::Reply> {
    let settings = Settings::resolve(args.config.as_deref(), &args.overrides())?;

    if let Some(workers) = settings.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("configuring worker pool")?;
    }

    social_graph_cli::run(&settings, &args.command)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose, args.quiet);

    match run(&args) {
        Ok(reply) => {
            println!("{}", reply.body);
            if reply.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
