use clap::Parser;
use miette::Result;
use pixstudio::cli::{Cli, Commands};
use pixstudio::output::Printer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "pixstudio=warn",
        1 => "pixstudio=debug",
        _ => "pixstudio=trace",
    };
    // Logs go to stderr; stdout carries `edit --json` output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => pixstudio::cli::convert::run(args, &printer)?,
        Commands::Edit(args) => pixstudio::cli::edit::run(args, &printer)?,
        Commands::Init(args) => pixstudio::cli::init::run(args, &printer)?,
        Commands::Completions(args) => pixstudio::cli::completions::run(args)?,
    }

    Ok(())
}
