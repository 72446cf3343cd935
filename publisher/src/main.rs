//! Symbol publisher CLI entrypoint.
//!
//! Runs one publish as a GitHub Actions step: reads the action inputs,
//! publishes the matching symbol files, and exits non-zero when the run
//! fails. Progress and the failure message are written to stdout as workflow
//! commands; diagnostics go to stderr through `env_logger`.

use clap::Parser;
use log::LevelFilter;
use symbol_publisher::cli::Cli;
use symbol_publisher::error::Result;
use symbol_publisher::exec::SystemCommandExecutor;
use symbol_publisher::host::{Host, WorkflowCommands};
use symbol_publisher::inputs::PublishInputs;
use symbol_publisher::naming::RunContext;
use symbol_publisher::pipeline::{self, PublishSummary, report_outcome};
use symbol_publisher::publish::client::HttpClientDownloader;
use symbol_publisher::publish::tool::SymbolToolPublisher;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let mut host = WorkflowCommands::stdout();
    let outcome = publish(&cli, &mut host);
    if report_outcome(outcome, &mut host).is_none() {
        std::process::exit(1);
    }
}

fn publish(cli: &Cli, host: &mut dyn Host) -> Result<PublishSummary> {
    let inputs = PublishInputs::from_env(cli, host)?;
    let context = RunContext::from_env();
    let publisher = SymbolToolPublisher::new(
        SystemCommandExecutor,
        HttpClientDownloader,
        inputs.symbol_tool.clone(),
    );

    pipeline::run(&inputs, &context, &publisher, host)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
