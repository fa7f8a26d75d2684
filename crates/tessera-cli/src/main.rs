//! Entry point of the `tessera` layout tool.

use std::process;

use clap::Parser;
use log::{debug, error};

use tessera_cli::{Args, CliError, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(args.log_level.into())
        .init();
    debug!(args:?; "Parsed arguments");

    if let Err(err) = tessera_cli::run(&args) {
        report_failure(&err);
        process::exit(1);
    }
}

/// Renders every diagnostic behind `err` through miette.
///
/// A validation failure carries one diagnostic per layout issue; they
/// are rendered individually so each keeps its own code and help text.
fn report_failure(err: &CliError) {
    let handler = miette::GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &reportable).is_ok() {
            error!("{rendered}");
        }
    }
}
