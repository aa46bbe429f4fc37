//! Main entry point for the ed25519-certgen CLI

use std::path::PathBuf;
use std::process::ExitCode;

use certgen::cli::{exit_code_for, usage_message, Cli, USAGE_EXIT_CODE};
use certgen::pipeline;
use certgen_common::LoggingTransformer;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    LoggingTransformer::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_code_for(e.kind()));
        }
    };

    let request = match cli.to_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", usage_message(&e));
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    // transient config files go to the working directory
    let backend = cli.backend.build(&cli.openssl, PathBuf::from("."));

    match pipeline::run(&request, backend.as_ref(), std::io::stdout()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Certificate generation failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
