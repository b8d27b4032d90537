//! Splitdeck binary.

use std::process::ExitCode;

use clap::Parser;
use splitdeck::{Cli, ExitStatus, logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    tracing::debug!("splitdeck v{}", env!("CARGO_PKG_VERSION"));

    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout).await {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitStatus::for_error(&err).into()
        }
    }
}
