use std::process::ExitCode;

use gambit::cli;
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = match cli::parse_args(&args[1..]) {
        Ok(options) => options,
        Err(_) => {
            cli::print_usage(&args[0]);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
