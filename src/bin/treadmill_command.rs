use std::process::ExitCode;
use tracing::error;
use treadmill_control::{logging, run_command_line, DefaultConnector};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("warn");

    let mut stdout = std::io::stdout();
    match run_command_line(std::env::args().skip(1), &DefaultConnector, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if e.is_usage_error() {
                eprintln!("usage: treadmill-command <command> <endpoint> [value]");
            }
            ExitCode::FAILURE
        }
    }
}
