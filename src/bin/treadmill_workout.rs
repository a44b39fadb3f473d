use std::process::ExitCode;
use tracing::{error, info};
use treadmill_control::{logging, run_default_workout, DefaultConnector, TokioClock, DEFAULT_ENDPOINT};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("info");

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    info!("Running workout on {}", endpoint);

    match run_default_workout(&DefaultConnector, &endpoint, &TokioClock).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Workout aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
