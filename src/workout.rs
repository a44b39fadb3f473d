use tracing::info;

use crate::{
    clock::Clock,
    device::{Connector, Treadmill},
    error::Result,
    types::{WorkoutProgram, WorkoutStep},
};

/// Run a workout program against an open treadmill
///
/// Steps run strictly in order with no feedback from the device: a hold is a
/// plain wait on `clock`, never a check that the target was reached. The
/// first failing step aborts the run and its error is returned. Nothing is
/// sent to the device after a failure, so the belt is left in whatever state
/// the last successful command put it in.
///
/// # Errors
///
/// Returns the first error reported by the treadmill.
pub async fn run_workout(
    treadmill: &mut dyn Treadmill,
    clock: &dyn Clock,
    program: &WorkoutProgram,
) -> Result<()> {
    let total = program.steps.len();
    info!(
        "Starting workout: {} steps, {}s of holds",
        total,
        program.total_hold().as_secs()
    );

    for (index, step) in program.steps.iter().enumerate() {
        info!("Step {}/{}: {}", index + 1, total, step);
        match *step {
            WorkoutStep::SetSpeed(speed) => treadmill.set_speed(speed).await?,
            WorkoutStep::SetIncline(incline) => treadmill.set_incline(incline).await?,
            WorkoutStep::Hold(duration) => clock.sleep(duration).await,
            WorkoutStep::AutoStop => treadmill.auto_stop().await?,
        }
    }

    info!("Workout complete");
    Ok(())
}

/// Open `endpoint` and run the built-in workout on it
///
/// # Errors
///
/// Returns an error if the device cannot be opened or any step fails.
pub async fn run_default_workout(
    connector: &dyn Connector,
    endpoint: &str,
    clock: &dyn Clock,
) -> Result<()> {
    let mut treadmill = connector.open(endpoint).await?;
    run_workout(treadmill.as_mut(), clock, &WorkoutProgram::default()).await
}
