use std::io::Write;
use tracing::info;

use crate::{
    device::{Connector, Treadmill},
    error::{Result, TreadmillError},
    types::{Command, DEFAULT_START_SPEED},
};

/// A command together with its parsed value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Verify the device is reachable
    CheckConnection,
    /// Set target speed
    SetSpeed(f64),
    /// Set target incline
    SetIncline(f64),
    /// Print the actual belt speed
    GetSpeed,
    /// Print the actual deck elevation
    GetIncline,
    /// Start the belt at [`DEFAULT_START_SPEED`]
    Start,
    /// Stop the belt
    Stop,
    /// Ramp the belt down and halt
    AutoStop,
}

impl Action {
    /// Attach a value to `command`
    ///
    /// `value` is only looked at for commands that take one.
    ///
    /// # Errors
    ///
    /// Returns [`TreadmillError::MissingArgument`] if a value is needed but
    /// absent, or [`TreadmillError::InvalidValue`] if it is not a number.
    pub fn from_command(command: Command, value: Option<&str>) -> Result<Self> {
        Ok(match command {
            Command::CheckConnection => Self::CheckConnection,
            Command::SetSpeed => Self::SetSpeed(parse_value("speed", value)?),
            Command::SetIncline => Self::SetIncline(parse_value("incline", value)?),
            Command::GetSpeed => Self::GetSpeed,
            Command::GetIncline => Self::GetIncline,
            Command::Start => Self::Start,
            Command::Stop => Self::Stop,
            Command::AutoStop => Self::AutoStop,
        })
    }

    /// The command this action was built from
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::CheckConnection => Command::CheckConnection,
            Self::SetSpeed(_) => Command::SetSpeed,
            Self::SetIncline(_) => Command::SetIncline,
            Self::GetSpeed => Command::GetSpeed,
            Self::GetIncline => Command::GetIncline,
            Self::Start => Command::Start,
            Self::Stop => Command::Stop,
            Self::AutoStop => Command::AutoStop,
        }
    }
}

fn parse_value(name: &'static str, value: Option<&str>) -> Result<f64> {
    let raw = value.ok_or(TreadmillError::MissingArgument(name))?;
    raw.trim().parse().map_err(|_| TreadmillError::InvalidValue {
        name,
        value: raw.to_string(),
    })
}

/// One command-line invocation of the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// What to do
    pub action: Action,
    /// Connection endpoint of the device
    pub endpoint: String,
}

impl Invocation {
    /// Parse positional `[command, endpoint, value]` arguments
    ///
    /// The command name is checked first, so an unknown command is reported
    /// even when the other arguments are missing. Arguments past the value
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TreadmillError::UnknownCommand`] for an unrecognised command
    /// name, [`TreadmillError::MissingArgument`] when the command name,
    /// endpoint or a required value is missing, and
    /// [`TreadmillError::InvalidValue`] for a non-numeric value.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();

        let command: Command = args
            .next()
            .ok_or(TreadmillError::MissingArgument("command"))?
            .as_ref()
            .parse()?;
        let endpoint = args
            .next()
            .ok_or(TreadmillError::MissingArgument("endpoint"))?
            .as_ref()
            .to_string();
        let value = args.next();
        let action = Action::from_command(command, value.as_ref().map(AsRef::as_ref))?;

        Ok(Self { action, endpoint })
    }
}

/// Run one invocation against the device behind its endpoint
///
/// A shared handle is opened up front and passed to the selected command.
/// Readings are written to `out` as a single line.
///
/// # Errors
///
/// Returns any error from opening the device, from the device itself, or
/// from writing to `out`. `check-connection` always fails with
/// [`TreadmillError::NotImplemented`].
pub async fn dispatch<W: Write>(
    invocation: &Invocation,
    connector: &dyn Connector,
    out: &mut W,
) -> Result<()> {
    info!(
        "Dispatching {} to {}",
        invocation.action.command(),
        invocation.endpoint
    );
    let mut treadmill = connector.open(&invocation.endpoint).await?;
    let treadmill = treadmill.as_mut();

    match invocation.action {
        Action::CheckConnection => check_connection(treadmill),
        Action::SetSpeed(speed) => {
            set_speed_with_fresh_handle(connector, &invocation.endpoint, speed).await
        }
        Action::SetIncline(incline) => set_incline(treadmill, incline).await,
        Action::GetSpeed => get_speed(treadmill, out).await,
        Action::GetIncline => get_incline(treadmill, out).await,
        Action::Start => start(treadmill).await,
        Action::Stop => stop(treadmill).await,
        Action::AutoStop => auto_stop(treadmill).await,
    }
}

/// Parse `args` and dispatch the result
///
/// Nothing is opened when the arguments do not parse.
///
/// # Errors
///
/// Returns the parse error, or any error from [`dispatch`].
pub async fn run_command_line<I, S, W>(args: I, connector: &dyn Connector, out: &mut W) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write,
{
    let invocation = Invocation::from_args(args)?;
    dispatch(&invocation, connector, out).await
}

/// Connectivity probe
///
/// # Errors
///
/// Always returns [`TreadmillError::NotImplemented`]; no probe is defined
/// for the device.
pub fn check_connection(_treadmill: &mut dyn Treadmill) -> Result<()> {
    Err(TreadmillError::NotImplemented("check-connection"))
}

/// Set the speed through a handle opened just for this call
///
/// Unlike every other command this does not use the shared handle.
///
/// # Errors
///
/// Returns an error if the new handle cannot be opened or the write fails.
pub async fn set_speed_with_fresh_handle(
    connector: &dyn Connector,
    endpoint: &str,
    speed: f64,
) -> Result<()> {
    let mut treadmill = connector.open(endpoint).await?;
    info!("Setting speed to {}", speed);
    treadmill.set_speed(speed).await
}

/// Set the incline
///
/// # Errors
///
/// Returns any error reported by the treadmill.
pub async fn set_incline(treadmill: &mut dyn Treadmill, incline: f64) -> Result<()> {
    info!("Setting incline to {}", incline);
    treadmill.set_incline(incline).await
}

/// Write the actual belt speed to `out`
///
/// # Errors
///
/// Returns an error if the read or the write fails.
pub async fn get_speed<W: Write>(treadmill: &mut dyn Treadmill, out: &mut W) -> Result<()> {
    let speed = treadmill.actual_speed().await?;
    write_reading(out, speed)
}

/// Write the actual deck elevation to `out`
///
/// # Errors
///
/// Returns an error if the read or the write fails.
pub async fn get_incline<W: Write>(treadmill: &mut dyn Treadmill, out: &mut W) -> Result<()> {
    let incline = treadmill.actual_elevation().await?;
    write_reading(out, incline)
}

/// Start the belt, then bring it to [`DEFAULT_START_SPEED`]
///
/// # Errors
///
/// Returns any error reported by the treadmill. The speed is not set if
/// starting the belt failed.
pub async fn start(treadmill: &mut dyn Treadmill) -> Result<()> {
    info!("Starting belt at {}", DEFAULT_START_SPEED);
    treadmill.start_belt().await?;
    treadmill.set_speed(DEFAULT_START_SPEED).await
}

/// Stop the belt
///
/// # Errors
///
/// Returns any error reported by the treadmill.
pub async fn stop(treadmill: &mut dyn Treadmill) -> Result<()> {
    info!("Stopping belt");
    treadmill.stop_belt().await
}

/// Ramp the belt down and halt it
///
/// # Errors
///
/// Returns any error reported by the treadmill.
pub async fn auto_stop(treadmill: &mut dyn Treadmill) -> Result<()> {
    info!("Auto stopping belt");
    treadmill.auto_stop().await
}

// Debug keeps the fractional part on whole numbers: 3.0, not 3
fn write_reading<W: Write>(out: &mut W, value: f64) -> Result<()> {
    writeln!(out, "{value:?}")?;
    out.flush()?;
    Ok(())
}
