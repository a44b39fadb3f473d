use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

use crate::error::TreadmillError;

/// Speed the belt is set to right after `start`
pub const DEFAULT_START_SPEED: f64 = 3.0;

/// Serial port the workout runner opens when none is given
pub const DEFAULT_ENDPOINT: &str = "/dev/tty.usbserial-D30B78YP";

/// One-shot commands accepted by the command dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Verify the device is reachable
    CheckConnection,
    /// Set target speed (takes a value)
    SetSpeed,
    /// Set target incline (takes a value)
    SetIncline,
    /// Print the actual belt speed
    GetSpeed,
    /// Print the actual deck elevation
    GetIncline,
    /// Start the belt at the default speed
    Start,
    /// Stop the belt
    Stop,
    /// Ramp the belt down and halt
    AutoStop,
}

impl Command {
    /// Every command, in the order they are listed in usage text
    pub const ALL: [Self; 8] = [
        Self::CheckConnection,
        Self::SetSpeed,
        Self::SetIncline,
        Self::GetSpeed,
        Self::GetIncline,
        Self::Start,
        Self::Stop,
        Self::AutoStop,
    ];

    /// Canonical command-line name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CheckConnection => "check-connection",
            Self::SetSpeed => "set-speed",
            Self::SetIncline => "set-incline",
            Self::GetSpeed => "get-speed",
            Self::GetIncline => "get-incline",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::AutoStop => "auto-stop",
        }
    }

    /// camelCase spelling used by older callers
    const fn alias(self) -> &'static str {
        match self {
            Self::CheckConnection => "checkConnection",
            Self::SetSpeed => "setSpeed",
            Self::SetIncline => "setIncline",
            Self::GetSpeed => "getSpeed",
            Self::GetIncline => "getIncline",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::AutoStop => "autoStop",
        }
    }

    /// Whether the command needs a numeric value argument
    #[must_use]
    pub const fn takes_value(self) -> bool {
        matches!(self, Self::SetSpeed | Self::SetIncline)
    }
}

impl FromStr for Command {
    type Err = TreadmillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s || command.alias() == s)
            .ok_or_else(|| TreadmillError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single step of a workout program
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WorkoutStep {
    /// Set target belt speed
    SetSpeed(f64),
    /// Set target incline
    SetIncline(f64),
    /// Keep the current settings for a while
    Hold(Duration),
    /// Ramp down and halt the belt
    AutoStop,
}

impl fmt::Display for WorkoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetSpeed(speed) => write!(f, "set speed {speed}"),
            Self::SetIncline(incline) => write!(f, "set incline {incline}"),
            Self::Hold(duration) => write!(f, "hold {}s", duration.as_secs()),
            Self::AutoStop => write!(f, "auto stop"),
        }
    }
}

/// An ordered, open-loop sequence of workout steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutProgram {
    /// Steps executed front to back
    pub steps: Vec<WorkoutStep>,
}

impl WorkoutProgram {
    /// Total time spent holding
    #[must_use]
    pub fn total_hold(&self) -> Duration {
        self.steps
            .iter()
            .filter_map(|step| match step {
                WorkoutStep::Hold(duration) => Some(*duration),
                _ => None,
            })
            .sum()
    }
}

impl Default for WorkoutProgram {
    /// Speed 6, then incline 5, 10 and 15 with a minute on each of the first
    /// three settings and five minutes at the top, then auto-stop.
    fn default() -> Self {
        Self {
            steps: vec![
                WorkoutStep::SetSpeed(6.0),
                WorkoutStep::Hold(Duration::from_secs(60)),
                WorkoutStep::SetIncline(5.0),
                WorkoutStep::Hold(Duration::from_secs(60)),
                WorkoutStep::SetIncline(10.0),
                WorkoutStep::Hold(Duration::from_secs(60)),
                WorkoutStep::SetIncline(15.0),
                WorkoutStep::Hold(Duration::from_secs(5 * 60)),
                WorkoutStep::AutoStop,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_str() {
        assert_eq!("set-speed".parse::<Command>().unwrap(), Command::SetSpeed);
        assert_eq!("get-incline".parse::<Command>().unwrap(), Command::GetIncline);
        assert_eq!("auto-stop".parse::<Command>().unwrap(), Command::AutoStop);
        assert_eq!("setIncline".parse::<Command>().unwrap(), Command::SetIncline);
        assert_eq!(
            "checkConnection".parse::<Command>().unwrap(),
            Command::CheckConnection
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = "jump".parse::<Command>().unwrap_err();
        assert!(matches!(err, TreadmillError::UnknownCommand(name) if name == "jump"));

        // Names are case sensitive
        assert!("STOP".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_command_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_takes_value() {
        let with_value: Vec<_> = Command::ALL
            .into_iter()
            .filter(|command| command.takes_value())
            .collect();
        assert_eq!(with_value, vec![Command::SetSpeed, Command::SetIncline]);
    }

    #[test]
    fn test_default_workout_program() {
        let program = WorkoutProgram::default();

        assert_eq!(program.steps.len(), 9);
        assert_eq!(program.steps[0], WorkoutStep::SetSpeed(6.0));
        assert_eq!(program.steps.last(), Some(&WorkoutStep::AutoStop));
        assert_eq!(program.total_hold(), Duration::from_secs(480));
    }

    #[test]
    fn test_workout_step_display() {
        assert_eq!(WorkoutStep::SetSpeed(6.0).to_string(), "set speed 6");
        assert_eq!(WorkoutStep::SetIncline(7.5).to_string(), "set incline 7.5");
        assert_eq!(
            WorkoutStep::Hold(Duration::from_secs(300)).to_string(),
            "hold 300s"
        );
    }
}
