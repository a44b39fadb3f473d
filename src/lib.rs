#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

//! # Treadmill Control
//!
//! Drive a treadmill motor controller from the command line, either one
//! command at a time or through a fixed timed workout.
//!
//! The crate does not speak any device protocol itself. Everything it sends
//! to the treadmill goes through the [`Treadmill`] trait, and handles are
//! obtained from a [`Connector`]. The built-in [`DefaultConnector`] opens
//! in-memory [`SimulatedTreadmill`]s for `sim:<name>` endpoints; a hardware
//! driver plugs in by implementing [`Connector`] for its own endpoints.
//!
//! Two binaries sit on top of the library:
//!
//! - `treadmill-command <command> <endpoint> [value]` runs exactly one
//!   command (`set-speed`, `set-incline`, `get-speed`, `get-incline`,
//!   `start`, `stop`, `auto-stop`, `check-connection`) and exits.
//! - `treadmill-workout [endpoint]` runs the built-in workout: speed 6, then
//!   incline 5, 10 and 15, then auto-stop.
//!
//! ## Safety Warning
//!
//! ⚠️ **Important**: This crate controls physical exercise equipment. Timing
//! is open loop and a failed command aborts the run without stopping the
//! belt. Keep the treadmill's own emergency stop within reach.
//!
//! ## Quick Start
//!
//! ```no_run
//! use treadmill_control::{run_workout, DefaultConnector, Connector, TokioClock, WorkoutProgram};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut treadmill = DefaultConnector.open("sim:lab").await?;
//!     run_workout(treadmill.as_mut(), &TokioClock, &WorkoutProgram::default()).await?;
//!     Ok(())
//! }
//! ```

/// Time source for workout holds
pub mod clock;
/// Device boundary and the simulated treadmill
pub mod device;
/// Single-command dispatcher
pub mod dispatch;
/// Error types and handling
pub mod error;
/// Log output setup for the binaries
pub mod logging;
/// Type definitions and data structures
pub mod types;
/// Timed workout runner
pub mod workout;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the main types for convenient usage
pub use clock::{Clock, TokioClock};
pub use device::{Connector, DefaultConnector, SimulatedTreadmill, Treadmill};
pub use dispatch::{dispatch, run_command_line, Action, Invocation};
pub use error::{Result, TreadmillError};
pub use types::{Command, WorkoutProgram, WorkoutStep, DEFAULT_ENDPOINT, DEFAULT_START_SPEED};
pub use workout::{run_default_workout, run_workout};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
