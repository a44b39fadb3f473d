use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{Result, TreadmillError};

/// Endpoint prefix that selects the in-memory [`SimulatedTreadmill`]
pub const SIMULATED_SCHEME: &str = "sim:";

/// An open connection to one treadmill controller
///
/// This is the boundary to the device layer. Implementations own the wire
/// protocol; callers only issue commands and read values back. Every call
/// either completes or fails, there is no partial success.
#[async_trait]
pub trait Treadmill: Send {
    /// Set the target belt speed
    async fn set_speed(&mut self, speed: f64) -> Result<()>;

    /// Set the target deck incline
    async fn set_incline(&mut self, incline: f64) -> Result<()>;

    /// Read the speed the belt is actually running at
    async fn actual_speed(&mut self) -> Result<f64>;

    /// Read the deck elevation actually reached
    async fn actual_elevation(&mut self) -> Result<f64>;

    /// Start the belt
    async fn start_belt(&mut self) -> Result<()>;

    /// Stop the belt
    async fn stop_belt(&mut self) -> Result<()>;

    /// Ramp the belt down and halt it
    async fn auto_stop(&mut self) -> Result<()>;
}

/// Opens [`Treadmill`] handles from a connection endpoint string
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a new handle to the device behind `endpoint`
    ///
    /// # Errors
    ///
    /// Returns [`TreadmillError::UnsupportedEndpoint`] if this connector does
    /// not handle the endpoint, or [`TreadmillError::ConnectionFailed`] if the
    /// device cannot be opened.
    async fn open(&self, endpoint: &str) -> Result<Box<dyn Treadmill>>;
}

/// Connector used by the binaries
///
/// Handles `sim:<name>` endpoints. Hardware drivers plug in by providing
/// their own [`Connector`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultConnector;

#[async_trait]
impl Connector for DefaultConnector {
    async fn open(&self, endpoint: &str) -> Result<Box<dyn Treadmill>> {
        match endpoint.strip_prefix(SIMULATED_SCHEME) {
            Some(name) if !name.is_empty() => {
                info!("Opening simulated treadmill {}", name);
                Ok(Box::new(SimulatedTreadmill::new(name)))
            }
            Some(_) => Err(TreadmillError::ConnectionFailed(format!(
                "simulated endpoint needs a name: {endpoint}"
            ))),
            None => Err(TreadmillError::UnsupportedEndpoint(endpoint.to_string())),
        }
    }
}

/// In-memory treadmill for dry runs
///
/// Reports its target settings as the actual readings. Belt speed reads as
/// zero while the belt is stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedTreadmill {
    name: String,
    running: bool,
    speed: f64,
    incline: f64,
}

impl SimulatedTreadmill {
    /// Create a stopped treadmill with speed and incline at zero
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running: false,
            speed: 0.0,
            incline: 0.0,
        }
    }

    /// Device name taken from the endpoint
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the belt is moving
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }
}

#[async_trait]
impl Treadmill for SimulatedTreadmill {
    async fn set_speed(&mut self, speed: f64) -> Result<()> {
        debug!("[{}] speed {} -> {}", self.name, self.speed, speed);
        self.speed = speed;
        Ok(())
    }

    async fn set_incline(&mut self, incline: f64) -> Result<()> {
        debug!("[{}] incline {} -> {}", self.name, self.incline, incline);
        self.incline = incline;
        Ok(())
    }

    async fn actual_speed(&mut self) -> Result<f64> {
        Ok(if self.running { self.speed } else { 0.0 })
    }

    async fn actual_elevation(&mut self) -> Result<f64> {
        Ok(self.incline)
    }

    async fn start_belt(&mut self) -> Result<()> {
        debug!("[{}] belt started", self.name);
        self.running = true;
        Ok(())
    }

    async fn stop_belt(&mut self) -> Result<()> {
        debug!("[{}] belt stopped", self.name);
        self.running = false;
        Ok(())
    }

    async fn auto_stop(&mut self) -> Result<()> {
        debug!("[{}] auto stop", self.name);
        self.speed = 0.0;
        self.running = false;
        Ok(())
    }
}
