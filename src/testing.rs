//! Test doubles for the device and clock boundaries.
//!
//! The fake connector, every handle it opens and the fake clock all append
//! to one [`CallLog`], so tests can assert on the exact interleaving of
//! device commands and waits.

use async_trait::async_trait;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use crate::{
    clock::Clock,
    device::{Connector, Treadmill},
    error::{Result, TreadmillError},
};

/// A call observed at one of the boundaries
///
/// Device calls carry the id of the handle they were made on. Handles are
/// numbered from zero in the order they were opened.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open { endpoint: String, handle: usize },
    SetSpeed(usize, f64),
    SetIncline(usize, f64),
    ActualSpeed(usize),
    ActualElevation(usize),
    StartBelt(usize),
    StopBelt(usize),
    AutoStop(usize),
    Wait(Duration),
}

impl Call {
    const fn is_device_action(&self) -> bool {
        !matches!(self, Self::Open { .. } | Self::Wait(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn opens(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Open { .. }))
            .count()
    }

    pub fn device_actions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_device_action)
            .collect()
    }
}

/// Records the call, then fails if it is the one set up to fail
fn record(log: &CallLog, fail_on: Option<&Call>, call: Call) -> Result<()> {
    let fail = fail_on == Some(&call);
    log.push(call);
    if fail {
        Err(TreadmillError::Device("injected failure".to_string()))
    } else {
        Ok(())
    }
}

pub struct FakeConnector {
    log: CallLog,
    speed: f64,
    elevation: f64,
    fail_on: Option<Call>,
    next_handle: AtomicUsize,
}

impl FakeConnector {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            speed: 0.0,
            elevation: 0.0,
            fail_on: None,
            next_handle: AtomicUsize::new(0),
        }
    }

    /// Values returned by `actual_speed` and `actual_elevation`
    pub fn with_readings(mut self, speed: f64, elevation: f64) -> Self {
        self.speed = speed;
        self.elevation = elevation;
        self
    }

    pub fn failing_on(mut self, call: Call) -> Self {
        self.fail_on = Some(call);
        self
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn open(&self, endpoint: &str) -> Result<Box<dyn Treadmill>> {
        let handle = self.next_handle.fetch_add(1, Ordering::SeqCst);
        let call = Call::Open {
            endpoint: endpoint.to_string(),
            handle,
        };
        record(&self.log, self.fail_on.as_ref(), call)?;

        Ok(Box::new(FakeTreadmill {
            id: handle,
            log: self.log.clone(),
            speed: self.speed,
            elevation: self.elevation,
            fail_on: self.fail_on.clone(),
        }))
    }
}

pub struct FakeTreadmill {
    id: usize,
    log: CallLog,
    speed: f64,
    elevation: f64,
    fail_on: Option<Call>,
}

impl FakeTreadmill {
    /// A standalone handle with id 0, for tests that skip the connector
    pub fn new(log: &CallLog) -> Self {
        Self {
            id: 0,
            log: log.clone(),
            speed: 0.0,
            elevation: 0.0,
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, call: Call) -> Self {
        self.fail_on = Some(call);
        self
    }

    fn record(&self, call: Call) -> Result<()> {
        record(&self.log, self.fail_on.as_ref(), call)
    }
}

#[async_trait]
impl Treadmill for FakeTreadmill {
    async fn set_speed(&mut self, speed: f64) -> Result<()> {
        self.record(Call::SetSpeed(self.id, speed))
    }

    async fn set_incline(&mut self, incline: f64) -> Result<()> {
        self.record(Call::SetIncline(self.id, incline))
    }

    async fn actual_speed(&mut self) -> Result<f64> {
        self.record(Call::ActualSpeed(self.id))?;
        Ok(self.speed)
    }

    async fn actual_elevation(&mut self) -> Result<f64> {
        self.record(Call::ActualElevation(self.id))?;
        Ok(self.elevation)
    }

    async fn start_belt(&mut self) -> Result<()> {
        self.record(Call::StartBelt(self.id))
    }

    async fn stop_belt(&mut self) -> Result<()> {
        self.record(Call::StopBelt(self.id))
    }

    async fn auto_stop(&mut self) -> Result<()> {
        self.record(Call::AutoStop(self.id))
    }
}

/// Clock that returns immediately and logs the requested wait
pub struct FakeClock {
    log: CallLog,
}

impl FakeClock {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.log.push(Call::Wait(duration));
    }
}
