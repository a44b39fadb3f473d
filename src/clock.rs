use async_trait::async_trait;
use std::time::Duration;

/// Source of the waits between workout steps
#[async_trait]
pub trait Clock: Send + Sync {
    /// Wait for `duration` to pass
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock waits on the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
