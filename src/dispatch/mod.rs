//! Alert Dispatch
//!
//! Hands finished alerts to the persistence gateway. Delivery is best
//! effort: failures are logged here and never reach the intake caller.

pub mod gateway;

pub use gateway::{GatewayDispatcher, GatewaySettings};

use async_trait::async_trait;
use std::time::Duration;

use crate::models::AlertRecord;

#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    /// Deliver one alert. Must return normally whatever happens downstream.
    async fn dispatch(&self, alert: AlertRecord);
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("gateway did not answer within {0:?}")]
    Timeout(Duration),
    #[error("request to gateway failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("gateway rejected alert with HTTP {0}")]
    Status(u16),
}
