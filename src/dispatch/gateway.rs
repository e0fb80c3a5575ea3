//! Gateway alert-ingestion client

use async_trait::async_trait;
use std::time::Duration;

use super::{AlertDispatcher, DispatchError};
use crate::models::AlertRecord;

/// Ingestion route on the gateway
pub const ALERT_INGESTION_PATH: &str = "/api/v1/internal/alert-ingestion";

pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub user: String,
    pub password: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct GatewayDispatcher {
    client: reqwest::Client,
    settings: GatewaySettings,
}

impl GatewayDispatcher {
    pub fn new(settings: GatewaySettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.settings.base_url.trim_end_matches('/'),
            ALERT_INGESTION_PATH
        )
    }

    /// Single authenticated POST, no retries
    async fn send(&self, alert: &AlertRecord) -> Result<u16, DispatchError> {
        let response = self
            .client
            .post(self.endpoint())
            .basic_auth(&self.settings.user, Some(&self.settings.password))
            .json(alert)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(self.settings.timeout)
                } else {
                    DispatchError::Transport(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(DispatchError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl AlertDispatcher for GatewayDispatcher {
    async fn dispatch(&self, alert: AlertRecord) {
        match self.send(&alert).await {
            Ok(status) => {
                tracing::info!(
                    alert_id = %alert.alert_id,
                    status,
                    "Alert sent to gateway for persistence"
                );
            }
            Err(e) => {
                tracing::error!(
                    alert_id = %alert.alert_id,
                    "Failed to send alert to gateway at {}: {}",
                    self.endpoint(),
                    e
                );
            }
        }
    }
}
