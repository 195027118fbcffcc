//! Collaborators that talk to Azure Monitor
//!
//! Metric alerts are read and written through the Resource Manager REST API,
//! log search (scheduled query) alerts are updated through the `az` CLI.
//! Both sit behind traits so the toggler can be driven by fakes in tests.

pub mod auth;
pub mod cli;
pub mod client;
pub mod model;

use async_trait::async_trait;

pub use auth::{AccessToken, AuthError, TokenProvider};
pub use cli::{AzCliLogSearchClient, LogSearchError};
pub use client::{ArmMetricAlertClient, MonitorError};
pub use model::{MetricAlert, MetricAlertProperties};

/// Metric alerts in one resource group
#[async_trait]
pub trait MetricAlertClient {
    /// Fetch a metric alert by name
    ///
    /// Returns `Ok(None)` when no metric alert with that name exists. Any
    /// other failure (auth, throttling, network) is an `Err`.
    async fn try_get_metric_alert(&self, name: &str) -> Result<Option<MetricAlert>, MonitorError>;

    /// Write the alert back under `name`
    async fn create_or_update(
        &self,
        name: &str,
        alert: &MetricAlert,
    ) -> Result<MetricAlert, MonitorError>;
}

/// Log search alerts in one resource group
#[async_trait]
pub trait LogSearchAlertClient {
    /// Set the `disabled` flag of the named log search alert
    async fn set_disabled(&self, name: &str, disabled: bool) -> Result<(), LogSearchError>;
}
