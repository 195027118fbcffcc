use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use super::auth::TokenProvider;
use super::model::MetricAlert;
use super::MetricAlertClient;
use crate::alerts::ToggleConfig;

/// Client for `Microsoft.Insights/metricAlerts` in one resource group
#[derive(Debug, Clone)]
pub struct ArmMetricAlertClient {
    http_client: reqwest::Client,
    endpoint: Url,
    subscription_id: String,
    resource_group: String,
    api_version: String,
    tokens: Arc<TokenProvider>,
}

impl ArmMetricAlertClient {
    pub fn new(config: &ToggleConfig, tokens: TokenProvider) -> Result<Self, MonitorError> {
        Self::with_timeout(config, tokens, config.request_timeout())
    }

    pub fn with_timeout(
        config: &ToggleConfig,
        tokens: TokenProvider,
        timeout: Duration,
    ) -> Result<Self, MonitorError> {
        let endpoint = Url::parse(&config.management_endpoint)
            .map_err(|e| MonitorError::InvalidEndpoint(format!("{}: {}", config.management_endpoint, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(MonitorError::InvalidEndpoint(config.management_endpoint.clone()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint,
            subscription_id: config.subscription_id.clone(),
            resource_group: config.resource_group.clone(),
            api_version: config.api_version.clone(),
            tokens: Arc::new(tokens),
        })
    }

    /// Resource URL for a metric alert; the name is percent-encoded as one path segment
    pub fn alert_url(&self, name: &str) -> Url {
        let mut url = self.endpoint.clone();
        // `with_timeout` rejects cannot-be-a-base endpoints
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "subscriptions",
                self.subscription_id.as_str(),
                "resourceGroups",
                self.resource_group.as_str(),
                "providers",
                "Microsoft.Insights",
                "metricAlerts",
                name,
            ]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("api-version", &self.api_version);
        url
    }

    /// Bearer token for the next request; acquisition failures surface as `Auth`
    async fn bearer(&self) -> Result<String, MonitorError> {
        self.tokens
            .token()
            .await
            .map(|t| t.secret().to_string())
            .map_err(|e| MonitorError::Auth(e.to_string()))
    }

    async fn error_from(response: reqwest::Response) -> MonitorError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ArmErrorResponse>(&body)
            .map(|e| format!("{}: {}", e.error.code, e.error.message))
            .unwrap_or(body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MonitorError::Auth(message),
            _ => MonitorError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl MetricAlertClient for ArmMetricAlertClient {
    async fn try_get_metric_alert(&self, name: &str) -> Result<Option<MetricAlert>, MonitorError> {
        let token = self.bearer().await?;
        let response = self
            .http_client
            .get(self.alert_url(name))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MonitorError::Network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(alert = %name, resource_group = %self.resource_group, "No metric alert with this name");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let alert = response
            .json::<MetricAlert>()
            .await
            .map_err(|e| MonitorError::Deserialization(e.to_string()))?;
        Ok(Some(alert))
    }

    async fn create_or_update(
        &self,
        name: &str,
        alert: &MetricAlert,
    ) -> Result<MetricAlert, MonitorError> {
        let token = self.bearer().await?;
        let response = self
            .http_client
            .put(self.alert_url(name))
            .bearer_auth(token)
            .json(alert)
            .send()
            .await
            .map_err(|e| MonitorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        tracing::debug!(
            alert = %name,
            enabled = alert.enabled(),
            status = %response.status(),
            "Metric alert written"
        );

        response
            .json::<MetricAlert>()
            .await
            .map_err(|e| MonitorError::Deserialization(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ArmErrorResponse {
    error: ArmErrorBody,
}

#[derive(Debug, Deserialize)]
struct ArmErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Management API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid management endpoint: {0}")]
    InvalidEndpoint(String),
}
