//! Toggle configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_METRIC_ALERTS_API_VERSION: &str = "2018-03-01";
pub const DEFAULT_CLI_PROGRAM: &str = "az";

/// Which subscription, resource group and alerts a run operates on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub subscription_id: String,
    pub resource_group: String,
    /// Alert names, metric and log search alike, processed in this order
    pub alert_names: Vec<String>,
    /// Azure Resource Manager base URL
    pub management_endpoint: String,
    /// `api-version` query parameter for `Microsoft.Insights/metricAlerts`
    pub api_version: String,
    /// Program used for log search alert updates
    pub cli_program: String,
    pub request_timeout_secs: u64,
    pub lookup_policy: LookupPolicy,
}

/// How a metric alert lookup that failed with something other than
/// "not found" is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Warn and treat the alert as a log search alert
    #[default]
    FallThrough,
    /// Record the alert as failed and leave it alone
    Strict,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            subscription_id: "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".to_string(),
            resource_group: "XXX-xxx".to_string(),
            alert_names: vec!["xxx-xxxx-xxx".to_string(), "xxx xx xxx - xx-xx".to_string()],
            management_endpoint: DEFAULT_MANAGEMENT_ENDPOINT.to_string(),
            api_version: DEFAULT_METRIC_ALERTS_API_VERSION.to_string(),
            cli_program: DEFAULT_CLI_PROGRAM.to_string(),
            request_timeout_secs: 30,
            lookup_policy: LookupPolicy::FallThrough,
        }
    }
}

impl ToggleConfig {
    /// Build a config from the defaults, an optional JSON file and environment overrides
    ///
    /// ALERT_TOGGLE_CONFIG=/etc/alert-toggle.json
    /// ALERT_TOGGLE_SUBSCRIPTION_ID=00000000-0000-0000-0000-000000000000
    /// ALERT_TOGGLE_RESOURCE_GROUP=prod-monitoring
    /// ALERT_TOGGLE_ALERTS=cpu-high,Failed logins - prod
    /// ALERT_TOGGLE_ENDPOINT=https://management.azure.com
    /// ALERT_TOGGLE_CLI=az
    /// ALERT_TOGGLE_TIMEOUT_SECS=30
    /// ALERT_TOGGLE_STRICT_LOOKUP=true
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Same as [`ToggleConfig::from_env`] with an explicit variable lookup
    pub fn load<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match var("ALERT_TOGGLE_CONFIG").filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::from_file(path.trim())?,
            None => Self::default(),
        };
        config.apply_overrides(var)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file; absent fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("ALERT_TOGGLE_SUBSCRIPTION_ID") {
            self.subscription_id = v.trim().to_string();
        }
        if let Some(v) = var("ALERT_TOGGLE_RESOURCE_GROUP") {
            self.resource_group = v.trim().to_string();
        }
        // "cpu-high,Failed logins - prod" format; names may contain spaces
        if let Some(v) = var("ALERT_TOGGLE_ALERTS") {
            self.alert_names = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = var("ALERT_TOGGLE_ENDPOINT") {
            self.management_endpoint = v.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = var("ALERT_TOGGLE_CLI") {
            self.cli_program = v.trim().to_string();
        }
        if let Some(v) = var("ALERT_TOGGLE_TIMEOUT_SECS") {
            self.request_timeout_secs = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("ALERT_TOGGLE_TIMEOUT_SECS: '{}'", v)))?;
        }
        if let Some(v) = var("ALERT_TOGGLE_STRICT_LOOKUP") {
            self.lookup_policy = match v.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => LookupPolicy::Strict,
                "false" | "0" | "no" | "off" | "" => LookupPolicy::FallThrough,
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "ALERT_TOGGLE_STRICT_LOOKUP: '{}'",
                        v
                    )))
                }
            };
        }
        Ok(())
    }

    /// Reject configs that cannot address any alert
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subscription_id.trim().is_empty() {
            return Err(ConfigError::Invalid("subscription_id is empty".to_string()));
        }
        if self.resource_group.trim().is_empty() {
            return Err(ConfigError::Invalid("resource_group is empty".to_string()));
        }
        if self.alert_names.is_empty() {
            return Err(ConfigError::Invalid("no alert names configured".to_string()));
        }
        if self.alert_names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Invalid("alert names must not be blank".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.cli_program.trim().is_empty() {
            return Err(ConfigError::Invalid("cli_program is empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
