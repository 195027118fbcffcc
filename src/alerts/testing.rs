//! Recording fakes for the monitor clients

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::monitor::{
    LogSearchAlertClient, LogSearchError, MetricAlert, MetricAlertClient, MonitorError,
};

/// In-memory metric alerts; names in `broken` fail the lookup
#[derive(Clone, Default)]
pub struct FakeMetricAlerts {
    pub alerts: Arc<Mutex<HashMap<String, MetricAlert>>>,
    pub broken: Arc<Mutex<HashSet<String>>>,
    pub reject_writes: bool,
    pub lookups: Arc<Mutex<Vec<String>>>,
    pub writes: Arc<Mutex<Vec<(String, bool)>>>,
}

impl FakeMetricAlerts {
    pub fn with(alerts: &[(&str, bool)]) -> Self {
        let fake = Self::default();
        for (name, enabled) in alerts {
            fake.alerts
                .lock()
                .insert(name.to_string(), MetricAlert::new(*name, *enabled));
        }
        fake
    }

    pub fn enabled(&self, name: &str) -> Option<bool> {
        self.alerts.lock().get(name).map(MetricAlert::enabled)
    }
}

#[async_trait]
impl MetricAlertClient for FakeMetricAlerts {
    async fn try_get_metric_alert(
        &self,
        name: &str,
    ) -> Result<Option<MetricAlert>, MonitorError> {
        self.lookups.lock().push(name.to_string());
        if self.broken.lock().contains(name) {
            return Err(MonitorError::Api {
                status: 429,
                message: "TooManyRequests".to_string(),
            });
        }
        Ok(self.alerts.lock().get(name).cloned())
    }

    async fn create_or_update(
        &self,
        name: &str,
        alert: &MetricAlert,
    ) -> Result<MetricAlert, MonitorError> {
        self.writes.lock().push((name.to_string(), alert.enabled()));
        if self.reject_writes {
            return Err(MonitorError::Auth("read-only principal".to_string()));
        }
        self.alerts.lock().insert(name.to_string(), alert.clone());
        Ok(alert.clone())
    }
}

/// Log search alerts that exist by name; others make the update fail
#[derive(Clone, Default)]
pub struct FakeLogSearchAlerts {
    pub disabled: Arc<Mutex<HashMap<String, bool>>>,
    pub calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl FakeLogSearchAlerts {
    pub fn with(alerts: &[(&str, bool)]) -> Self {
        let fake = Self::default();
        for (name, disabled) in alerts {
            fake.disabled.lock().insert(name.to_string(), *disabled);
        }
        fake
    }
}

#[async_trait]
impl LogSearchAlertClient for FakeLogSearchAlerts {
    async fn set_disabled(&self, name: &str, disabled: bool) -> Result<(), LogSearchError> {
        self.calls.lock().push((name.to_string(), disabled));
        match self.disabled.lock().get_mut(name) {
            Some(flag) => {
                *flag = disabled;
                Ok(())
            }
            None => Err(LogSearchError::CommandFailed {
                status: Some(3),
                stderr: "ResourceNotFound".to_string(),
            }),
        }
    }
}
