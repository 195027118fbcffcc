//! Sequential enable/disable over the configured alerts

use std::convert::Infallible;

use chrono::Utc;

use super::action::Action;
use super::config::{LookupPolicy, ToggleConfig};
use super::report::{AlertKind, AlertOutcome, AlertResult, ToggleReport};
use crate::monitor::{LogSearchAlertClient, MetricAlertClient};

/// Applies one action to every configured alert, one at a time
pub struct AlertToggler<M, L> {
    metric_alerts: M,
    log_search_alerts: L,
    resource_group: String,
    alert_names: Vec<String>,
    lookup_policy: LookupPolicy,
}

impl<M, L> AlertToggler<M, L>
where
    M: MetricAlertClient,
    L: LogSearchAlertClient,
{
    pub fn new(config: &ToggleConfig, metric_alerts: M, log_search_alerts: L) -> Self {
        Self {
            metric_alerts,
            log_search_alerts,
            resource_group: config.resource_group.clone(),
            alert_names: config.alert_names.clone(),
            lookup_policy: config.lookup_policy,
        }
    }

    pub fn alert_names(&self) -> &[String] {
        &self.alert_names
    }

    /// Toggle every alert and collect the outcomes
    pub async fn run(&self, action: Action) -> ToggleReport {
        match self.run_with(action, |_| Ok::<(), Infallible>(())).await {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }

    /// Toggle every alert, handing each outcome to `on_outcome` as soon as it is known
    ///
    /// Alert failures never stop the run; only an error from `on_outcome` does.
    pub async fn run_with<F, E>(&self, action: Action, mut on_outcome: F) -> Result<ToggleReport, E>
    where
        F: FnMut(&AlertOutcome) -> Result<(), E>,
    {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(self.alert_names.len());

        for name in &self.alert_names {
            let outcome = self.toggle(name, action).await;
            on_outcome(&outcome)?;
            outcomes.push(outcome);
        }

        let report = ToggleReport {
            action,
            resource_group: self.resource_group.clone(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        tracing::info!(
            action = %action,
            resource_group = %self.resource_group,
            updated = report.updated(),
            failed = report.failed(),
            "Toggle run finished"
        );
        Ok(report)
    }

    /// Toggle a single alert by name
    pub async fn toggle(&self, name: &str, action: Action) -> AlertOutcome {
        match self.metric_alerts.try_get_metric_alert(name).await {
            Ok(Some(mut alert)) => {
                let previously_enabled = alert.enabled();
                alert.set_enabled(action.enabled());

                let result = match self.metric_alerts.create_or_update(name, &alert).await {
                    Ok(_) => AlertResult::Updated,
                    Err(e) => {
                        tracing::warn!(alert = %name, error = %e, "Metric alert update failed");
                        AlertResult::Failed(e.to_string())
                    }
                };

                AlertOutcome {
                    name: name.to_string(),
                    action,
                    kind: AlertKind::Metric { previously_enabled },
                    result,
                }
            }
            Ok(None) => self.toggle_log_search(name, action).await,
            Err(e) => match self.lookup_policy {
                LookupPolicy::FallThrough => {
                    tracing::warn!(
                        alert = %name,
                        error = %e,
                        "Metric alert lookup failed, treating as log search alert"
                    );
                    self.toggle_log_search(name, action).await
                }
                LookupPolicy::Strict => {
                    tracing::warn!(alert = %name, error = %e, "Metric alert lookup failed, skipping");
                    AlertOutcome {
                        name: name.to_string(),
                        action,
                        kind: AlertKind::Unknown,
                        result: AlertResult::Failed(e.to_string()),
                    }
                }
            },
        }
    }

    async fn toggle_log_search(&self, name: &str, action: Action) -> AlertOutcome {
        let result = match self
            .log_search_alerts
            .set_disabled(name, action.disabled())
            .await
        {
            Ok(()) => AlertResult::Updated,
            Err(e) => {
                tracing::warn!(alert = %name, error = %e, "Log search alert update failed");
                AlertResult::Failed(e.to_string())
            }
        };

        AlertOutcome {
            name: name.to_string(),
            action,
            kind: AlertKind::LogSearch,
            result,
        }
    }
}
