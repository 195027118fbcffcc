//! Per-alert outcomes of a toggle run

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::Action;

/// How an alert was identified during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertKind {
    /// Found through the metric alert lookup
    Metric { previously_enabled: bool },
    /// Metric lookup came back empty, handled as a log search alert
    LogSearch,
    /// Lookup failed and the alert was left alone
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertResult {
    Updated,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertOutcome {
    pub name: String,
    pub action: Action,
    pub kind: AlertKind,
    pub result: AlertResult,
}

impl AlertOutcome {
    pub fn is_updated(&self) -> bool {
        self.result == AlertResult::Updated
    }
}

impl fmt::Display for AlertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = self.action;
        match (&self.kind, &self.result) {
            (AlertKind::Metric { previously_enabled }, result) => {
                writeln!(
                    f,
                    "{} Metric Alert: {}, Status: {}",
                    action.progressive(),
                    self.name,
                    previously_enabled
                )?;
                match result {
                    AlertResult::Updated => write!(f, "{} Metric Alert: {}", action.past(), self.name),
                    AlertResult::Failed(reason) => write!(
                        f,
                        "Metric Alert could not be {}d: {} ({})",
                        action, self.name, reason
                    ),
                }
            }
            (AlertKind::LogSearch, result) => {
                writeln!(f, "{} Log Search Alert: {}", action.progressive(), self.name)?;
                match result {
                    AlertResult::Updated => {
                        write!(f, "{} Log Search Alert: {}", action.past(), self.name)
                    }
                    AlertResult::Failed(_) => write!(
                        f,
                        "Alert not found or could not be {}d: {}",
                        action, self.name
                    ),
                }
            }
            (AlertKind::Unknown, AlertResult::Failed(reason)) => {
                write!(f, "Could not look up alert {}: {}", self.name, reason)
            }
            (AlertKind::Unknown, AlertResult::Updated) => {
                write!(f, "{} Alert: {}", action.past(), self.name)
            }
        }
    }
}

/// Everything one run did, in configuration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleReport {
    pub action: Action,
    pub resource_group: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<AlertOutcome>,
}

impl ToggleReport {
    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_updated()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.updated()
    }

    pub fn outcome(&self, name: &str) -> Option<&AlertOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn summary(&self) -> String {
        format!("{} updated, {} failed", self.updated(), self.failed())
    }
}
