//! The requested toggle action

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What to do with every configured alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Enable,
    Disable,
}

impl Action {
    /// Parse user input: surrounding whitespace is ignored, case is not significant
    pub fn parse(input: &str) -> Result<Self, ActionError> {
        match input.trim().to_lowercase().as_str() {
            "enable" => Ok(Action::Enable),
            "disable" => Ok(Action::Disable),
            _ => Err(ActionError::Invalid(input.trim().to_string())),
        }
    }

    /// Value for a metric alert's `enabled` property
    pub fn enabled(self) -> bool {
        self == Action::Enable
    }

    /// Value for a log search alert's `disabled` flag
    pub fn disabled(self) -> bool {
        self == Action::Disable
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Enable => "enable",
            Action::Disable => "disable",
        }
    }

    /// "Enabling" / "Disabling"
    pub fn progressive(self) -> &'static str {
        match self {
            Action::Enable => "Enabling",
            Action::Disable => "Disabling",
        }
    }

    /// "Enabled" / "Disabled"
    pub fn past(self) -> &'static str {
        match self {
            Action::Enable => "Enabled",
            Action::Disable => "Disabled",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::parse(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Invalid action '{0}': expected 'enable' or 'disable'")]
    Invalid(String),
}
