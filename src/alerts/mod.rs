//! Enabling and disabling a configured set of alerts
//!
//! Each configured name is looked up as a metric alert first; names that are
//! not metric alerts are updated as log search alerts.

pub mod action;
pub mod config;
pub mod prompt;
pub mod report;
pub mod session;
pub mod toggler;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, ActionError};
pub use config::{ConfigError, LookupPolicy, ToggleConfig};
pub use prompt::{prompt_action, PromptError};
pub use report::{AlertKind, AlertOutcome, AlertResult, ToggleReport};
pub use session::run_interactive;
pub use toggler::AlertToggler;
