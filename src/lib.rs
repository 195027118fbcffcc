//! alert-toggle: enable or disable a fixed set of Azure Monitor alerts
//!
//! Metric alerts are flipped through the Azure Resource Manager API with a
//! read-modify-write of their `enabled` property. Any configured name that is
//! not a metric alert is treated as a log search (scheduled query) alert and
//! updated with `az monitor scheduled-query update --disabled`.
//!
//! # Example
//!
//! ```no_run
//! use alert_toggle::alerts::{Action, AlertToggler, ToggleConfig};
//! use alert_toggle::monitor::{ArmMetricAlertClient, AzCliLogSearchClient, TokenProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ToggleConfig::from_env()?;
//!
//! // The token is fetched on the first management API call
//! let toggler = AlertToggler::new(
//!     &config,
//!     ArmMetricAlertClient::new(&config, TokenProvider::from_config(&config))?,
//!     AzCliLogSearchClient::from_config(&config),
//! );
//!
//! let report = toggler.run(Action::Disable).await;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod monitor;

// Re-export commonly used types
pub use alerts::{run_interactive, Action, AlertToggler, ToggleConfig, ToggleReport};
pub use monitor::{LogSearchAlertClient, MetricAlertClient};
