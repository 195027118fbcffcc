//! alert-toggle
//!
//! Run with: cargo run
//!
//! Asks whether to enable or disable the configured alerts, then updates each
//! one in order. Metric alerts go through the management API, everything else
//! is treated as a log search alert and updated with the Azure CLI.
//!
//! Environment variables:
//! - ALERT_TOGGLE_CONFIG: JSON config file (optional)
//! - ALERT_TOGGLE_SUBSCRIPTION_ID: Subscription holding the alerts
//! - ALERT_TOGGLE_RESOURCE_GROUP: Resource group holding the alerts
//! - ALERT_TOGGLE_ALERTS: Comma-separated alert names
//! - ALERT_TOGGLE_ENDPOINT: Management endpoint (default: https://management.azure.com)
//! - ALERT_TOGGLE_CLI: Azure CLI program (default: az)
//! - ALERT_TOGGLE_TIMEOUT_SECS: HTTP timeout (default: 30)
//! - ALERT_TOGGLE_STRICT_LOOKUP: Skip alerts whose metric lookup fails with anything but 404
//! - AZURE_ACCESS_TOKEN: Management token; obtained from `az account get-access-token` on first use when unset
//! - RUST_LOG: Log level (default: alert_toggle=info)

use std::io;

use alert_toggle::alerts::{run_interactive, AlertToggler, ToggleConfig};
use alert_toggle::monitor::{ArmMetricAlertClient, AzCliLogSearchClient, TokenProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, status lines to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alert_toggle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ToggleConfig::from_env()?;

    tracing::info!("alert-toggle configuration:");
    tracing::info!("  Subscription: {}", config.subscription_id);
    tracing::info!("  Resource group: {}", config.resource_group);
    tracing::info!("  Alerts: {}", config.alert_names.len());
    for name in &config.alert_names {
        tracing::info!("    - {}", name);
    }
    tracing::info!("  Lookup policy: {:?}", config.lookup_policy);

    // The management token is fetched lazily, so a credential problem only
    // affects the metric alert lookups
    let toggler = AlertToggler::new(
        &config,
        ArmMetricAlertClient::new(&config, TokenProvider::from_config(&config))?,
        AzCliLogSearchClient::from_config(&config),
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    run_interactive(&toggler, &mut input, &mut stdout).await?;
    Ok(())
}
