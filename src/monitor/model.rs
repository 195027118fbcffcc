//! Metric alert resource as returned by Azure Resource Manager

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `Microsoft.Insights/metricAlerts` resource
///
/// Only `name` and `properties.enabled` are interpreted. Everything else
/// (location, tags, criteria, scopes, actions, ...) is carried through
/// untouched so a read-modify-write does not drop any setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub properties: MetricAlertProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAlertProperties {
    pub enabled: bool,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl MetricAlert {
    /// Minimal alert, mostly useful for tests and fakes
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: None,
            name: name.into(),
            properties: MetricAlertProperties {
                enabled,
                other: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.properties.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.properties.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_modify_write_keeps_unknown_fields() {
        let body = json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Insights/metricAlerts/cpu-high",
            "name": "cpu-high",
            "type": "Microsoft.Insights/metricAlerts",
            "location": "global",
            "tags": { "team": "ops" },
            "properties": {
                "description": "CPU above 90%",
                "severity": 2,
                "enabled": false,
                "scopes": ["/subscriptions/s/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm1"],
                "evaluationFrequency": "PT1M",
                "windowSize": "PT5M"
            }
        });

        let mut alert: MetricAlert = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(alert.name, "cpu-high");
        assert!(!alert.enabled());

        alert.set_enabled(true);
        let written = serde_json::to_value(&alert).unwrap();

        let mut expected = body;
        expected["properties"]["enabled"] = json!(true);
        assert_eq!(written, expected);
    }

    #[test]
    fn test_missing_enabled_is_an_error() {
        let body = json!({ "name": "x", "properties": { "severity": 3 } });
        assert!(serde_json::from_value::<MetricAlert>(body).is_err());
    }
}
