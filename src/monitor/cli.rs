//! Log search alert updates through the Azure CLI

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::LogSearchAlertClient;
use crate::alerts::ToggleConfig;

/// Runs `az monitor scheduled-query update` for each change
#[derive(Debug, Clone)]
pub struct AzCliLogSearchClient {
    program: String,
    resource_group: String,
}

impl AzCliLogSearchClient {
    pub fn new(program: impl Into<String>, resource_group: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            resource_group: resource_group.into(),
        }
    }

    pub fn from_config(config: &ToggleConfig) -> Self {
        Self::new(&config.cli_program, &config.resource_group)
    }

    /// Argument list for one update, without the program name
    pub fn update_args(resource_group: &str, name: &str, disabled: bool) -> Vec<String> {
        vec![
            "monitor".to_string(),
            "scheduled-query".to_string(),
            "update".to_string(),
            "-g".to_string(),
            resource_group.to_string(),
            "-n".to_string(),
            name.to_string(),
            "--disabled".to_string(),
            disabled.to_string(),
        ]
    }
}

#[async_trait]
impl LogSearchAlertClient for AzCliLogSearchClient {
    async fn set_disabled(&self, name: &str, disabled: bool) -> Result<(), LogSearchError> {
        let args = Self::update_args(&self.resource_group, name, disabled);
        tracing::debug!(program = %self.program, ?args, "Running log search alert update");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| LogSearchError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(
                alert = %name,
                resource_group = %self.resource_group,
                status = ?output.status.code(),
                stderr = %stderr,
                "Log search alert update failed"
            );
            return Err(LogSearchError::CommandFailed {
                status: output.status.code(),
                stderr,
            });
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogSearchError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command exited with status {status:?}: {stderr}")]
    CommandFailed { status: Option<i32>, stderr: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_args() {
        assert_eq!(
            AzCliLogSearchClient::update_args("rg-prod", "Failed logins - prod", true),
            vec![
                "monitor",
                "scheduled-query",
                "update",
                "-g",
                "rg-prod",
                "-n",
                "Failed logins - prod",
                "--disabled",
                "true",
            ]
        );
        let args = AzCliLogSearchClient::update_args("rg", "x", false);
        assert_eq!(args.last().map(String::as_str), Some("false"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_decides_outcome() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("calls.log");
        let script = dir.path().join("fake-az");
        std::fs::write(
            &script,
            format!(
                r#"#!/bin/sh
printf '%s|' "$@" >> '{}'
echo >> '{}'
if [ "$7" = "missing" ]; then
  echo "ResourceNotFound" >&2
  exit 3
fi
exit 0
"#,
                log.display(),
                log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let client = AzCliLogSearchClient::new(script.to_str().unwrap(), "rg-prod");

        client.set_disabled("Failed logins - prod", true).await.unwrap();

        let err = client.set_disabled("missing", false).await.unwrap_err();
        match err {
            LogSearchError::CommandFailed { status, stderr } => {
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "ResourceNotFound");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let calls = std::fs::read_to_string(&log).unwrap();
        let calls: Vec<&str> = calls.lines().collect();
        assert_eq!(
            calls,
            vec![
                "monitor|scheduled-query|update|-g|rg-prod|-n|Failed logins - prod|--disabled|true|",
                "monitor|scheduled-query|update|-g|rg-prod|-n|missing|--disabled|false|",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program() {
        let client = AzCliLogSearchClient::new("/nonexistent/az", "rg");
        let err = client.set_disabled("x", true).await.unwrap_err();
        assert!(matches!(err, LogSearchError::Spawn { .. }));
    }
}
