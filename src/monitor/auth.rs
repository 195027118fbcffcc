//! Bearer token for Azure Resource Manager

use std::fmt;
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::OnceCell;

use crate::alerts::ToggleConfig;

/// Environment variable holding a pre-issued management token
pub const ACCESS_TOKEN_VAR: &str = "AZURE_ACCESS_TOKEN";

#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Management token resolved on first use and reused for the rest of the run
///
/// Uses `AZURE_ACCESS_TOKEN` when set, otherwise asks the CLI the user is
/// already logged in with (`az account get-access-token`). A failed attempt
/// is not cached; the next request tries again.
#[derive(Debug)]
pub struct TokenProvider {
    env_token: Option<AccessToken>,
    cli_program: String,
    resource: String,
    token: OnceCell<AccessToken>,
}

impl TokenProvider {
    pub fn new(config: &ToggleConfig, env_token: Option<String>) -> Self {
        Self {
            env_token: env_token
                .filter(|t| !t.trim().is_empty())
                .map(|t| AccessToken::new(t.trim())),
            cli_program: config.cli_program.clone(),
            resource: format!("{}/", config.management_endpoint.trim_end_matches('/')),
            token: OnceCell::new(),
        }
    }

    /// Provider reading `AZURE_ACCESS_TOKEN` from the process environment
    pub fn from_config(config: &ToggleConfig) -> Self {
        Self::new(config, std::env::var(ACCESS_TOKEN_VAR).ok())
    }

    /// Provider that always hands out `token`
    pub fn fixed(token: AccessToken) -> Self {
        Self {
            env_token: None,
            cli_program: String::new(),
            resource: String::new(),
            token: OnceCell::from(token),
        }
    }

    pub async fn token(&self) -> Result<&AccessToken, AuthError> {
        self.token.get_or_try_init(|| self.resolve()).await
    }

    async fn resolve(&self) -> Result<AccessToken, AuthError> {
        if let Some(token) = &self.env_token {
            tracing::debug!("Using management token from {}", ACCESS_TOKEN_VAR);
            return Ok(token.clone());
        }

        let output = Command::new(&self.cli_program)
            .args([
                "account",
                "get-access-token",
                "--resource",
                self.resource.as_str(),
                "--query",
                "accessToken",
                "-o",
                "tsv",
            ])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| AuthError::Spawn {
                program: self.cli_program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(AuthError::Cli(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AuthError::Cli("empty access token".to_string()));
        }

        tracing::debug!(program = %self.cli_program, "Obtained management token from CLI");
        Ok(AccessToken::new(token))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Failed to run {program} for an access token: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not obtain an access token (set AZURE_ACCESS_TOKEN or run 'az login'): {0}")]
    Cli(String),
}
