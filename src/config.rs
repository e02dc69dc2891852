use serde::Deserialize;

use crate::error::{AppError, Result};

/// Environment variables consulted, in order, when no token is configured.
/// `INPUT_TOKEN` is how a CI action receives its `token` input.
const TOKEN_FALLBACK_VARS: &[&str] = &["INPUT_TOKEN", "GITHUB_TOKEN"];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
}

#[derive(Deserialize, Clone, Default)]
pub struct GitHubConfig {
    pub token: Option<String>,
    /// Override for the REST API root, e.g. a GitHub Enterprise host.
    pub api_url: Option<String>,
}

// Manual Debug impl to avoid leaking the token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// The naming convention and workflow the triage checks against.
#[derive(Debug, Deserialize, Clone)]
pub struct VerifyConfig {
    #[serde(default = "default_assignee")]
    pub assignee: String,
    #[serde(default = "default_workflow")]
    pub workflow: String,
    #[serde(default = "default_trigger_event")]
    pub trigger_event: String,
    #[serde(default = "default_runs_per_page")]
    pub runs_per_page: u8,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            assignee: default_assignee(),
            workflow: default_workflow(),
            trigger_event: default_trigger_event(),
            runs_per_page: default_runs_per_page(),
        }
    }
}

fn default_assignee() -> String {
    "josecorella".to_string()
}

fn default_workflow() -> String {
    "verify.yml".to_string()
}

fn default_trigger_event() -> String {
    "release".to_string()
}

fn default_runs_per_page() -> u8 {
    100
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("verify-bot").required(false));
        }

        // Environment variable overrides, e.g. VERIFY_BOT__GITHUB__TOKEN
        builder = builder.add_source(
            config::Environment::with_prefix("VERIFY_BOT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let mut app: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        app.github.token = resolve_token(app.github.token.take(), |var| std::env::var(var).ok());
        app.validate()?;

        Ok(app)
    }

    fn validate(&self) -> Result<()> {
        if self.verify.assignee.trim().is_empty() {
            return Err(AppError::Config("verify.assignee must not be empty".to_string()));
        }
        if self.verify.workflow.trim().is_empty() {
            return Err(AppError::Config("verify.workflow must not be empty".to_string()));
        }
        if !(1..=100).contains(&self.verify.runs_per_page) {
            return Err(AppError::Config(format!(
                "verify.runs_per_page must be between 1 and 100, got {}",
                self.verify.runs_per_page
            )));
        }
        Ok(())
    }

    pub fn github_token(&self) -> Result<&str> {
        self.github.token.as_deref().ok_or_else(|| {
            AppError::Config(
                "No GitHub token configured (set github.token, INPUT_TOKEN or GITHUB_TOKEN)"
                    .to_string(),
            )
        })
    }
}

/// Pick the configured token, or the first non-empty fallback variable.
fn resolve_token(
    configured: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    configured
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            TOKEN_FALLBACK_VARS
                .iter()
                .filter_map(|var| lookup(var))
                .find(|t| !t.trim().is_empty())
        })
}
