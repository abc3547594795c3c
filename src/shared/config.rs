//! Application configuration. API credentials, endpoints, paths.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// AI API key (e.g., OpenAI). Read from ISSUE_RELAY_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from ISSUE_RELAY_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-4o". Read from ISSUE_RELAY_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Linear API key. Read from LINEAR_API_KEY.
    #[serde(default)]
    pub linear_api_key: Option<String>,

    /// Linear GraphQL endpoint override. Read from LINEAR_API_URL.
    #[serde(default)]
    pub linear_api_url: Option<String>,

    /// Default team ID preselected in the team prompt. Read from LINEAR_TEAM_ID.
    #[serde(default)]
    pub linear_team_id: Option<String>,

    /// Directory for session reports (default "./reports"). Read from ISSUE_RELAY_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("ISSUE_RELAY"));
        if let Ok(path) = std::env::var("ISSUE_RELAY_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // LINEAR_* are read directly (no ISSUE_RELAY_ prefix) so .env can use
        // the same variable names as other Linear tooling.
        if let Ok(s) = std::env::var("LINEAR_API_KEY") {
            if !s.is_empty() {
                cfg.linear_api_key = Some(s);
            }
        }
        if let Ok(s) = std::env::var("LINEAR_API_URL") {
            if !s.is_empty() {
                cfg.linear_api_url = Some(s);
            }
        }
        if let Ok(s) = std::env::var("LINEAR_TEAM_ID") {
            if !s.is_empty() {
                cfg.linear_team_id = Some(s);
            }
        }
        Ok(cfg)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the AI API key if configured.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("ISSUE_RELAY_AI_API_KEY").ok())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-4o" (vision-capable).
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model.clone().unwrap_or_else(|| "gpt-4o".to_string())
    }

    /// Returns true if AI is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Linear Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the Linear API key. Required for startup.
    pub fn linear_api_key(&self) -> Option<String> {
        self.linear_api_key.clone()
    }

    /// Returns the Linear GraphQL endpoint. Defaults to the public API.
    pub fn linear_api_url_or_default(&self) -> String {
        self.linear_api_url
            .clone()
            .unwrap_or_else(|| "https://api.linear.app/graphql".to_string())
    }

    /// Returns the default team ID, if one was configured.
    pub fn linear_team_id(&self) -> Option<String> {
        self.linear_team_id.clone()
    }

    /// Returns the reports directory. Defaults to "./reports".
    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| "./reports".to_string())
    }
}
