use serde::Deserialize;

/// Main configuration structure for Air-Losses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where and how politely to scrape
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Origin that relative archive links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Main listing page
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Delay between archive page fetches (milliseconds)
    #[serde(rename = "politeness-delay")]
    pub politeness_delay: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://index.minfin.com.ua".to_string(),
            start_url: "https://index.minfin.com.ua/ua/russian-invading/casualties/".to_string(),
            politeness_delay: 500,
            request_timeout: 30,
        }
    }
}

/// User agent sent with every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla/5.0".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "air_losses.db".to_string(),
        }
    }
}
