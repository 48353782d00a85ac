use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default chat-completion endpoint base.
pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Upstream request timeout. A stalled call resolves into the fallback insight.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_TEAM: [&str; 4] = ["Alice", "Bob", "Charlie", "Dave"];

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub deepseek: DeepSeekConfig,
    pub recommendation: RecommendationConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    /// Candidate assignees, picked uniformly at random.
    pub team: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: Secret::new(String::new()),
            base_url: DEFAULT_DEEPSEEK_BASE_URL.to_string(),
            model: DEFAULT_DEEPSEEK_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            team: DEFAULT_TEAM.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

impl AiConfig {
    pub fn load() -> Result<Self, AppError> {
        let mut common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        if let Ok(port) = env::var("PORT") {
            common.port = parse_value("PORT", &port)?;
        }

        let team = parse_team(&get_env(
            "RECOMMEND_TEAM",
            Some(&DEFAULT_TEAM.join(",")),
            is_prod,
        )?)?;

        Ok(AiConfig {
            common,
            deepseek: DeepSeekConfig {
                api_key: Secret::new(get_env("DEEPSEEK_API_KEY", Some(""), is_prod)?),
                base_url: get_env("DEEPSEEK_BASE_URL", Some(DEFAULT_DEEPSEEK_BASE_URL), is_prod)?,
                model: get_env("DEEPSEEK_MODEL", Some(DEFAULT_DEEPSEEK_MODEL), is_prod)?,
                temperature: parse_value(
                    "DEEPSEEK_TEMPERATURE",
                    &get_env(
                        "DEEPSEEK_TEMPERATURE",
                        Some(&DEFAULT_TEMPERATURE.to_string()),
                        is_prod,
                    )?,
                )?,
                timeout_secs: parse_value(
                    "DEEPSEEK_TIMEOUT_SECS",
                    &get_env(
                        "DEEPSEEK_TIMEOUT_SECS",
                        Some(&DEFAULT_TIMEOUT_SECS.to_string()),
                        is_prod,
                    )?,
                )?,
            },
            recommendation: RecommendationConfig { team },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

fn parse_team(raw: &str) -> Result<Vec<String>, AppError> {
    let team: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if team.is_empty() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "RECOMMEND_TEAM must name at least one member"
        )));
    }

    Ok(team)
}
