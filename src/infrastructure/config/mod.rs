use crate::domain::usage::{Feature, FeatureQuota, QuotaConfigError};
use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    // AI governance
    pub ai_enabled: bool,
    pub daily_limits: HashMap<Feature, u32>,
    pub rate_limit_per_minute: u32,
    pub provider_timeout_secs: u64,
    pub primary_provider: ProviderKind,
    // Providers
    pub groq_api_key: Option<String>,
    pub groq_api_base: String,
    pub groq_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Groq,
    Gemini,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mut daily_limits = HashMap::new();
        for feature in Feature::ALL {
            let key = format!("AI_LIMIT_{}_DAILY", feature);
            let default = match feature {
                Feature::Chat => "50",
                _ => "20",
            };
            daily_limits.insert(feature, parse(&key, &get(&key, default))?);
        }

        let storage_backend = match get("STORAGE_BACKEND", "postgres").to_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres,
            other => bail!("STORAGE_BACKEND must be postgres or memory, got {}", other),
        };

        let primary_provider = match get("AI_PRIMARY_PROVIDER", "groq").to_lowercase().as_str() {
            "groq" => ProviderKind::Groq,
            "gemini" => ProviderKind::Gemini,
            other => bail!("AI_PRIMARY_PROVIDER must be groq or gemini, got {}", other),
        };

        let config = Config {
            host: get("HOST", "0.0.0.0"),
            port: parse("PORT", &get("PORT", "8080"))?,
            log_format: match get("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            storage_backend,
            database_url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            ai_enabled: get("AI_ENABLED", "true").to_lowercase() == "true",
            daily_limits,
            rate_limit_per_minute: parse(
                "AI_RATE_LIMIT_PER_MINUTE",
                &get("AI_RATE_LIMIT_PER_MINUTE", "5"),
            )?,
            provider_timeout_secs: parse(
                "AI_PROVIDER_TIMEOUT_SECS",
                &get("AI_PROVIDER_TIMEOUT_SECS", "30"),
            )?,
            primary_provider,
            groq_api_key: lookup("GROQ_API_KEY").filter(|v| !v.is_empty()),
            groq_api_base: get("GROQ_API_BASE", DEFAULT_GROQ_API_BASE),
            groq_model: get("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|v| !v.is_empty()),
            gemini_api_url: get("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.storage_backend == StorageBackend::Postgres && self.database_url.is_none() {
            bail!("DATABASE_URL is required when STORAGE_BACKEND=postgres");
        }
        if self.ai_enabled && self.groq_api_key.is_none() && self.gemini_api_key.is_none() {
            bail!("at least one of GROQ_API_KEY or GEMINI_API_KEY must be set");
        }
        if self.provider_timeout_secs == 0 {
            bail!("AI_PROVIDER_TIMEOUT_SECS must be positive");
        }
        self.feature_quota()?;
        Ok(())
    }

    pub fn feature_quota(&self) -> Result<FeatureQuota, QuotaConfigError> {
        FeatureQuota::new(
            self.daily_limits.clone(),
            self.rate_limit_per_minute,
            self.ai_enabled,
        )
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Configured providers, primary first
    pub fn provider_order(&self) -> Vec<ProviderKind> {
        let order = match self.primary_provider {
            ProviderKind::Groq => [ProviderKind::Groq, ProviderKind::Gemini],
            ProviderKind::Gemini => [ProviderKind::Gemini, ProviderKind::Groq],
        };
        order
            .into_iter()
            .filter(|kind| match kind {
                ProviderKind::Groq => self.groq_api_key.is_some(),
                ProviderKind::Gemini => self.gemini_api_key.is_some(),
            })
            .collect()
    }
}

fn parse<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {}: {:?}", key, value))
}
