use super::model::Feature;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuotaConfigError {
    #[error("no daily limit configured for {0}")]
    MissingLimit(Feature),
    #[error("daily limit for {0} must be positive")]
    ZeroLimit(Feature),
    #[error("requests per minute must be positive")]
    ZeroRate,
}

/// Static quota configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct FeatureQuota {
    daily_limits: HashMap<Feature, u32>,
    requests_per_minute: u32,
    ai_enabled: bool,
}

impl FeatureQuota {
    /// Every feature must have a positive limit and the rate ceiling must be
    /// positive.
    pub fn new(
        daily_limits: HashMap<Feature, u32>,
        requests_per_minute: u32,
        ai_enabled: bool,
    ) -> Result<Self, QuotaConfigError> {
        for feature in Feature::ALL {
            match daily_limits.get(&feature) {
                None => return Err(QuotaConfigError::MissingLimit(feature)),
                Some(0) => return Err(QuotaConfigError::ZeroLimit(feature)),
                Some(_) => {}
            }
        }
        if requests_per_minute == 0 {
            return Err(QuotaConfigError::ZeroRate);
        }

        Ok(Self {
            daily_limits,
            requests_per_minute,
            ai_enabled,
        })
    }

    pub fn daily_limit(&self, feature: Feature) -> u32 {
        // Completeness is checked in `new`.
        self.daily_limits.get(&feature).copied().unwrap_or(0)
    }

    /// Requests a single user can have accepted in one day, all features
    /// together
    pub fn total_daily_limit(&self) -> u64 {
        self.daily_limits.values().map(|limit| u64::from(*limit)).sum()
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    /// Minimum gap between two accepted requests of the same user, in whole
    /// seconds. Ceilings above 60 per minute round down to no gap at all.
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs(u64::from(60 / self.requests_per_minute))
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }
}
