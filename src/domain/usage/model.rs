use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// AI-backed operations subject to independent daily quotas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    Chat,
    Flashcards,
    Quiz,
    Summary,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Chat,
        Feature::Flashcards,
        Feature::Quiz,
        Feature::Summary,
    ];

    /// Lowercase key used in configuration and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::Flashcards => "flashcards",
            Feature::Quiz => "quiz",
            Feature::Summary => "summary",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Chat => "CHAT",
            Feature::Flashcards => "FLASHCARDS",
            Feature::Quiz => "QUIZ",
            Feature::Summary => "SUMMARY",
        };
        f.write_str(name)
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chat" => Ok(Feature::Chat),
            "flashcards" => Ok(Feature::Flashcards),
            "quiz" => Ok(Feature::Quiz),
            "summary" => Ok(Feature::Summary),
            other => Err(format!("unknown feature: {}", other)),
        }
    }
}

/// Per-user, per-day usage counters.
///
/// `version` is 0 until the record has been persisted once; every accepted
/// request bumps it, and stores only accept a write whose expected version
/// matches what they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UsageRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub chat_count: i32,
    pub flashcards_count: i32,
    pub quiz_count: i32,
    pub summary_count: i32,
    pub total_requests: i32,
    pub last_request_at: Option<DateTime<Utc>>,
    pub version: i64,
}

impl UsageRecord {
    /// Zero record for a user and day that has not been persisted yet
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            chat_count: 0,
            flashcards_count: 0,
            quiz_count: 0,
            summary_count: 0,
            total_requests: 0,
            last_request_at: None,
            version: 0,
        }
    }

    pub fn count(&self, feature: Feature) -> i32 {
        match feature {
            Feature::Chat => self.chat_count,
            Feature::Flashcards => self.flashcards_count,
            Feature::Quiz => self.quiz_count,
            Feature::Summary => self.summary_count,
        }
    }

    fn count_mut(&mut self, feature: Feature) -> &mut i32 {
        match feature {
            Feature::Chat => &mut self.chat_count,
            Feature::Flashcards => &mut self.flashcards_count,
            Feature::Quiz => &mut self.quiz_count,
            Feature::Summary => &mut self.summary_count,
        }
    }

    /// Apply an accepted request: bump the feature and total counters and
    /// stamp the request time. Does not touch `version`.
    pub fn record_accepted(&mut self, feature: Feature, now: DateTime<Utc>) {
        *self.count_mut(feature) += 1;
        self.total_requests += 1;
        self.last_request_at = Some(now);
    }
}

/// Start of the next UTC day after `now`
pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    (now.date_naive() + Duration::days(1))
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

/// Response for GET /api/ai/usage/stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub chat_remaining: u32,
    pub flashcards_remaining: u32,
    pub quiz_remaining: u32,
    pub summary_remaining: u32,
    pub total_requests_today: u32,
    pub resets_at: DateTime<Utc>,
}

/// One day of the usage history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub chat: i32,
    pub flashcards: i32,
    pub quiz: i32,
    pub summary: i32,
    pub total_requests: i32,
}

impl From<UsageRecord> for DailyUsage {
    fn from(record: UsageRecord) -> Self {
        Self {
            date: record.date,
            chat: record.chat_count,
            flashcards: record.flashcards_count,
            quiz: record.quiz_count,
            summary: record.summary_count,
            total_requests: record.total_requests,
        }
    }
}
