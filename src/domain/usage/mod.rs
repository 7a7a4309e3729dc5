pub mod error;
pub mod model;
pub mod quota;
pub mod service;
pub mod store;

pub use error::QuotaError;
pub use model::{next_utc_midnight, DailyUsage, Feature, UsageRecord, UsageStats};
pub use quota::{FeatureQuota, QuotaConfigError};
pub use service::QuotaGuard;
pub use store::UsageStore;
