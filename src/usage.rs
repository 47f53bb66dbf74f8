use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;

/// Generations allowed before the premium prompt is shown.
pub const FREE_TIER_LIMIT: u32 = 3;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub recipe_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn over_free_tier(&self) -> bool {
        self.recipe_count > FREE_TIER_LIMIT
    }
}

/// Per-user generation counter, kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct UsageTracker {
    records: RwLock<HashMap<String, UsageRecord>>,
}

impl UsageTracker {
    /// Counts one generation for `user_id` and returns the new total.
    pub fn record_generation(&self, user_id: &str) -> u32 {
        let mut records = self.records.write();
        let now = Utc::now();
        let record = records
            .entry(user_id.to_string())
            .or_insert(UsageRecord { recipe_count: 0, updated_at: now });
        record.recipe_count += 1;
        record.updated_at = now;
        record.recipe_count
    }

    pub fn usage(&self, user_id: &str) -> Option<UsageRecord> {
        self.records.read().get(user_id).cloned()
    }
}
