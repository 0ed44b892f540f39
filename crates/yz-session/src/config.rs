//! Configuration for a divination session.

use chrono::{Local, NaiveDate};
use yz_core::TransformPolicy;

/// Configuration for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Date to cast for. `None` means today's local date.
    pub date: Option<NaiveDate>,
    /// How the transformed hexagram is derived.
    pub transform_policy: TransformPolicy,
}

impl SessionConfig {
    /// Fix the casting date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the transform policy.
    pub fn with_transform_policy(mut self, policy: TransformPolicy) -> Self {
        self.transform_policy = policy;
        self
    }

    /// The date a cast made now would use.
    pub fn cast_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}
