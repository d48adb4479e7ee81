use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
pub struct TimeStamped<T> {
    pub data: T,
    pub utc_timestamp: DateTime<Utc>,
}

impl<T> TimeStamped<T> {
    pub fn new(data: T, utc_timestamp: DateTime<Utc>) -> Self {
        Self {
            data,
            utc_timestamp,
        }
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.utc_timestamp
    }
}
