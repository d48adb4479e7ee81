mod aggregator;
mod cache;
mod merge;

#[cfg(test)]
mod test_support;

pub use crate::aggregator::{StatsAggregator, DEFAULT_FETCH_TIMEOUT};
pub use cache::{StatsCache, DEFAULT_TTL_SECONDS};
pub use merge::merge_live_result;
