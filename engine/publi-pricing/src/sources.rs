//! External collaborator interfaces
//!
//! The engine consumes these read-only. Retries, caching and transport are
//! the collaborator's responsibility; the engine only decides which failures
//! are fatal and which degrade to neutral defaults.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{CalibrationSnapshot, DealInsights, SegmentCpm, TrailingPerformance};

/// Lookback bucket used for historical deal insights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBucket {
    ThirtyDays,
    NinetyDays,
    All,
}

impl WindowBucket {
    pub fn from_days(days: u32) -> Self {
        if days <= 30 {
            WindowBucket::ThirtyDays
        } else if days <= 90 {
            WindowBucket::NinetyDays
        } else {
            WindowBucket::All
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowBucket::ThirtyDays => "30d",
            WindowBucket::NinetyDays => "90d",
            WindowBucket::All => "all",
        }
    }
}

/// Aggregated reach/engagement reporting for a creator
#[async_trait]
pub trait PerformanceSource: Send + Sync {
    async fn fetch_trailing_performance(
        &self,
        creator_id: &str,
        since: DateTime<Utc>,
    ) -> anyhow::Result<TrailingPerformance>;
}

/// Historical deal-value insights; failures are tolerated
#[async_trait]
pub trait DealInsightSource: Send + Sync {
    async fn fetch_historical_deal_insights(
        &self,
        creator_id: &str,
        window: WindowBucket,
    ) -> anyhow::Result<DealInsights>;
}

/// Baseline CPM for a performance segment
#[async_trait]
pub trait CpmSource: Send + Sync {
    async fn resolve_segment_cpm(&self, profile_segment: &str) -> anyhow::Result<SegmentCpm>;
}

/// Calibration snapshots; absence is tolerated
#[async_trait]
pub trait CalibrationSource: Send + Sync {
    async fn resolve_calibration_snapshot(
        &self,
        creator_id: &str,
        profile_segment: &str,
    ) -> anyhow::Result<Option<CalibrationSnapshot>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bucket_boundaries() {
        assert_eq!(WindowBucket::from_days(1), WindowBucket::ThirtyDays);
        assert_eq!(WindowBucket::from_days(30), WindowBucket::ThirtyDays);
        assert_eq!(WindowBucket::from_days(31), WindowBucket::NinetyDays);
        assert_eq!(WindowBucket::from_days(90), WindowBucket::NinetyDays);
        assert_eq!(WindowBucket::from_days(91), WindowBucket::All);
        assert_eq!(WindowBucket::from_days(365), WindowBucket::All);
        assert_eq!(WindowBucket::All.as_str(), "all");
    }
}
