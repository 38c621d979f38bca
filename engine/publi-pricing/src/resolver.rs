//! Metrics & baseline resolution
//!
//! Fans out to the external collaborators and normalizes what comes back.
//! Deal insights and calibration degrade to "no data" on failure; a missing
//! or non-positive trailing reach average is fatal because no price can be
//! derived without it.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::warn;

use crate::error::{CalculatorError, Result};
use crate::models::{CalibrationSnapshot, DealInsights, ResolvedMetrics, SegmentCpm};
use crate::sources::{
    CalibrationSource, CpmSource, DealInsightSource, PerformanceSource, WindowBucket,
};

/// Default lookback window in days
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

/// Maximum lookback window in days
pub const MAX_LOOKBACK_DAYS: u32 = 365;

/// Everything the pricing computation needs from the outside world
#[derive(Debug, Clone)]
pub struct ResolvedBaseline {
    pub metrics: ResolvedMetrics,
    pub cpm: SegmentCpm,
    pub deal_insights: Option<DealInsights>,
    pub calibration: Option<CalibrationSnapshot>,
}

pub struct BaselineResolver {
    performance: Arc<dyn PerformanceSource>,
    insights: Arc<dyn DealInsightSource>,
    cpm: Arc<dyn CpmSource>,
    calibration: Arc<dyn CalibrationSource>,
}

impl BaselineResolver {
    pub fn new(
        performance: Arc<dyn PerformanceSource>,
        insights: Arc<dyn DealInsightSource>,
        cpm: Arc<dyn CpmSource>,
        calibration: Arc<dyn CalibrationSource>,
    ) -> Self {
        Self { performance, insights, cpm, calibration }
    }

    /// Resolve metrics, CPM, deal insights and (when enabled) the calibration
    /// snapshot for a creator. Reads with no data dependency on each other
    /// are issued concurrently; CPM and calibration need the detected
    /// segment, so they form a second concurrent stage.
    pub async fn resolve(
        &self,
        creator_id: &str,
        lookback_days: Option<u32>,
        calibration_enabled: bool,
        engagement_cap_percent: f64,
    ) -> Result<ResolvedBaseline> {
        let lookback = clamp_lookback(lookback_days);
        let since = Utc::now() - Duration::days(lookback as i64);
        let window = WindowBucket::from_days(lookback);

        let (performance, insights) = tokio::join!(
            self.performance.fetch_trailing_performance(creator_id, since),
            self.insights.fetch_historical_deal_insights(creator_id, window),
        );

        let performance = performance?;
        if !performance.reach_average.is_finite() || performance.reach_average <= 0.0 {
            return Err(CalculatorError::InsufficientMetrics(format!(
                "no positive trailing reach average for creator {} over {} days",
                creator_id, lookback
            )));
        }

        let deal_insights = match insights {
            Ok(data) => Some(data),
            Err(err) => {
                warn!(creator_id, window = window.as_str(), "deal insight fetch failed: {err}");
                None
            }
        };

        let segment = performance.profile_segment.clone();
        let calibration_fut = async {
            if calibration_enabled {
                self.calibration.resolve_calibration_snapshot(creator_id, &segment).await
            } else {
                Ok(None)
            }
        };
        let (cpm, calibration) =
            tokio::join!(self.cpm.resolve_segment_cpm(&segment), calibration_fut);

        let cpm = cpm?;
        let calibration = match calibration {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(creator_id, segment = %segment, "calibration snapshot fetch failed: {err}");
                None
            }
        };

        Ok(ResolvedBaseline {
            metrics: ResolvedMetrics {
                reach_average: performance.reach_average,
                engagement_percent: normalize_engagement(
                    performance.engagement_rate,
                    engagement_cap_percent,
                ),
                profile_segment: performance.profile_segment,
            },
            cpm,
            deal_insights,
            calibration,
        })
    }
}

/// Clamp a lookback window to (0, 365], defaulting to 90 days.
pub fn clamp_lookback(days: Option<u32>) -> u32 {
    match days {
        Some(d) if d >= 1 => d.min(MAX_LOOKBACK_DAYS),
        _ => DEFAULT_LOOKBACK_DAYS,
    }
}

/// Normalize an engagement rate to a percentage in [0, cap]. Values at or
/// below 1.0 are read as fractions, everything else as a percentage already.
pub fn normalize_engagement(rate: f64, cap_percent: f64) -> f64 {
    if !rate.is_finite() {
        return 0.0;
    }
    let percent = if rate.abs() <= 1.0 { rate * 100.0 } else { rate };
    percent.clamp(0.0, cap_percent)
}
