//! Result records and collaborator data shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::params::NormalizedCalculatorParams;

/// Aggregated trailing performance report for a creator, as delivered by the
/// metrics collaborator. The engagement rate may arrive as a fraction or as a
/// percentage; the resolver normalizes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailingPerformance {
    pub reach_average: f64,
    pub engagement_rate: f64,
    pub profile_segment: String,
}

/// Where the applied CPM came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpmOrigin {
    Seed,
    Dynamic,
}

impl CpmOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CpmOrigin::Seed => "seed",
            CpmOrigin::Dynamic => "dynamic",
        }
    }
}

/// Baseline CPM resolved for a performance segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentCpm {
    pub value: f64,
    pub source: CpmOrigin,
}

/// Historical deal-value insights for a lookback bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealInsights {
    pub average_deal_value: Option<f64>,
    pub total_deals: u32,
}

/// Coarse classification of how much historical evidence backs the
/// calibration factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::Low => "low",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::High => "high",
        }
    }
}

/// Quality of the link between the calibration evidence and this creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkQuality {
    Strong,
    Moderate,
    Weak,
}

/// Calibration snapshot owned by an external collaborator, consumed read-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSnapshot {
    pub raw_factor: f64,
    /// Confidence score in [0, 1]
    pub confidence: f64,
    pub band: ConfidenceBand,
    pub segment_sample_size: u32,
    pub creator_sample_size: u32,
    pub segment_lookback_days: u32,
    pub creator_lookback_days: u32,
    pub link_quality: LinkQuality,
}

/// Metrics actually used by the computation, after normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedMetrics {
    pub reach_average: f64,
    pub engagement_percent: f64,
    pub profile_segment: String,
}

/// The three price tiers, each >= 0 and rounded to 2 decimal places
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResultPrices {
    pub strategic: f64,
    pub justo: f64,
    pub premium: f64,
}

/// Unit counts and component sub-totals, pre-calibration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValueBreakdown {
    pub base_value: f64,
    pub content_units: f64,
    pub coverage_units: f64,
    pub content_justo: f64,
    pub event_presence_justo: f64,
    pub coverage_justo: f64,
    pub logistics_cost: f64,
    pub valor_justo_base: f64,
}

/// CPM actually applied and its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedCpm {
    pub value: f64,
    pub source: CpmOrigin,
}

/// Calibration transparency block carried on every result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub enabled: bool,
    pub base_value_pre_calibration: f64,
    pub raw_factor: f64,
    pub applied_factor: f64,
    pub guardrail_applied: bool,
    pub confidence: f64,
    pub band: ConfidenceBand,
    /// True whenever the band is below high: the strategic/premium spread was
    /// widened to communicate uncertainty.
    pub range_expanded: bool,
    pub segment_sample_size: u32,
    pub creator_sample_size: u32,
}

/// Output record of the pricing engine. Constructed fresh per call and never
/// mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubliCalculatorResult {
    pub metrics: ResolvedMetrics,
    pub params: NormalizedCalculatorParams,
    /// Derived single-value format label; see
    /// [`NormalizedCalculatorParams::legacy_format`].
    pub legacy_format: String,
    pub prices: ResultPrices,
    pub breakdown: ValueBreakdown,
    pub cpm: AppliedCpm,
    pub calibration: CalibrationReport,
    pub deal_insights: Option<DealInsights>,
    /// Ordered human-readable trace of every factor applied
    pub explanation: String,
    pub calculated_at: DateTime<Utc>,
}
