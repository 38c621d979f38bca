//! Pricing engine orchestration
//!
//! Wires the normalizer, baseline resolver, multiplier composer, value
//! assembler, calibration blender and explanation builder into a single
//! pure-per-call computation. The engine holds no mutable state and is
//! safely invocable concurrently.

use std::sync::Arc;

use chrono::Utc;

use crate::calibration::blend;
use crate::config::CalculatorConfig;
use crate::error::Result;
use crate::explanation::build_explanation;
use crate::models::{AppliedCpm, PubliCalculatorResult, ValueBreakdown};
use crate::multipliers::compose;
use crate::params::{CalculatorParamsInput, NormalizedCalculatorParams};
use crate::resolver::BaselineResolver;
use crate::sources::{CalibrationSource, CpmSource, DealInsightSource, PerformanceSource};
use crate::valuation::assemble;

pub struct PricingEngine {
    config: CalculatorConfig,
    resolver: BaselineResolver,
}

impl PricingEngine {
    pub fn new(
        config: CalculatorConfig,
        performance: Arc<dyn PerformanceSource>,
        insights: Arc<dyn DealInsightSource>,
        cpm: Arc<dyn CpmSource>,
        calibration: Arc<dyn CalibrationSource>,
    ) -> Self {
        Self { config, resolver: BaselineResolver::new(performance, insights, cpm, calibration) }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Price a deal for a creator. Produces a fresh result per call and
    /// performs no writes; on error nothing partial is returned.
    pub async fn calculate(
        &self,
        creator_id: &str,
        lookback_days: Option<u32>,
        raw: &CalculatorParamsInput,
    ) -> Result<PubliCalculatorResult> {
        let params = NormalizedCalculatorParams::from_input(raw);

        let baseline = self
            .resolver
            .resolve(
                creator_id,
                lookback_days,
                self.config.features.calibration_enabled,
                self.config.valuation.engagement_cap_percent,
            )
            .await?;

        let composed = compose(&params, baseline.metrics.engagement_percent, &self.config);
        let components = assemble(
            &params,
            baseline.metrics.reach_average,
            baseline.cpm.value,
            composed.common,
            &self.config,
        )?;
        let calibrated =
            blend(&params, &components, baseline.calibration.as_ref(), &self.config);

        let cpm = AppliedCpm { value: baseline.cpm.value, source: baseline.cpm.source };
        let explanation = build_explanation(
            &params,
            &baseline.metrics,
            &cpm,
            &composed,
            &components,
            &calibrated,
            baseline.deal_insights.as_ref(),
            &self.config,
        );

        Ok(PubliCalculatorResult {
            legacy_format: params.legacy_format().to_string(),
            metrics: baseline.metrics,
            params,
            prices: calibrated.prices,
            breakdown: ValueBreakdown {
                base_value: components.base_value,
                content_units: components.content_units,
                coverage_units: components.coverage_units,
                content_justo: components.content_justo,
                event_presence_justo: components.event_presence_justo,
                coverage_justo: components.coverage_justo,
                logistics_cost: components.logistics_cost,
                valor_justo_base: components.total(),
            },
            cpm,
            calibration: calibrated.report,
            deal_insights: baseline.deal_insights,
            explanation,
            calculated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CalibrationSnapshot, ConfidenceBand, CpmOrigin, DealInsights, LinkQuality, SegmentCpm,
        TrailingPerformance,
    };
    use crate::sources::WindowBucket;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    struct FakePerformance {
        reach: f64,
        engagement: f64,
    }

    #[async_trait]
    impl PerformanceSource for FakePerformance {
        async fn fetch_trailing_performance(
            &self,
            _creator_id: &str,
            _since: DateTime<Utc>,
        ) -> anyhow::Result<TrailingPerformance> {
            Ok(TrailingPerformance {
                reach_average: self.reach,
                engagement_rate: self.engagement,
                profile_segment: "micro".to_string(),
            })
        }
    }

    struct FakeInsights(Option<DealInsights>);

    #[async_trait]
    impl DealInsightSource for FakeInsights {
        async fn fetch_historical_deal_insights(
            &self,
            _creator_id: &str,
            _window: WindowBucket,
        ) -> anyhow::Result<DealInsights> {
            self.0.clone().ok_or_else(|| anyhow::anyhow!("insight store unavailable"))
        }
    }

    struct FakeCpm(f64);

    #[async_trait]
    impl CpmSource for FakeCpm {
        async fn resolve_segment_cpm(&self, _segment: &str) -> anyhow::Result<SegmentCpm> {
            Ok(SegmentCpm { value: self.0, source: CpmOrigin::Seed })
        }
    }

    struct FakeCalibration(Option<CalibrationSnapshot>);

    #[async_trait]
    impl CalibrationSource for FakeCalibration {
        async fn resolve_calibration_snapshot(
            &self,
            _creator_id: &str,
            _segment: &str,
        ) -> anyhow::Result<Option<CalibrationSnapshot>> {
            Ok(self.0.clone())
        }
    }

    fn engine_with(
        config: CalculatorConfig,
        reach: f64,
        engagement: f64,
        cpm: f64,
        insights: Option<DealInsights>,
        calibration: Option<CalibrationSnapshot>,
    ) -> PricingEngine {
        PricingEngine::new(
            config,
            Arc::new(FakePerformance { reach, engagement }),
            Arc::new(FakeInsights(insights)),
            Arc::new(FakeCpm(cpm)),
            Arc::new(FakeCalibration(calibration)),
        )
    }

    fn reel_request() -> CalculatorParamsInput {
        CalculatorParamsInput {
            format: Some("reels".to_string()),
            image_risk: Some("low".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn reference_scenario_prices_280_210_392() {
        let mut config = CalculatorConfig::default();
        config.features.calibration_enabled = false;

        let engine = engine_with(config, 10_000.0, 0.0, 20.0, None, None);
        let result = engine.calculate("creator-1", None, &reel_request()).await.unwrap();

        assert_eq!(result.prices.justo, 280.0);
        assert_eq!(result.prices.strategic, 210.0);
        assert_eq!(result.prices.premium, 392.0);
        assert_eq!(result.breakdown.valor_justo_base, 280.0);
        assert_eq!(result.calibration.band, ConfidenceBand::High);
        assert!(!result.calibration.range_expanded);
        assert_eq!(result.legacy_format, "reels");
        assert_eq!(result.cpm.source, CpmOrigin::Seed);
    }

    #[tokio::test]
    async fn legacy_format_in_result_agrees_with_params_derivation() {
        let mut config = CalculatorConfig::default();
        config.features.calibration_enabled = false;
        let engine = engine_with(config, 10_000.0, 0.0, 20.0, None, None);
        let result = engine.calculate("creator-1", None, &reel_request()).await.unwrap();
        assert_eq!(result.legacy_format, result.params.legacy_format());
    }

    #[tokio::test]
    async fn calibration_snapshot_scales_and_reports() {
        let config = CalculatorConfig::default();
        let snapshot = CalibrationSnapshot {
            raw_factor: 1.5,
            confidence: 0.55,
            band: ConfidenceBand::Medium,
            segment_sample_size: 22,
            creator_sample_size: 3,
            segment_lookback_days: 180,
            creator_lookback_days: 365,
            link_quality: LinkQuality::Moderate,
        };
        let engine = engine_with(config, 10_000.0, 0.0, 20.0, None, Some(snapshot));
        let result = engine.calculate("creator-1", None, &reel_request()).await.unwrap();

        // raw 1.5 clamps to 1.25: justo = 280 * 1.25
        assert_eq!(result.prices.justo, 350.0);
        assert!(result.calibration.guardrail_applied);
        assert_eq!(result.calibration.raw_factor, 1.5);
        assert_eq!(result.calibration.applied_factor, 1.25);
        assert!(result.calibration.range_expanded);
        // medium spread: 0.7 / 1.5
        assert_eq!(result.prices.strategic, 245.0);
        assert_eq!(result.prices.premium, 525.0);
    }

    #[tokio::test]
    async fn insight_failure_still_prices() {
        let mut config = CalculatorConfig::default();
        config.features.calibration_enabled = false;
        let engine = engine_with(config, 10_000.0, 0.0, 20.0, None, None);
        let result = engine.calculate("creator-1", None, &reel_request()).await.unwrap();
        assert!(result.deal_insights.is_none());
        assert!(!result.explanation.contains("Historical average ticket"));
    }

    #[tokio::test]
    async fn insights_are_echoed_in_result_and_explanation() {
        let mut config = CalculatorConfig::default();
        config.features.calibration_enabled = false;
        let insights = DealInsights { average_deal_value: Some(310.0), total_deals: 12 };
        let engine = engine_with(config, 10_000.0, 0.0, 20.0, Some(insights), None);
        let result = engine.calculate("creator-1", None, &reel_request()).await.unwrap();
        assert_eq!(result.deal_insights.as_ref().unwrap().total_deals, 12);
        assert!(result.explanation.contains("Historical average ticket of 310.00"));
    }

    #[tokio::test]
    async fn zero_reach_fails_without_partial_result() {
        let engine =
            engine_with(CalculatorConfig::default(), 0.0, 0.0, 20.0, None, None);
        let err = engine.calculate("creator-1", None, &reel_request()).await.unwrap_err();
        assert_eq!(err.kind(), "insufficient_metrics");
    }

    #[tokio::test]
    async fn content_without_deliverables_fails() {
        let engine =
            engine_with(CalculatorConfig::default(), 10_000.0, 0.0, 20.0, None, None);
        let raw = CalculatorParamsInput::default();
        let err = engine.calculate("creator-1", None, &raw).await.unwrap_err();
        assert_eq!(err.kind(), "no_deliverables_selected");
    }

    #[tokio::test]
    async fn engagement_fraction_raises_justo() {
        let mut config = CalculatorConfig::default();
        config.features.calibration_enabled = false;
        // 0.05 fraction reads as 5%: engagement factor 1.05
        let engine = engine_with(config, 10_000.0, 0.05, 20.0, None, None);
        let result = engine.calculate("creator-1", None, &reel_request()).await.unwrap();
        assert_eq!(result.metrics.engagement_percent, 5.0);
        assert_eq!(result.prices.justo, 294.0); // 280 * 1.05
    }

    #[tokio::test]
    async fn event_request_prices_presence_and_coverage() {
        let mut config = CalculatorConfig::default();
        config.features.calibration_enabled = false;
        let engine = engine_with(config, 10_000.0, 0.0, 20.0, None, None);
        let raw = CalculatorParamsInput {
            delivery_type: Some("event".to_string()),
            event_duration_hours: Some(2.0),
            hotel_nights: Some(1.0),
            travel_tier: Some("domestic".to_string()),
            image_risk: Some("low".to_string()),
            event_coverage: Some(crate::params::FormatQuantityInput {
                posts: Some(1.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = engine.calculate("creator-1", None, &raw).await.unwrap();
        assert_eq!(result.legacy_format, "event");
        // presence: 200 * 1.0 * 1.15 + 350 = 580; coverage: 200 * 1.0 * 0.8 = 160
        assert_eq!(result.breakdown.event_presence_justo, 580.0);
        assert_eq!(result.breakdown.coverage_justo, 160.0);
        assert_eq!(result.prices.justo, 740.0);
        assert!(result.explanation.contains("Logistics cover 1 hotel nights"));
    }

    #[tokio::test]
    async fn waiver_combination_zeroes_strategic_end_to_end() {
        let mut config = CalculatorConfig::default();
        config.features.calibration_enabled = false;
        let engine = engine_with(config, 10_000.0, 0.0, 20.0, None, None);
        let raw = CalculatorParamsInput {
            format: Some("reels".to_string()),
            allow_strategic_waiver: Some(true),
            brand_size: Some("large".to_string()),
            image_risk: Some("low".to_string()),
            strategic_gain: Some("high".to_string()),
            content_model: Some("standard".to_string()),
            usage_rights: Some("organic".to_string()),
            exclusivity: Some("none".to_string()),
            authority: Some("rising".to_string()),
            ..Default::default()
        };
        let result = engine.calculate("creator-1", None, &raw).await.unwrap();
        assert_eq!(result.prices.strategic, 0.0);
        assert!(result.prices.justo > 0.0);
        assert!(result.explanation.contains("Strategic tier waived"));

        // flipping one qualifying field restores a non-zero strategic tier
        let raw = CalculatorParamsInput {
            exclusivity: Some("thirty_days".to_string()),
            ..raw
        };
        let result = engine.calculate("creator-1", None, &raw).await.unwrap();
        assert!(result.prices.strategic > 0.0);
    }
}
