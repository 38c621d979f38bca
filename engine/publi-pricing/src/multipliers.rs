//! Multiplier composition
//!
//! Pure functions over normalized parameters and the multiplier tables.
//! Deterministic for identical input and table version.

use crate::config::{CalculatorConfig, MultiplierTables};
use crate::params::NormalizedCalculatorParams;

/// Combined brand size / image risk / strategic gain / content model effect
#[derive(Debug, Clone, Copy)]
pub struct BrandRiskOutcome {
    pub value: f64,
    pub raw_product: f64,
    pub floor_applied: bool,
}

/// Output of the multiplier composer
#[derive(Debug, Clone, Copy)]
pub struct ComposedMultipliers {
    pub common: f64,
    pub brand_risk_strategy: BrandRiskOutcome,
    pub engagement_factor: f64,
}

/// Compose the brand-risk/strategy multiplier. Disabled by feature flag it
/// is neutral; otherwise the raw product is held to the image-risk floor.
pub fn compose_brand_risk(
    params: &NormalizedCalculatorParams,
    config: &CalculatorConfig,
) -> BrandRiskOutcome {
    if !config.features.brand_risk_enabled {
        return BrandRiskOutcome { value: 1.0, raw_product: 1.0, floor_applied: false };
    }

    let tables = &config.tables;
    let raw_product = MultiplierTables::factor(&tables.brand_size, params.brand_size.as_str())
        * MultiplierTables::factor(&tables.image_risk, params.image_risk.as_str())
        * MultiplierTables::factor(&tables.strategic_gain, params.strategic_gain.as_str())
        * MultiplierTables::factor(&tables.content_model, params.content_model.as_str());

    match tables.risk_floor(params.image_risk.as_str()) {
        Some(floor) if raw_product < floor => {
            BrandRiskOutcome { value: floor, raw_product, floor_applied: true }
        }
        _ => BrandRiskOutcome { value: raw_product, raw_product, floor_applied: false },
    }
}

/// Compose the common multiplier from every applicable deal factor plus the
/// engagement factor `1 + engagement_percent / 100`.
pub fn compose(
    params: &NormalizedCalculatorParams,
    engagement_percent: f64,
    config: &CalculatorConfig,
) -> ComposedMultipliers {
    let tables = &config.tables;
    let brand_risk_strategy = compose_brand_risk(params, config);
    let engagement_factor = 1.0 + engagement_percent / 100.0;

    let paid_media = params
        .paid_media_duration
        .map(|d| MultiplierTables::factor(&tables.paid_media, d.as_str()))
        .unwrap_or(1.0);
    let repost = if params.repost_secondary { tables.repost } else { 1.0 };

    let common = MultiplierTables::factor(&tables.exclusivity, params.exclusivity.as_str())
        * MultiplierTables::factor(&tables.usage_rights, params.usage_rights.as_str())
        * paid_media
        * repost
        * brand_risk_strategy.value
        * MultiplierTables::factor(&tables.complexity, params.complexity.as_str())
        * MultiplierTables::factor(&tables.authority, params.authority.as_str())
        * MultiplierTables::factor(&tables.seasonality, params.seasonality.as_str())
        * engagement_factor;

    ComposedMultipliers { common, brand_risk_strategy, engagement_factor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{
        BrandSize, ContentModel, ExclusivityTier, ImageRisk, NormalizedCalculatorParams,
        StrategicGain, UsageRights,
    };

    fn neutral_params() -> NormalizedCalculatorParams {
        NormalizedCalculatorParams { image_risk: ImageRisk::Low, ..Default::default() }
    }

    #[test]
    fn neutral_input_composes_to_one() {
        let config = CalculatorConfig::default();
        let composed = compose(&neutral_params(), 0.0, &config);
        assert_eq!(composed.common, 1.0);
        assert_eq!(composed.engagement_factor, 1.0);
        assert!(!composed.brand_risk_strategy.floor_applied);
    }

    #[test]
    fn engagement_factor_scales_common() {
        let config = CalculatorConfig::default();
        let composed = compose(&neutral_params(), 5.0, &config);
        assert_eq!(composed.engagement_factor, 1.05);
        assert_eq!(composed.common, 1.05);
    }

    #[test]
    fn high_risk_floor_is_enforced() {
        let config = CalculatorConfig::default();
        // small brand + ugc model + high gain drags the product below the
        // high-risk floor of 1.2
        let params = NormalizedCalculatorParams {
            brand_size: BrandSize::Small,
            image_risk: ImageRisk::High,
            strategic_gain: StrategicGain::High,
            content_model: ContentModel::Ugc,
            ..Default::default()
        };
        let outcome = compose_brand_risk(&params, &config);
        assert!(outcome.raw_product < 1.2);
        assert_eq!(outcome.value, 1.2);
        assert!(outcome.floor_applied);
    }

    #[test]
    fn floor_does_not_lower_a_higher_product() {
        let config = CalculatorConfig::default();
        let params = NormalizedCalculatorParams {
            brand_size: BrandSize::Large,
            image_risk: ImageRisk::High,
            ..Default::default()
        };
        let outcome = compose_brand_risk(&params, &config);
        assert!(outcome.value > 1.2);
        assert_eq!(outcome.value, outcome.raw_product);
        assert!(!outcome.floor_applied);
    }

    #[test]
    fn low_risk_has_no_floor() {
        let config = CalculatorConfig::default();
        let params = NormalizedCalculatorParams {
            brand_size: BrandSize::Small,
            image_risk: ImageRisk::Low,
            strategic_gain: StrategicGain::High,
            content_model: ContentModel::Ugc,
            ..Default::default()
        };
        let outcome = compose_brand_risk(&params, &config);
        assert!(outcome.value < 1.0);
        assert!(!outcome.floor_applied);
    }

    #[test]
    fn feature_flag_disables_brand_risk() {
        let mut config = CalculatorConfig::default();
        config.features.brand_risk_enabled = false;
        let params = NormalizedCalculatorParams {
            brand_size: BrandSize::Large,
            image_risk: ImageRisk::High,
            ..Default::default()
        };
        let outcome = compose_brand_risk(&params, &config);
        assert_eq!(outcome.value, 1.0);
        assert!(!outcome.floor_applied);
    }

    #[test]
    fn single_factor_above_one_strictly_increases_common() {
        let config = CalculatorConfig::default();
        let base = compose(&neutral_params(), 0.0, &config).common;
        let params = NormalizedCalculatorParams {
            exclusivity: ExclusivityTier::NinetyDays,
            ..neutral_params()
        };
        assert!(compose(&params, 0.0, &config).common > base);
    }

    #[test]
    fn organic_skips_paid_media_factor() {
        let config = CalculatorConfig::default();
        let params = NormalizedCalculatorParams {
            usage_rights: UsageRights::Organic,
            paid_media_duration: None,
            ..neutral_params()
        };
        assert_eq!(compose(&params, 0.0, &config).common, 1.0);
    }
}
