//! Calibration blending and tier derivation
//!
//! Applies the bounded historical correction factor to the fair-value
//! components and derives the strategic/premium tiers from the confidence
//! band. The strategic waiver is the only path to a zero strategic tier.

use crate::config::{CalculatorConfig, TierSpread};
use crate::models::{CalibrationReport, CalibrationSnapshot, ConfidenceBand, ResultPrices};
use crate::params::{
    AuthorityTier, BrandSize, ContentModel, ExclusivityTier, ImageRisk,
    NormalizedCalculatorParams, StrategicGain, UsageRights,
};
use crate::valuation::{round2, FairValueComponents};

/// Calibrated prices plus the transparency block
#[derive(Debug, Clone)]
pub struct CalibratedPrices {
    pub prices: ResultPrices,
    pub report: CalibrationReport,
    pub spread: TierSpread,
    pub waiver_applied: bool,
}

/// True only under the exact low-risk/high-authority combination that lets a
/// deal be worth doing for non-monetary reasons.
pub fn waiver_applies(params: &NormalizedCalculatorParams) -> bool {
    params.allow_strategic_waiver
        && params.brand_size == BrandSize::Large
        && params.image_risk == ImageRisk::Low
        && params.strategic_gain == StrategicGain::High
        && params.content_model == ContentModel::Standard
        && params.usage_rights == UsageRights::Organic
        && params.exclusivity == ExclusivityTier::None
        && matches!(params.authority, AuthorityTier::Standard | AuthorityTier::Rising)
}

/// Blend the calibration factor into the fair-value total and derive the
/// three price tiers.
pub fn blend(
    params: &NormalizedCalculatorParams,
    components: &FairValueComponents,
    snapshot: Option<&CalibrationSnapshot>,
    config: &CalculatorConfig,
) -> CalibratedPrices {
    let enabled = config.features.calibration_enabled;
    let base = components.total();

    let (raw_factor, confidence, band, segment_sample, creator_sample) = if !enabled {
        // Neutral factor; the band is forced high so the spread stays tight.
        (1.0, 1.0, ConfidenceBand::High, 0, 0)
    } else {
        match snapshot {
            Some(snap) => {
                let raw = if snap.raw_factor.is_finite() { snap.raw_factor } else { 1.0 };
                (
                    raw,
                    snap.confidence.clamp(0.0, 1.0),
                    snap.band,
                    snap.segment_sample_size,
                    snap.creator_sample_size,
                )
            }
            // Enabled but no evidence: neutral factor, widest spread.
            None => (1.0, 0.0, ConfidenceBand::Low, 0, 0),
        }
    };

    let applied_factor =
        raw_factor.clamp(config.calibration.guardrail_min, config.calibration.guardrail_max);
    let guardrail_applied = applied_factor != raw_factor;

    let justo = round2((base * applied_factor).max(0.0));
    let spread = config.spread_for_band(band);
    let waiver_applied = waiver_applies(params);

    let strategic = if waiver_applied { 0.0 } else { round2(justo * spread.strategic) };
    let premium = round2(justo * spread.premium);

    CalibratedPrices {
        prices: ResultPrices { strategic, justo, premium },
        report: CalibrationReport {
            enabled,
            base_value_pre_calibration: base,
            raw_factor,
            applied_factor,
            guardrail_applied,
            confidence,
            band,
            range_expanded: band != ConfidenceBand::High,
            segment_sample_size: segment_sample,
            creator_sample_size: creator_sample,
        },
        spread,
        waiver_applied,
    }
}
