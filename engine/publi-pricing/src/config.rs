//! Configuration for the Publi Pricing Engine
//!
//! Multiplier tables are data, not code: every categorical deal parameter is
//! priced through a label-keyed map seeded in `Default`, so alternate tables
//! can be injected for testing or versioned independently of the logic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ConfidenceBand;

/// Configuration for the pricing engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Feature flags
    pub features: FeatureFlags,

    /// Multiplier tables for categorical deal parameters
    pub tables: MultiplierTables,

    /// Value assembly parameters
    pub valuation: ValuationParameters,

    /// Calibration guardrail and confidence spreads
    pub calibration: CalibrationParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Enable the brand-risk/strategy multiplier block
    pub brand_risk_enabled: bool,

    /// Enable historical calibration blending
    pub calibration_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiplierTables {
    pub exclusivity: HashMap<String, f64>,
    pub usage_rights: HashMap<String, f64>,
    pub paid_media: HashMap<String, f64>,

    /// Multiplier applied when the deal allows reposting to a secondary platform
    pub repost: f64,

    pub brand_size: HashMap<String, f64>,
    pub image_risk: HashMap<String, f64>,

    /// Floors for the brand-risk/strategy product, keyed by image risk.
    /// Absent key means no floor.
    pub image_risk_floor: HashMap<String, f64>,

    pub strategic_gain: HashMap<String, f64>,
    pub content_model: HashMap<String, f64>,
    pub complexity: HashMap<String, f64>,
    pub authority: HashMap<String, f64>,
    pub seasonality: HashMap<String, f64>,
    pub event_duration: HashMap<String, f64>,
    pub travel: HashMap<String, f64>,

    /// Per-format deliverable weights (reels weigh more than stories)
    pub format_weights: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationParameters {
    /// Content units charged for an undifferentiated legacy "package"
    pub package_units: f64,

    /// Discount factor (<1) applied to event-coverage deliverables
    pub coverage_discount: f64,

    /// Flat cost per hotel night for event logistics
    pub hotel_night_cost: f64,

    /// Engagement percentage cap applied before the engagement factor
    pub engagement_cap_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationParameters {
    /// Lower guardrail bound for the calibration factor
    pub guardrail_min: f64,

    /// Upper guardrail bound for the calibration factor
    pub guardrail_max: f64,

    /// Strategic/premium spread per confidence band, keyed by band label
    pub spreads: HashMap<String, TierSpread>,
}

/// Strategic/premium multiplier pair selected by the confidence band
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierSpread {
    pub strategic: f64,
    pub premium: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        let mut exclusivity = HashMap::new();
        exclusivity.insert("none".to_string(), 1.0);
        exclusivity.insert("thirty_days".to_string(), 1.15);
        exclusivity.insert("ninety_days".to_string(), 1.3);
        exclusivity.insert("six_months".to_string(), 1.5);
        exclusivity.insert("twelve_months".to_string(), 1.8);

        let mut usage_rights = HashMap::new();
        usage_rights.insert("organic".to_string(), 1.0);
        usage_rights.insert("paid_media".to_string(), 1.2);
        usage_rights.insert("full_buyout".to_string(), 1.45);

        let mut paid_media = HashMap::new();
        paid_media.insert("thirty_days".to_string(), 1.1);
        paid_media.insert("ninety_days".to_string(), 1.25);
        paid_media.insert("six_months".to_string(), 1.4);
        paid_media.insert("twelve_months".to_string(), 1.6);

        let mut brand_size = HashMap::new();
        brand_size.insert("small".to_string(), 0.9);
        brand_size.insert("medium".to_string(), 1.0);
        brand_size.insert("large".to_string(), 1.15);

        let mut image_risk = HashMap::new();
        image_risk.insert("low".to_string(), 1.0);
        image_risk.insert("medium".to_string(), 1.1);
        image_risk.insert("high".to_string(), 1.3);

        let mut image_risk_floor = HashMap::new();
        image_risk_floor.insert("medium".to_string(), 1.0);
        image_risk_floor.insert("high".to_string(), 1.2);

        let mut strategic_gain = HashMap::new();
        strategic_gain.insert("low".to_string(), 1.1);
        strategic_gain.insert("medium".to_string(), 1.0);
        strategic_gain.insert("high".to_string(), 0.9);

        let mut content_model = HashMap::new();
        content_model.insert("standard".to_string(), 1.0);
        content_model.insert("ugc".to_string(), 0.9);

        let mut complexity = HashMap::new();
        complexity.insert("simple".to_string(), 0.9);
        complexity.insert("standard".to_string(), 1.0);
        complexity.insert("elaborate".to_string(), 1.25);

        let mut authority = HashMap::new();
        authority.insert("rising".to_string(), 0.9);
        authority.insert("standard".to_string(), 1.0);
        authority.insert("established".to_string(), 1.15);
        authority.insert("elite".to_string(), 1.35);

        let mut seasonality = HashMap::new();
        seasonality.insert("low".to_string(), 0.95);
        seasonality.insert("normal".to_string(), 1.0);
        seasonality.insert("peak".to_string(), 1.15);

        let mut event_duration = HashMap::new();
        event_duration.insert("two_hours".to_string(), 1.0);
        event_duration.insert("four_hours".to_string(), 1.6);
        event_duration.insert("eight_hours".to_string(), 2.5);

        let mut travel = HashMap::new();
        travel.insert("local".to_string(), 1.0);
        travel.insert("domestic".to_string(), 1.15);
        travel.insert("international".to_string(), 1.35);

        let mut format_weights = HashMap::new();
        format_weights.insert("reels".to_string(), 1.4);
        format_weights.insert("posts".to_string(), 1.0);
        format_weights.insert("stories".to_string(), 0.5);

        let mut spreads = HashMap::new();
        spreads.insert("high".to_string(), TierSpread { strategic: 0.75, premium: 1.4 });
        spreads.insert("medium".to_string(), TierSpread { strategic: 0.7, premium: 1.5 });
        spreads.insert("low".to_string(), TierSpread { strategic: 0.65, premium: 1.6 });

        Self {
            features: FeatureFlags { brand_risk_enabled: true, calibration_enabled: true },
            tables: MultiplierTables {
                exclusivity,
                usage_rights,
                paid_media,
                repost: 1.1,
                brand_size,
                image_risk,
                image_risk_floor,
                strategic_gain,
                content_model,
                complexity,
                authority,
                seasonality,
                event_duration,
                travel,
                format_weights,
            },
            valuation: ValuationParameters {
                package_units: 2.5,
                coverage_discount: 0.8,
                hotel_night_cost: 350.0,
                engagement_cap_percent: 25.0,
            },
            calibration: CalibrationParameters {
                guardrail_min: 0.75,
                guardrail_max: 1.25,
                spreads,
            },
        }
    }
}

impl CalculatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("PUBLI_BRAND_RISK_ENABLED") {
            config.features.brand_risk_enabled = v.parse().unwrap_or(true);
        }

        if let Ok(v) = std::env::var("PUBLI_CALIBRATION_ENABLED") {
            config.features.calibration_enabled = v.parse().unwrap_or(true);
        }

        if let Ok(v) = std::env::var("PUBLI_GUARDRAIL_MIN") {
            config.calibration.guardrail_min = v.parse().unwrap_or(0.75);
        }

        if let Ok(v) = std::env::var("PUBLI_GUARDRAIL_MAX") {
            config.calibration.guardrail_max = v.parse().unwrap_or(1.25);
        }

        if let Ok(v) = std::env::var("PUBLI_HOTEL_NIGHT_COST") {
            config.valuation.hotel_night_cost = v.parse().unwrap_or(350.0);
        }

        config
    }

    /// Get the spread pair for a confidence band, falling back to the
    /// neutral high-confidence spread for unknown labels.
    pub fn spread_for_band(&self, band: ConfidenceBand) -> TierSpread {
        self.calibration
            .spreads
            .get(band.as_str())
            .copied()
            .unwrap_or(TierSpread { strategic: 0.75, premium: 1.4 })
    }
}

impl MultiplierTables {
    /// Look up a multiplier by label; unknown labels are neutral.
    pub fn factor(table: &HashMap<String, f64>, label: &str) -> f64 {
        table.get(label).copied().unwrap_or(1.0)
    }

    /// Deliverable weight for a format label; unknown formats carry no weight.
    pub fn format_weight(&self, label: &str) -> f64 {
        self.format_weights.get(label).copied().unwrap_or(0.0)
    }

    /// Brand-risk floor for an image-risk label, if one exists.
    pub fn risk_floor(&self, label: &str) -> Option<f64> {
        self.image_risk_floor.get(label).copied()
    }
}
