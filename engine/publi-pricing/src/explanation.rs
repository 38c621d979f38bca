//! Explanation building
//!
//! Renders a deterministic, ordered, human-readable trace of every factor
//! applied. Audit/debugging only; never parsed downstream.

use crate::calibration::CalibratedPrices;
use crate::config::{CalculatorConfig, MultiplierTables};
use crate::models::{AppliedCpm, DealInsights, ResolvedMetrics};
use crate::multipliers::ComposedMultipliers;
use crate::params::{DeliveryType, NormalizedCalculatorParams, TravelTier};
use crate::valuation::FairValueComponents;

/// Build the ordered explanation string for a priced deal.
#[allow(clippy::too_many_arguments)]
pub fn build_explanation(
    params: &NormalizedCalculatorParams,
    metrics: &ResolvedMetrics,
    cpm: &AppliedCpm,
    composed: &ComposedMultipliers,
    components: &FairValueComponents,
    calibrated: &CalibratedPrices,
    deal_insights: Option<&DealInsights>,
    config: &CalculatorConfig,
) -> String {
    let tables = &config.tables;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "CPM of {:.2} ({}) applied for segment {}.",
        cpm.value,
        cpm.source.as_str(),
        metrics.profile_segment
    ));
    lines.push(format!(
        "Trailing reach average of {:.0} yields a base value of {:.2} per unit.",
        metrics.reach_average, components.base_value
    ));
    lines.push(format!(
        "Engagement of {:.2}% applies a factor of x{:.3}.",
        metrics.engagement_percent, composed.engagement_factor
    ));

    match params.delivery_type {
        DeliveryType::Content => {
            lines.push(format!(
                "Content deliverables ({}) total {:.2} weighted units.",
                params.legacy_format(),
                components.content_units
            ));
        }
        DeliveryType::Event => {
            lines.push(format!(
                "Event presence of {} hours with {} travel applies x{:.2} and x{:.2}.",
                params.event_duration.hours(),
                params.travel_tier.as_str(),
                MultiplierTables::factor(&tables.event_duration, params.event_duration.as_str()),
                MultiplierTables::factor(&tables.travel, params.travel_tier.as_str()),
            ));
            if components.coverage_units > 0.0 {
                lines.push(format!(
                    "Event coverage totals {:.2} weighted units at a {:.0}% discount.",
                    components.coverage_units,
                    (1.0 - config.valuation.coverage_discount) * 100.0
                ));
            }
        }
    }

    lines.push(format!(
        "Exclusivity {} applies x{:.2}.",
        params.exclusivity.as_str(),
        MultiplierTables::factor(&tables.exclusivity, params.exclusivity.as_str())
    ));
    lines.push(format!(
        "Usage rights {} apply x{:.2}.",
        params.usage_rights.as_str(),
        MultiplierTables::factor(&tables.usage_rights, params.usage_rights.as_str())
    ));
    if let Some(duration) = params.paid_media_duration {
        lines.push(format!(
            "Paid media for {} applies x{:.2}.",
            duration.as_str(),
            MultiplierTables::factor(&tables.paid_media, duration.as_str())
        ));
    }
    if params.repost_secondary {
        lines.push(format!("Repost to a secondary platform applies x{:.2}.", tables.repost));
    }

    if config.features.brand_risk_enabled {
        let outcome = &composed.brand_risk_strategy;
        let mut line = format!(
            "Brand profile (size {}, image risk {}, strategic gain {}, model {}) applies x{:.3}.",
            params.brand_size.as_str(),
            params.image_risk.as_str(),
            params.strategic_gain.as_str(),
            params.content_model.as_str(),
            outcome.value
        );
        if outcome.floor_applied {
            line.push_str(&format!(
                " Risk floor raised it from x{:.3}.",
                outcome.raw_product
            ));
        }
        lines.push(line);
    }

    lines.push(format!(
        "Complexity {} applies x{:.2}.",
        params.complexity.as_str(),
        MultiplierTables::factor(&tables.complexity, params.complexity.as_str())
    ));
    lines.push(format!(
        "Authority {} applies x{:.2}.",
        params.authority.as_str(),
        MultiplierTables::factor(&tables.authority, params.authority.as_str())
    ));
    lines.push(format!(
        "Seasonality {} applies x{:.2}.",
        params.seasonality.as_str(),
        MultiplierTables::factor(&tables.seasonality, params.seasonality.as_str())
    ));

    let report = &calibrated.report;
    if report.enabled {
        let mut line = format!(
            "Calibration factor x{:.3} applied to a base of {:.2}",
            report.applied_factor, report.base_value_pre_calibration
        );
        if report.guardrail_applied {
            line.push_str(&format!(" (guardrail clamped raw x{:.3})", report.raw_factor));
        }
        line.push('.');
        lines.push(line);
    } else {
        lines.push("Calibration disabled; neutral factor applied.".to_string());
    }

    let mut band_line = format!(
        "Confidence band {} sets strategic x{:.2} and premium x{:.2}.",
        report.band.as_str(),
        calibrated.spread.strategic,
        calibrated.spread.premium
    );
    if report.range_expanded {
        band_line.push_str(" Range expanded due to limited evidence.");
    }
    lines.push(band_line);

    if calibrated.waiver_applied {
        lines.push("Strategic tier waived to 0 for non-monetary value.".to_string());
    }

    if params.delivery_type == DeliveryType::Event
        && (params.hotel_nights > 0 || params.travel_tier != TravelTier::Local)
    {
        lines.push(format!(
            "Logistics cover {} hotel nights totaling {:.2}.",
            params.hotel_nights, components.logistics_cost
        ));
    }

    if let Some(insights) = deal_insights {
        if let Some(average) = insights.average_deal_value {
            lines.push(format!(
                "Historical average ticket of {:.2} across {} deals informed calibration.",
                average, insights.total_deals
            ));
        }
    }

    lines.join(" ")
}
