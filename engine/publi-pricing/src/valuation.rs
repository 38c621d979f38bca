//! Value assembly
//!
//! Turns the reach-derived base value, the common multiplier and the
//! deliverable mix into the pre-calibration fair-value components.

use crate::config::{CalculatorConfig, MultiplierTables};
use crate::error::{CalculatorError, Result};
use crate::params::{DeliveryType, FormatQuantities, NormalizedCalculatorParams};

/// Pre-calibration fair-value components
#[derive(Debug, Clone, Copy)]
pub struct FairValueComponents {
    pub base_value: f64,
    pub content_units: f64,
    pub coverage_units: f64,
    pub content_justo: f64,
    pub event_presence_justo: f64,
    pub coverage_justo: f64,
    pub logistics_cost: f64,
}

impl FairValueComponents {
    /// `valor_justo_base`: sum of the fair-value components, pre-calibration.
    pub fn total(&self) -> f64 {
        round2(self.content_justo + self.event_presence_justo + self.coverage_justo)
    }
}

/// Round half away from zero to 2 decimal places. Single rounding rule for
/// every price and sub-total in the engine.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn weighted_units(quantities: &FormatQuantities, tables: &MultiplierTables) -> f64 {
    quantities
        .entries()
        .iter()
        .map(|(label, qty)| *qty as f64 * tables.format_weight(label))
        .sum()
}

/// Assemble the fair-value components for a deal.
pub fn assemble(
    params: &NormalizedCalculatorParams,
    reach_average: f64,
    cpm: f64,
    common_multiplier: f64,
    config: &CalculatorConfig,
) -> Result<FairValueComponents> {
    let tables = &config.tables;
    let base_value = reach_average / 1000.0 * cpm;

    match params.delivery_type {
        DeliveryType::Content => {
            let content_units = if params.legacy_package_mode {
                config.valuation.package_units
            } else {
                weighted_units(&params.quantities, tables)
            };
            if content_units <= 0.0 {
                return Err(CalculatorError::NoDeliverablesSelected);
            }
            Ok(FairValueComponents {
                base_value,
                content_units,
                coverage_units: 0.0,
                content_justo: round2(base_value * common_multiplier * content_units),
                event_presence_justo: 0.0,
                coverage_justo: 0.0,
                logistics_cost: 0.0,
            })
        }
        DeliveryType::Event => {
            let duration =
                MultiplierTables::factor(&tables.event_duration, params.event_duration.as_str());
            let travel = MultiplierTables::factor(&tables.travel, params.travel_tier.as_str());
            let logistics_cost =
                params.hotel_nights as f64 * config.valuation.hotel_night_cost;
            let coverage_units = weighted_units(&params.coverage, tables);
            Ok(FairValueComponents {
                base_value,
                content_units: 0.0,
                coverage_units,
                content_justo: 0.0,
                event_presence_justo: round2(
                    base_value * common_multiplier * duration * travel + logistics_cost,
                ),
                coverage_justo: round2(
                    base_value
                        * common_multiplier
                        * coverage_units
                        * config.valuation.coverage_discount,
                ),
                logistics_cost,
            })
        }
    }
}
