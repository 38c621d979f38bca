//! Publi Pricing Engine
//!
//! Deterministic sponsorship-pricing core for content creators. Given a
//! creator's trailing performance metrics and a set of deal parameters it
//! computes three price tiers (strategic, justo, premium) plus an ordered
//! audit trail of every factor applied.

pub mod calibration;
pub mod config;
pub mod engine;
pub mod error;
pub mod explanation;
pub mod models;
pub mod multipliers;
pub mod params;
pub mod resolver;
pub mod sources;
pub mod valuation;

pub use config::CalculatorConfig;
pub use engine::PricingEngine;
pub use error::{CalculatorError, Result};
pub use models::{
    CalibrationSnapshot, ConfidenceBand, DealInsights, PubliCalculatorResult, ResultPrices,
    SegmentCpm, TrailingPerformance,
};
pub use params::{CalculatorParamsInput, NormalizedCalculatorParams};
pub use sources::{
    CalibrationSource, CpmSource, DealInsightSource, PerformanceSource, WindowBucket,
};
