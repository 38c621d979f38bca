//! Deal parameter records and normalization
//!
//! `CalculatorParamsInput` is the untrusted request shape: every field is
//! optional and enumerated fields arrive as free-form labels. Normalization
//! never fails; unknown labels fall back to documented defaults and quantity
//! fields are truncated and clamped.

use serde::{Deserialize, Serialize};

/// Upper bound for every deliverable quantity
pub const MAX_QUANTITY: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    #[default]
    Content,
    Event,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Content => "content",
            DeliveryType::Event => "event",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("event") => DeliveryType::Event,
            _ => DeliveryType::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusivityTier {
    #[default]
    None,
    ThirtyDays,
    NinetyDays,
    SixMonths,
    TwelveMonths,
}

impl ExclusivityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusivityTier::None => "none",
            ExclusivityTier::ThirtyDays => "thirty_days",
            ExclusivityTier::NinetyDays => "ninety_days",
            ExclusivityTier::SixMonths => "six_months",
            ExclusivityTier::TwelveMonths => "twelve_months",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("thirty_days") => ExclusivityTier::ThirtyDays,
            Some("ninety_days") => ExclusivityTier::NinetyDays,
            Some("six_months") => ExclusivityTier::SixMonths,
            Some("twelve_months") => ExclusivityTier::TwelveMonths,
            _ => ExclusivityTier::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageRights {
    #[default]
    Organic,
    PaidMedia,
    FullBuyout,
}

impl UsageRights {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageRights::Organic => "organic",
            UsageRights::PaidMedia => "paid_media",
            UsageRights::FullBuyout => "full_buyout",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("paid_media") => UsageRights::PaidMedia,
            Some("full_buyout") => UsageRights::FullBuyout,
            _ => UsageRights::Organic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaidMediaDuration {
    #[default]
    ThirtyDays,
    NinetyDays,
    SixMonths,
    TwelveMonths,
}

impl PaidMediaDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidMediaDuration::ThirtyDays => "thirty_days",
            PaidMediaDuration::NinetyDays => "ninety_days",
            PaidMediaDuration::SixMonths => "six_months",
            PaidMediaDuration::TwelveMonths => "twelve_months",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("ninety_days") => PaidMediaDuration::NinetyDays,
            Some("six_months") => PaidMediaDuration::SixMonths,
            Some("twelve_months") => PaidMediaDuration::TwelveMonths,
            _ => PaidMediaDuration::ThirtyDays,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BrandSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrandSize::Small => "small",
            BrandSize::Medium => "medium",
            BrandSize::Large => "large",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("small") => BrandSize::Small,
            Some("large") => BrandSize::Large,
            _ => BrandSize::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRisk {
    Low,
    #[default]
    Medium,
    High,
}

impl ImageRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRisk::Low => "low",
            ImageRisk::Medium => "medium",
            ImageRisk::High => "high",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("low") => ImageRisk::Low,
            Some("high") => ImageRisk::High,
            _ => ImageRisk::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategicGain {
    Low,
    #[default]
    Medium,
    High,
}

impl StrategicGain {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategicGain::Low => "low",
            StrategicGain::Medium => "medium",
            StrategicGain::High => "high",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("low") => StrategicGain::Low,
            Some("high") => StrategicGain::High,
            _ => StrategicGain::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentModel {
    #[default]
    Standard,
    Ugc,
}

impl ContentModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentModel::Standard => "standard",
            ContentModel::Ugc => "ugc",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("ugc") => ContentModel::Ugc,
            _ => ContentModel::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Simple,
    #[default]
    Standard,
    Elaborate,
}

impl ComplexityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityTier::Simple => "simple",
            ComplexityTier::Standard => "standard",
            ComplexityTier::Elaborate => "elaborate",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("simple") => ComplexityTier::Simple,
            Some("elaborate") => ComplexityTier::Elaborate,
            _ => ComplexityTier::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityTier {
    Rising,
    #[default]
    Standard,
    Established,
    Elite,
}

impl AuthorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityTier::Rising => "rising",
            AuthorityTier::Standard => "standard",
            AuthorityTier::Established => "established",
            AuthorityTier::Elite => "elite",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("rising") => AuthorityTier::Rising,
            Some("established") => AuthorityTier::Established,
            Some("elite") => AuthorityTier::Elite,
            _ => AuthorityTier::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalityTier {
    Low,
    #[default]
    Normal,
    Peak,
}

impl SeasonalityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonalityTier::Low => "low",
            SeasonalityTier::Normal => "normal",
            SeasonalityTier::Peak => "peak",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("low") => SeasonalityTier::Low,
            Some("peak") => SeasonalityTier::Peak,
            _ => SeasonalityTier::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDuration {
    TwoHours,
    #[default]
    FourHours,
    EightHours,
}

impl EventDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventDuration::TwoHours => "two_hours",
            EventDuration::FourHours => "four_hours",
            EventDuration::EightHours => "eight_hours",
        }
    }

    pub fn hours(&self) -> u32 {
        match self {
            EventDuration::TwoHours => 2,
            EventDuration::FourHours => 4,
            EventDuration::EightHours => 8,
        }
    }

    fn from_hours(hours: Option<f64>) -> Self {
        match hours {
            Some(h) if h == 2.0 => EventDuration::TwoHours,
            Some(h) if h == 8.0 => EventDuration::EightHours,
            _ => EventDuration::FourHours,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelTier {
    #[default]
    Local,
    Domestic,
    International,
}

impl TravelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelTier::Local => "local",
            TravelTier::Domestic => "domestic",
            TravelTier::International => "international",
        }
    }

    fn parse(label: Option<&str>) -> Self {
        match label {
            Some("domestic") => TravelTier::Domestic,
            Some("international") => TravelTier::International,
            _ => TravelTier::Local,
        }
    }
}

/// Raw per-format quantities as supplied by the caller
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FormatQuantityInput {
    #[serde(default)]
    pub reels: Option<f64>,
    #[serde(default)]
    pub posts: Option<f64>,
    #[serde(default)]
    pub stories: Option<f64>,
}

/// Sanitized per-format quantities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatQuantities {
    pub reels: u32,
    pub posts: u32,
    pub stories: u32,
}

impl FormatQuantities {
    pub fn total(&self) -> u32 {
        self.reels + self.posts + self.stories
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate (format label, quantity) pairs in table order.
    pub fn entries(&self) -> [(&'static str, u32); 3] {
        [("reels", self.reels), ("posts", self.posts), ("stories", self.stories)]
    }

    fn sanitize(raw: Option<&FormatQuantityInput>) -> Self {
        let raw = raw.copied().unwrap_or_default();
        Self {
            reels: sanitize_quantity(raw.reels),
            posts: sanitize_quantity(raw.posts),
            stories: sanitize_quantity(raw.stories),
        }
    }
}

/// Untrusted, partially-specified pricing request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorParamsInput {
    #[serde(default)]
    pub delivery_type: Option<String>,

    /// Legacy single-format request ("reels", "posts", "stories", "package",
    /// "event"); superseded by `format_quantities` when both are present.
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub format_quantities: Option<FormatQuantityInput>,

    #[serde(default)]
    pub event_duration_hours: Option<f64>,
    #[serde(default)]
    pub travel_tier: Option<String>,
    #[serde(default)]
    pub hotel_nights: Option<f64>,
    #[serde(default)]
    pub event_coverage: Option<FormatQuantityInput>,

    #[serde(default)]
    pub exclusivity: Option<String>,
    #[serde(default)]
    pub usage_rights: Option<String>,
    #[serde(default)]
    pub paid_media_duration: Option<String>,

    #[serde(default)]
    pub repost_secondary: Option<bool>,
    #[serde(default)]
    pub cross_platform_collab: Option<bool>,

    #[serde(default)]
    pub brand_size: Option<String>,
    #[serde(default)]
    pub image_risk: Option<String>,
    #[serde(default)]
    pub strategic_gain: Option<String>,
    #[serde(default)]
    pub content_model: Option<String>,
    #[serde(default)]
    pub allow_strategic_waiver: Option<bool>,

    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub authority: Option<String>,
    #[serde(default)]
    pub seasonality: Option<String>,
}

/// Fully resolved deal parameters; every enumerated field is a member of its
/// declared domain and every quantity is in [0, 20].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCalculatorParams {
    pub delivery_type: DeliveryType,
    pub quantities: FormatQuantities,

    pub event_duration: EventDuration,
    pub travel_tier: TravelTier,
    pub hotel_nights: u32,
    pub coverage: FormatQuantities,

    pub exclusivity: ExclusivityTier,
    pub usage_rights: UsageRights,
    pub paid_media_duration: Option<PaidMediaDuration>,

    pub repost_secondary: bool,
    pub cross_platform_collab: bool,

    pub brand_size: BrandSize,
    pub image_risk: ImageRisk,
    pub strategic_gain: StrategicGain,
    pub content_model: ContentModel,
    pub allow_strategic_waiver: bool,

    pub complexity: ComplexityTier,
    pub authority: AuthorityTier,
    pub seasonality: SeasonalityTier,

    /// True when the caller asked for an undifferentiated legacy "package"
    /// rather than explicit per-format quantities.
    pub legacy_package_mode: bool,
}

impl NormalizedCalculatorParams {
    /// Validate and sanitize a raw parameter bag. Never fails.
    pub fn from_input(raw: &CalculatorParamsInput) -> Self {
        let legacy = clean_label(&raw.format);
        let legacy = legacy.as_deref();

        let delivery_type = match DeliveryType::parse(clean_label(&raw.delivery_type).as_deref()) {
            DeliveryType::Event => DeliveryType::Event,
            DeliveryType::Content if legacy == Some("event") => DeliveryType::Event,
            DeliveryType::Content => DeliveryType::Content,
        };

        let explicit_quantities = raw.format_quantities.is_some();
        let mut quantities = FormatQuantities::sanitize(raw.format_quantities.as_ref());

        // Legacy single-format requests seed the generalized quantity model.
        if delivery_type == DeliveryType::Content && !explicit_quantities {
            match legacy {
                Some("reels") => quantities.reels = 1,
                Some("posts") => quantities.posts = 1,
                Some("stories") => quantities.stories = 1,
                _ => {}
            }
        }

        let legacy_package_mode = delivery_type == DeliveryType::Content
            && legacy == Some("package")
            && !explicit_quantities;

        let coverage = if delivery_type == DeliveryType::Event {
            FormatQuantities::sanitize(raw.event_coverage.as_ref())
        } else {
            FormatQuantities::default()
        };

        if delivery_type == DeliveryType::Event {
            quantities = FormatQuantities::default();
        }

        let usage_rights = UsageRights::parse(clean_label(&raw.usage_rights).as_deref());
        let paid_media_duration = if usage_rights == UsageRights::Organic {
            None
        } else {
            Some(PaidMediaDuration::parse(clean_label(&raw.paid_media_duration).as_deref()))
        };

        Self {
            delivery_type,
            quantities,
            event_duration: EventDuration::from_hours(raw.event_duration_hours),
            travel_tier: TravelTier::parse(clean_label(&raw.travel_tier).as_deref()),
            hotel_nights: sanitize_nights(raw.hotel_nights),
            coverage,
            exclusivity: ExclusivityTier::parse(clean_label(&raw.exclusivity).as_deref()),
            usage_rights,
            paid_media_duration,
            repost_secondary: raw.repost_secondary.unwrap_or(false),
            cross_platform_collab: raw.cross_platform_collab.unwrap_or(false),
            brand_size: BrandSize::parse(clean_label(&raw.brand_size).as_deref()),
            image_risk: ImageRisk::parse(clean_label(&raw.image_risk).as_deref()),
            strategic_gain: StrategicGain::parse(clean_label(&raw.strategic_gain).as_deref()),
            content_model: ContentModel::parse(clean_label(&raw.content_model).as_deref()),
            allow_strategic_waiver: raw.allow_strategic_waiver.unwrap_or(false),
            complexity: ComplexityTier::parse(clean_label(&raw.complexity).as_deref()),
            authority: AuthorityTier::parse(clean_label(&raw.authority).as_deref()),
            seasonality: SeasonalityTier::parse(clean_label(&raw.seasonality).as_deref()),
            legacy_package_mode,
        }
    }

    /// Derive the single legacy-format label from the quantity mix. Derived,
    /// never stored, so the label cannot drift from the quantities.
    pub fn legacy_format(&self) -> &'static str {
        if self.delivery_type == DeliveryType::Event {
            return "event";
        }
        if self.legacy_package_mode {
            return "package";
        }
        let mut single: Option<(&'static str, u32)> = None;
        for (label, qty) in self.quantities.entries() {
            if qty > 0 {
                if single.is_some() {
                    return "package";
                }
                single = Some((label, qty));
            }
        }
        match single {
            Some((label, 1)) => label,
            _ => "package",
        }
    }
}

/// Coerce a raw quantity to an integer in [0, 20]: truncate toward zero,
/// treat non-finite or missing values as zero.
fn sanitize_quantity(raw: Option<f64>) -> u32 {
    match raw {
        Some(v) if v.is_finite() => (v.trunc() as i64).clamp(0, MAX_QUANTITY as i64) as u32,
        _ => 0,
    }
}

/// Coerce a hotel-night count to a non-negative integer. Unlike deliverable
/// quantities, nights carry no upper cap.
fn sanitize_nights(raw: Option<f64>) -> u32 {
    match raw {
        Some(v) if v.is_finite() => (v.trunc() as i64).clamp(0, u32::MAX as i64) as u32,
        _ => 0,
    }
}

fn clean_label(raw: &Option<String>) -> Option<String> {
    raw.as_ref().map(|s| s.trim().to_ascii_lowercase()).filter(|s| !s.is_empty())
}
