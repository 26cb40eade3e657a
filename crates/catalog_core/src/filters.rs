use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("unknown pricing tier {0:?}")]
    UnknownPricingTier(String),
    #[error("minimum rating must be 2, 3 or 4, got {0:?}")]
    InvalidRating(String),
    #[error("unknown search mode {0:?}")]
    UnknownSearchMode(String),
    #[error("category id must not be empty")]
    EmptyCategoryId,
}

/// Pricing model of a tool, as understood by the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    Free,
    Freemium,
    Paid,
    Subscription,
    UsageBased,
    Contact,
    OpenSource,
}

impl PricingTier {
    pub const ALL: [PricingTier; 7] = [
        PricingTier::Free,
        PricingTier::Freemium,
        PricingTier::Paid,
        PricingTier::Subscription,
        PricingTier::UsageBased,
        PricingTier::Contact,
        PricingTier::OpenSource,
    ];

    /// Wire value used in the `pricing` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            PricingTier::Free => "free",
            PricingTier::Freemium => "freemium",
            PricingTier::Paid => "paid",
            PricingTier::Subscription => "subscription",
            PricingTier::UsageBased => "usage_based",
            PricingTier::Contact => "contact",
            PricingTier::OpenSource => "open_source",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PricingTier::Free => "Free",
            PricingTier::Freemium => "Freemium",
            PricingTier::Paid => "Paid",
            PricingTier::Subscription => "Subscription",
            PricingTier::UsageBased => "Usage based",
            PricingTier::Contact => "Contact sales",
            PricingTier::OpenSource => "Open source",
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingTier {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        PricingTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == normalized)
            .ok_or_else(|| FilterParseError::UnknownPricingTier(raw.to_string()))
    }
}

/// Minimum average rating a tool must have ("2+", "3+", "4+").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingThreshold {
    Two,
    Three,
    Four,
}

impl RatingThreshold {
    pub const ALL: [RatingThreshold; 3] = [
        RatingThreshold::Two,
        RatingThreshold::Three,
        RatingThreshold::Four,
    ];

    pub fn value(self) -> u8 {
        match self {
            RatingThreshold::Two => 2,
            RatingThreshold::Three => 3,
            RatingThreshold::Four => 4,
        }
    }
}

impl fmt::Display for RatingThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.value())
    }
}

impl TryFrom<u8> for RatingThreshold {
    type Error = FilterParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(RatingThreshold::Two),
            3 => Ok(RatingThreshold::Three),
            4 => Ok(RatingThreshold::Four),
            other => Err(FilterParseError::InvalidRating(other.to_string())),
        }
    }
}

impl FromStr for RatingThreshold {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits = raw.trim().trim_end_matches('+');
        digits
            .parse::<u8>()
            .map_err(|_| FilterParseError::InvalidRating(raw.to_string()))
            .and_then(RatingThreshold::try_from)
            .map_err(|_| FilterParseError::InvalidRating(raw.to_string()))
    }
}

/// Ranking strategy requested from the backend. Unset means the server default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Keyword,
    Semantic,
    Hybrid,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Keyword => "keyword",
            SearchMode::Semantic => "semantic",
            SearchMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(SearchMode::Keyword),
            "semantic" => Ok(SearchMode::Semantic),
            "hybrid" => Ok(SearchMode::Hybrid),
            _ => Err(FilterParseError::UnknownSearchMode(raw.to_string())),
        }
    }
}

/// Opaque category identifier, forwarded to the backend as-is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(raw: impl Into<String>) -> Result<Self, FilterParseError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FilterParseError::EmptyCategoryId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CategoryId {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        CategoryId::new(raw)
    }
}

/// The independent filter dimensions of a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Facets {
    category: Option<CategoryId>,
    pricing: BTreeSet<PricingTier>,
    min_rating: Option<RatingThreshold>,
}

impl Facets {
    pub fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    /// Selected tiers in a stable order.
    pub fn pricing(&self) -> impl Iterator<Item = PricingTier> + '_ {
        self.pricing.iter().copied()
    }

    pub fn min_rating(&self) -> Option<RatingThreshold> {
        self.min_rating
    }

    pub fn active_count(&self) -> usize {
        usize::from(self.category.is_some())
            + self.pricing.len()
            + usize::from(self.min_rating.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub(crate) fn toggle_category(&mut self, id: CategoryId) {
        toggle_single(&mut self.category, id);
    }

    pub(crate) fn toggle_pricing(&mut self, tier: PricingTier) {
        if !self.pricing.remove(&tier) {
            self.pricing.insert(tier);
        }
    }

    pub(crate) fn toggle_min_rating(&mut self, threshold: RatingThreshold) {
        toggle_single(&mut self.min_rating, threshold);
    }

    pub(crate) fn clear(&mut self) {
        *self = Facets::default();
    }
}

/// Single-select toggle: re-selecting the active value clears it.
pub(crate) fn toggle_single<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}
