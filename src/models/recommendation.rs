use super::climate::ClimateAggregate;
use super::crop::{CropCategory, CropDefinition};
use super::month::Month;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Planting,
    Harvest,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Planting => "Planting",
            Phase::Harvest => "Harvest",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub crop: CropDefinition,
    pub suitability: f64,
    pub phase: Phase,
}

impl Recommendation {
    pub fn new(crop: CropDefinition, suitability: f64, phase: Phase) -> Self {
        Self {
            crop,
            suitability,
            phase,
        }
    }

    /// Suitability rounded down to half-star steps.
    pub fn stars(&self) -> f64 {
        crate::logic::scoring::to_half_stars(self.suitability)
    }
}

/// Why a crop was not admitted for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    OutOfSeason,
    RainfallOutOfRange,
    TemperatureOutOfRange,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::OutOfSeason => "not planted or harvested this month",
            Rejection::RainfallOutOfRange => "rainfall outside tolerance",
            Rejection::TemperatureOutOfRange => "temperature outside tolerance",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ranked recommendations keyed by category. Categories with no eligible
/// crop are absent, never present as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub by_category: BTreeMap<CropCategory, Vec<Recommendation>>,
}

impl RecommendationSet {
    pub fn insert(&mut self, category: CropCategory, ranked: Vec<Recommendation>) {
        if !ranked.is_empty() {
            self.by_category.insert(category, ranked);
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, category: CropCategory) -> Option<&[Recommendation]> {
        self.by_category.get(&category).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    pub fn total(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CropCategory, &Vec<Recommendation>)> {
        self.by_category.iter()
    }
}

/// Outcome of gating a single crop against one month's climate. Exactly one
/// of `recommendation` and `rejection` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropAssessment {
    pub crop_id: String,
    pub month: Month,
    pub climate: ClimateAggregate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crop::tests::crop;
    use crate::models::Month;

    #[test]
    fn empty_lists_are_not_inserted() {
        let mut set = RecommendationSet::default();
        set.insert(CropCategory::WinterSeason, Vec::new());
        assert!(set.is_empty());
        assert!(set.get(CropCategory::WinterSeason).is_none());
    }

    #[test]
    fn stars_use_half_steps() {
        let c = crop(
            "wheat",
            CropCategory::WinterSeason,
            &[Month::Nov],
            &[Month::Mar],
            (5.0, 75.0),
            (10.0, 25.0),
        );
        let rec = Recommendation::new(c, 3.9, Phase::Planting);
        assert_eq!(rec.stars(), 3.5);
    }
}
