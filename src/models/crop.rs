use super::month::Month;
use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const DEFAULT_CATALOG: &str = include_str!("../../config/crops.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CropCategory {
    MonsoonSeason,
    WinterSeason,
    SummerSeason,
}

impl CropCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropCategory::MonsoonSeason => "Monsoon Season (Kharif)",
            CropCategory::WinterSeason => "Winter Season (Rabi)",
            CropCategory::SummerSeason => "Summer Season (Zaid)",
        }
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterDemand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl WaterDemand {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterDemand::Low => "Low",
            WaterDemand::Medium => "Medium",
            WaterDemand::High => "High",
            WaterDemand::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for WaterDemand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed tolerance interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite() && self.max > self.min)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    pub id: String,
    pub display_name: String,
    pub category: CropCategory,
    pub planting_months: BTreeSet<Month>,
    pub harvest_months: BTreeSet<Month>,
    pub rainfall_mm: Range,
    pub temperature_c: Range,
    pub water_demand: WaterDemand,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl CropDefinition {
    pub fn plants_in(&self, month: Month) -> bool {
        self.planting_months.contains(&month)
    }

    pub fn harvests_in(&self, month: Month) -> bool {
        self.harvest_months.contains(&month)
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AdvisorError::InvalidCatalog(format!(
                "crop '{}' has an empty id",
                self.display_name
            )));
        }
        if self.rainfall_mm.is_degenerate() {
            return Err(AdvisorError::InvalidCatalog(format!(
                "crop '{}' rainfall range {} must have max > min",
                self.id, self.rainfall_mm
            )));
        }
        if self.temperature_c.is_degenerate() {
            return Err(AdvisorError::InvalidCatalog(format!(
                "crop '{}' temperature range {} must have max > min",
                self.id, self.temperature_c
            )));
        }
        if self.planting_months.is_empty() || self.harvest_months.is_empty() {
            return Err(AdvisorError::InvalidCatalog(format!(
                "crop '{}' needs at least one planting and one harvest month",
                self.id
            )));
        }
        Ok(())
    }
}

/// Ordered, validated crop catalog. Declaration order is significant: it
/// breaks ranking ties and orders timeline activities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CropCatalog {
    crops: Vec<CropDefinition>,
}

#[derive(Deserialize)]
struct CatalogFile {
    crops: Vec<CropDefinition>,
}

impl CropCatalog {
    pub fn new(crops: Vec<CropDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for crop in &crops {
            crop.validate()?;
            if !seen.insert(crop.id.as_str()) {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "duplicate crop id '{}'",
                    crop.id
                )));
            }
        }
        Ok(Self { crops })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.crops)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AdvisorError::Config(format!("Failed to read catalog {:?}: {}", path, e))
        })?;
        let catalog = Self::from_yaml(&content)?;
        tracing::info!("Loaded {} crops from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// The catalog bundled with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(DEFAULT_CATALOG)
    }

    pub fn crops(&self) -> &[CropDefinition] {
        &self.crops
    }

    pub fn get(&self, id: &str) -> Option<&CropDefinition> {
        self.crops.iter().find(|c| c.id == id)
    }

    pub fn by_category(&self, category: CropCategory) -> impl Iterator<Item = &CropDefinition> {
        self.crops.iter().filter(move |c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn crop(
        id: &str,
        category: CropCategory,
        planting: &[Month],
        harvest: &[Month],
        rainfall: (f64, f64),
        temperature: (f64, f64),
    ) -> CropDefinition {
        CropDefinition {
            id: id.to_string(),
            display_name: id.to_string(),
            category,
            planting_months: planting.iter().copied().collect(),
            harvest_months: harvest.iter().copied().collect(),
            rainfall_mm: Range::new(rainfall.0, rainfall.1),
            temperature_c: Range::new(temperature.0, temperature.1),
            water_demand: WaterDemand::Medium,
            duration: String::new(),
            benefits: Vec::new(),
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = CropCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        for category in [
            CropCategory::MonsoonSeason,
            CropCategory::WinterSeason,
            CropCategory::SummerSeason,
        ] {
            assert!(catalog.by_category(category).count() > 0, "{}", category);
        }
        assert!(catalog.get("rice").is_some());
    }

    #[test]
    fn range_helpers() {
        let r = Range::new(150.0, 400.0);
        assert!((r.midpoint() - 275.0).abs() < 0.001);
        assert!((r.width() - 250.0).abs() < 0.001);
        assert!(r.contains(150.0));
        assert!(r.contains(400.0));
        assert!(!r.contains(400.1));
        assert!(!r.is_degenerate());
        assert!(Range::new(10.0, 10.0).is_degenerate());
        assert!(Range::new(20.0, 10.0).is_degenerate());
    }

    #[test]
    fn catalog_rejects_degenerate_range() {
        let bad = crop(
            "flat",
            CropCategory::SummerSeason,
            &[Month::Mar],
            &[Month::Jun],
            (100.0, 100.0),
            (20.0, 30.0),
        );
        let err = CropCatalog::new(vec![bad]).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidCatalog(_)));
    }

    #[test]
    fn catalog_rejects_empty_months() {
        let bad = crop(
            "nomonths",
            CropCategory::SummerSeason,
            &[],
            &[Month::Jun],
            (100.0, 200.0),
            (20.0, 30.0),
        );
        assert!(CropCatalog::new(vec![bad]).is_err());
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let a = crop(
            "maize",
            CropCategory::MonsoonSeason,
            &[Month::Jun],
            &[Month::Sep],
            (100.0, 200.0),
            (20.0, 30.0),
        );
        let b = a.clone();
        assert!(CropCatalog::new(vec![a, b]).is_err());
    }

    #[test]
    fn catalog_from_yaml_preserves_order() {
        let yaml = r#"
crops:
  - id: b
    display_name: B
    category: WinterSeason
    planting_months: [Nov]
    harvest_months: [Mar]
    rainfall_mm: { min: 10, max: 50 }
    temperature_c: { min: 10, max: 25 }
    water_demand: Low
  - id: a
    display_name: A
    category: WinterSeason
    planting_months: [Oct, Nov]
    harvest_months: [Feb]
    rainfall_mm: { min: 20, max: 60 }
    temperature_c: { min: 12, max: 22 }
    water_demand: Medium
    benefits: [Fixes nitrogen]
"#;
        let catalog = CropCatalog::from_yaml(yaml).unwrap();
        let ids: Vec<_> = catalog.crops().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(catalog.get("a").unwrap().plants_in(Month::Oct));
        assert_eq!(catalog.get("a").unwrap().benefits.len(), 1);
    }

    #[test]
    fn yaml_catalog_goes_through_validation() {
        let yaml = r#"
crops:
  - id: okra
    display_name: Okra
    category: SummerSeason
    planting_months: [Mar]
    harvest_months: [Jun]
    rainfall_mm: { min: 80, max: 80 }
    temperature_c: { min: 22, max: 35 }
    water_demand: Medium
"#;
        let err = CropCatalog::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidCatalog(_)));

        let entry = yaml
            .trim_start()
            .trim_start_matches("crops:\n")
            .replace("80, max: 80", "60, max: 120");
        let duplicated = format!("crops:\n{}{}", entry, entry);
        let err = CropCatalog::from_yaml(&duplicated).unwrap_err();
        assert!(err.to_string().contains("duplicate crop id 'okra'"));
    }
}
