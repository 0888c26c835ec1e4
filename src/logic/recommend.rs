use super::scoring::score_crop;
use crate::models::{
    CropCatalog, CropCategory, CropDefinition, Month, Phase, Recommendation, RecommendationSet,
    Rejection,
};

/// Gate-then-rank engine over a crop catalog.
///
/// A crop is admitted only when the month is one of its planting or harvest
/// months and both climate readings sit inside its tolerance ranges. Admitted
/// crops are ranked by suitability, ties keeping catalog order.
pub struct RecommendationEngine<'a> {
    catalog: &'a CropCatalog,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a CropCatalog) -> Self {
        Self { catalog }
    }

    pub fn recommend(
        &self,
        month: Month,
        avg_rainfall: f64,
        avg_temperature: f64,
    ) -> RecommendationSet {
        let mut set = RecommendationSet::default();

        for category in [
            CropCategory::MonsoonSeason,
            CropCategory::WinterSeason,
            CropCategory::SummerSeason,
        ] {
            let mut ranked: Vec<Recommendation> = self
                .catalog
                .by_category(category)
                .filter_map(|crop| match admit(crop, month, avg_rainfall, avg_temperature) {
                    Ok(rec) => Some(rec),
                    Err(reason) => {
                        tracing::debug!("{} rejected for {}: {}", crop.id, month, reason);
                        None
                    }
                })
                .collect();

            // Stable: equal scores keep catalog order
            ranked.sort_by(|a, b| {
                b.suitability
                    .partial_cmp(&a.suitability)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            set.insert(category, ranked);
        }

        tracing::debug!(
            "{} crops recommended for {} across {} categories",
            set.total(),
            month,
            set.by_category.len()
        );

        set
    }

    /// Gated recommendation for a single crop, if it is in the catalog and admitted.
    pub fn evaluate_crop(
        &self,
        crop_id: &str,
        month: Month,
        avg_rainfall: f64,
        avg_temperature: f64,
    ) -> Option<Recommendation> {
        self.catalog
            .get(crop_id)
            .and_then(|crop| admit(crop, month, avg_rainfall, avg_temperature).ok())
    }

    /// Reason a crop is not admitted, or `None` if it is (or is unknown).
    pub fn explain(
        &self,
        crop_id: &str,
        month: Month,
        avg_rainfall: f64,
        avg_temperature: f64,
    ) -> Option<Rejection> {
        self.catalog
            .get(crop_id)
            .and_then(|crop| admit(crop, month, avg_rainfall, avg_temperature).err())
    }

    pub fn list_crops(&self) -> Vec<(&'a str, &'a str)> {
        self.catalog
            .crops()
            .iter()
            .map(|c| (c.id.as_str(), c.display_name.as_str()))
            .collect()
    }
}

fn admit(
    crop: &CropDefinition,
    month: Month,
    avg_rainfall: f64,
    avg_temperature: f64,
) -> std::result::Result<Recommendation, Rejection> {
    let phase = if crop.plants_in(month) {
        Phase::Planting
    } else if crop.harvests_in(month) {
        Phase::Harvest
    } else {
        return Err(Rejection::OutOfSeason);
    };

    if !crop.rainfall_mm.contains(avg_rainfall) {
        return Err(Rejection::RainfallOutOfRange);
    }
    if !crop.temperature_c.contains(avg_temperature) {
        return Err(Rejection::TemperatureOutOfRange);
    }

    let suitability = score_crop(crop, avg_rainfall, avg_temperature);
    Ok(Recommendation::new(crop.clone(), suitability, phase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crop::tests::crop;

    fn recommend(catalog: &CropCatalog, month: Month, rain: f64, temp: f64) -> RecommendationSet {
        RecommendationEngine::new(catalog).recommend(month, rain, temp)
    }

    fn catalog() -> CropCatalog {
        CropCatalog::new(vec![
            crop(
                "rice",
                CropCategory::MonsoonSeason,
                &[Month::Jun, Month::Jul],
                &[Month::Oct],
                (150.0, 400.0),
                (20.0, 35.0),
            ),
            crop(
                "maize",
                CropCategory::MonsoonSeason,
                &[Month::Jun],
                &[Month::Sep],
                (60.0, 320.0),
                (18.0, 32.0),
            ),
            crop(
                "millet",
                CropCategory::MonsoonSeason,
                &[Month::Jul],
                &[Month::Oct],
                (100.0, 400.0),
                (20.0, 35.0),
            ),
            crop(
                "sorghum",
                CropCategory::MonsoonSeason,
                &[Month::Jul],
                &[Month::Oct],
                (100.0, 400.0),
                (20.0, 35.0),
            ),
            crop(
                "wheat",
                CropCategory::WinterSeason,
                &[Month::Nov],
                &[Month::Mar, Month::Jul],
                (5.0, 75.0),
                (10.0, 25.0),
            ),
            crop(
                "moong",
                CropCategory::SummerSeason,
                &[Month::Mar],
                &[Month::Jun, Month::Jul],
                (5.0, 300.0),
                (25.0, 38.0),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn gate_excludes_out_of_season_and_out_of_range() {
        let catalog = catalog();
        let set = recommend(&catalog, Month::Jul, 280.0, 28.0);

        let monsoon: Vec<_> = set
            .get(CropCategory::MonsoonSeason)
            .unwrap()
            .iter()
            .map(|r| r.crop.id.as_str())
            .collect();
        // maize is out of season in July
        assert!(!monsoon.contains(&"maize"));
        assert!(monsoon.contains(&"rice"));

        // wheat harvests in July but rainfall is far above its range
        assert!(set.get(CropCategory::WinterSeason).is_none());
        assert_eq!(
            RecommendationEngine::new(&catalog).explain("wheat", Month::Jul, 280.0, 28.0),
            Some(Rejection::RainfallOutOfRange)
        );
    }

    #[test]
    fn ranked_descending_with_catalog_order_ties() {
        let catalog = catalog();
        let set = recommend(&catalog, Month::Jul, 250.0, 27.5);
        let ids: Vec<_> = set
            .get(CropCategory::MonsoonSeason)
            .unwrap()
            .iter()
            .map(|r| r.crop.id.as_str())
            .collect();
        // millet and sorghum share ranges and score 5.0; rice sits off its rainfall midpoint
        assert_eq!(ids, vec!["millet", "sorghum", "rice"]);

        let scores: Vec<f64> = set
            .get(CropCategory::MonsoonSeason)
            .unwrap()
            .iter()
            .map(|r| r.suitability)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn phase_reflects_planting_or_harvest() {
        let catalog = catalog();
        let set = recommend(&catalog, Month::Jul, 250.0, 30.0);
        let summer = set.get(CropCategory::SummerSeason).unwrap();
        assert_eq!(summer[0].crop.id, "moong");
        assert_eq!(summer[0].phase, Phase::Harvest);

        let monsoon = set.get(CropCategory::MonsoonSeason).unwrap();
        assert!(monsoon.iter().all(|r| r.phase == Phase::Planting));
    }

    #[test]
    fn empty_categories_are_omitted() {
        let catalog = catalog();
        let set = recommend(&catalog, Month::Jan, 10.0, 5.0);
        assert!(set.is_empty());
        assert_eq!(set.total(), 0);
        for (_, list) in set.iter() {
            assert!(!list.is_empty());
        }
    }

    #[test]
    fn recommend_is_deterministic() {
        let catalog = catalog();
        let first = recommend(&catalog, Month::Jul, 250.0, 27.5);
        let second = recommend(&catalog, Month::Jul, 250.0, 27.5);
        assert_eq!(first, second);
    }

    #[test]
    fn boundaries_are_inclusive() {
        let catalog = catalog();
        let rec = RecommendationEngine::new(&catalog)
            .evaluate_crop("rice", Month::Jun, 150.0, 35.0)
            .unwrap();
        assert!(rec.suitability.abs() < 1e-9);
    }

    #[test]
    fn evaluate_unknown_crop() {
        let catalog = catalog();
        let engine = RecommendationEngine::new(&catalog);
        assert!(engine.evaluate_crop("teff", Month::Jul, 250.0, 27.5).is_none());
        assert!(engine.explain("teff", Month::Jul, 250.0, 27.5).is_none());
        assert_eq!(engine.list_crops().len(), 6);
    }

    #[test]
    fn builtin_catalog_recommends_rice_in_july() {
        let catalog = CropCatalog::builtin().unwrap();
        let set = recommend(&catalog, Month::Jul, 285.0, 27.8);
        let monsoon = set.get(CropCategory::MonsoonSeason).unwrap();
        assert!(monsoon.iter().any(|r| r.crop.id == "rice"));
    }
}
