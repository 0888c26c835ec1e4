use super::aggregator::{
    aggregate_month, aggregate_year, LONG_LOOKBACK_YEARS, SHORT_LOOKBACK_YEARS,
};
use super::recommend::RecommendationEngine;
use super::scoring::score_climate;
use super::timeline::build_timeline;
use super::timeseries::ClimateTables;
use crate::error::{AdvisorError, Result};
use crate::models::{
    ClimateAggregate, ClimateOverview, CropAssessment, CropCatalog, MaintenanceWindow, Month,
    RecommendationSet, TimelineEntry,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    /// Years averaged for the descriptive overview.
    pub overview_years: usize,
    /// Years averaged for recommendation filtering.
    pub recommendation_years: usize,
    pub maintenance: Vec<MaintenanceWindow>,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            overview_years: LONG_LOOKBACK_YEARS,
            recommendation_years: SHORT_LOOKBACK_YEARS,
            maintenance: MaintenanceWindow::defaults(),
        }
    }
}

/// Everything one invocation produces for a target month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub month: Month,
    /// Short-window aggregate that drove the recommendations.
    pub climate: ClimateAggregate,
    pub recommendations: RecommendationSet,
    pub overview: ClimateOverview,
    pub timeline: Vec<TimelineEntry>,
}

/// Runs the aggregation, scoring and calendar steps over explicit inputs.
/// Holds only the catalog and settings; nothing is cached between calls.
pub struct ClimateAdvisor {
    catalog: CropCatalog,
    settings: AdvisorSettings,
}

impl ClimateAdvisor {
    pub fn new(catalog: CropCatalog, settings: AdvisorSettings) -> Self {
        if catalog.is_empty() {
            tracing::warn!("Crop catalog is empty, nothing will be recommended");
        }
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &AdvisorSettings {
        &self.settings
    }

    /// Short-window aggregate for the month.
    pub fn current_climate(&self, tables: &ClimateTables, month: Month) -> ClimateAggregate {
        aggregate_month(
            &tables.rainfall,
            &tables.temperature,
            month,
            self.settings.recommendation_years,
        )
    }

    pub fn recommend(&self, tables: &ClimateTables, month: Month) -> RecommendationSet {
        let climate = self.current_climate(tables, month);
        if !climate.has_data() {
            tracing::warn!(
                "No climate data for {} in the last {} years",
                month,
                self.settings.recommendation_years
            );
        }
        RecommendationEngine::new(&self.catalog).recommend(
            month,
            climate.avg_rainfall,
            climate.avg_temperature,
        )
    }

    /// Gate a single crop against the short-window climate for the month.
    pub fn assess_crop(
        &self,
        tables: &ClimateTables,
        month: Month,
        crop_id: &str,
    ) -> Result<CropAssessment> {
        if self.catalog.get(crop_id).is_none() {
            return Err(AdvisorError::InvalidData(format!(
                "unknown crop '{}'",
                crop_id
            )));
        }

        let climate = self.current_climate(tables, month);
        let engine = RecommendationEngine::new(&self.catalog);
        let recommendation =
            engine.evaluate_crop(crop_id, month, climate.avg_rainfall, climate.avg_temperature);
        let rejection = engine.explain(crop_id, month, climate.avg_rainfall, climate.avg_temperature);

        Ok(CropAssessment {
            crop_id: crop_id.to_string(),
            month,
            climate,
            recommendation,
            rejection,
        })
    }

    pub fn overview(&self, tables: &ClimateTables, month: Month) -> ClimateOverview {
        let lookback = self.settings.overview_years;
        let months = aggregate_year(&tables.rainfall, &tables.temperature, lookback);

        let with_rain: Vec<&ClimateAggregate> =
            months.iter().filter(|m| m.rainfall_years > 0).collect();
        let annual_rainfall = with_rain.iter().map(|m| m.avg_rainfall).sum::<f64>();
        let wettest_month = with_rain
            .iter()
            .max_by(|a, b| {
                a.avg_rainfall
                    .partial_cmp(&b.avg_rainfall)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|m| m.month);

        let temps: Vec<f64> = months
            .iter()
            .filter(|m| m.temperature_years > 0)
            .map(|m| m.avg_temperature)
            .collect();
        let mean_temperature = if temps.is_empty() {
            0.0
        } else {
            temps.iter().sum::<f64>() / temps.len() as f64
        };

        let target = months[month.index()];
        let climate_score = score_climate(target.avg_rainfall, target.avg_temperature, month);

        ClimateOverview {
            lookback_years: lookback,
            months,
            annual_rainfall,
            wettest_month,
            mean_temperature,
            target,
            target_season: month.season(),
            climate_score,
        }
    }

    pub fn timeline(&self) -> Vec<TimelineEntry> {
        build_timeline(&self.catalog, &self.settings.maintenance)
    }

    pub fn advise(&self, tables: &ClimateTables, month: Month) -> Advisory {
        tracing::info!("Building advisory for {}", month);
        Advisory {
            month,
            climate: self.current_climate(tables, month),
            recommendations: self.recommend(tables, month),
            overview: self.overview(tables, month),
            timeline: self.timeline(),
        }
    }
}
