use crate::models::{CropDefinition, Month, Range, Season};

pub const CLIMATE_SCORE_BASE: f64 = 5.0;
pub const CLIMATE_SCORE_MAX: f64 = 10.0;

/// Maximum contribution of each climate axis to a crop's suitability.
pub const COMPONENT_MAX: f64 = 2.5;
pub const SUITABILITY_MAX: f64 = 2.0 * COMPONENT_MAX;

/// Overall climate score for a month, in `[0, 10]`.
///
/// Rewards heavy rainfall and temperatures in the 20-30°C band, and adds a
/// bonus when the reading matches the month's season (wet monsoon, cool
/// winter, hot summer).
pub fn score_climate(avg_rainfall: f64, avg_temperature: f64, month: Month) -> f64 {
    let mut score = CLIMATE_SCORE_BASE;

    if avg_rainfall > 200.0 {
        score += 2.0;
    } else if avg_rainfall > 100.0 {
        score += 1.0;
    } else if avg_rainfall < 30.0 {
        score -= 1.0;
    }

    if (20.0..=30.0).contains(&avg_temperature) {
        score += 2.0;
    } else if (15.0..=35.0).contains(&avg_temperature) {
        score += 1.0;
    } else {
        score -= 1.0;
    }

    let in_season = match month.season() {
        Season::Monsoon => avg_rainfall > 100.0,
        Season::Winter => avg_temperature < 25.0,
        Season::Summer => avg_temperature > 25.0,
    };
    if in_season {
        score += 1.0;
    }

    score.clamp(0.0, CLIMATE_SCORE_MAX)
}

/// Closeness of `value` to the midpoint of `range`, in `[0, COMPONENT_MAX]`.
///
/// Full credit at the midpoint, decaying linearly to zero at either
/// boundary and staying at zero beyond it.
pub fn component_score(value: f64, range: &Range) -> f64 {
    let half_width = range.width() / 2.0;
    if half_width <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let distance = (value - range.midpoint()).abs();
    (COMPONENT_MAX - COMPONENT_MAX * distance / half_width).max(0.0)
}

/// Per-crop suitability in `[0, 5]`.
pub fn score_crop(crop: &CropDefinition, avg_rainfall: f64, avg_temperature: f64) -> f64 {
    let rain = component_score(avg_rainfall, &crop.rainfall_mm);
    let temp = component_score(avg_temperature, &crop.temperature_c);
    (rain + temp).clamp(0.0, SUITABILITY_MAX)
}

/// Rounds a suitability score down to half-star steps for display.
pub fn to_half_stars(suitability: f64) -> f64 {
    (suitability.clamp(0.0, SUITABILITY_MAX) * 2.0).floor() / 2.0
}
