use crate::models::{Aggregate, ClimateAggregate, ClimateSeries, Month, TemperatureBucket};

/// Lookback used for descriptive, long-run climatology.
pub const LONG_LOOKBACK_YEARS: usize = 10;

/// Lookback used for actionable recommendations; favors the recent trend.
pub const SHORT_LOOKBACK_YEARS: usize = 5;

/// Average the numeric readings at `key` over the last `lookback_years`
/// records. Zero valid samples yields `avg = 0, sample_years = 0`.
pub fn aggregate(series: &ClimateSeries, lookback_years: usize, key: &str) -> Aggregate {
    let values: Vec<f64> = series
        .last_years(lookback_years)
        .iter()
        .filter_map(|r| r.get(key))
        .collect();

    if values.is_empty() {
        tracing::debug!(
            "No valid {} samples for {} in the last {} years",
            series.name,
            key,
            lookback_years
        );
        return Aggregate::default();
    }

    Aggregate {
        avg: values.iter().sum::<f64>() / values.len() as f64,
        sample_years: values.len(),
    }
}

/// Monthly rainfall key for `month`.
pub fn rainfall_key(month: Month) -> &'static str {
    month.abbrev()
}

/// Temperature key for `month`. Months sharing a bucket share a reading.
pub fn temperature_key(month: Month) -> &'static str {
    TemperatureBucket::for_month(month).label()
}

pub fn aggregate_month(
    rainfall: &ClimateSeries,
    temperature: &ClimateSeries,
    month: Month,
    lookback_years: usize,
) -> ClimateAggregate {
    let rain = aggregate(rainfall, lookback_years, rainfall_key(month));
    let temp = aggregate(temperature, lookback_years, temperature_key(month));
    ClimateAggregate::from_parts(month, rain, temp)
}

/// Aggregates for all twelve months, January first.
pub fn aggregate_year(
    rainfall: &ClimateSeries,
    temperature: &ClimateSeries,
    lookback_years: usize,
) -> Vec<ClimateAggregate> {
    Month::ALL
        .iter()
        .map(|m| aggregate_month(rainfall, temperature, *m, lookback_years))
        .collect()
}
