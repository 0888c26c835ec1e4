use super::month::{Month, Season};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single table cell. Anything that is not a finite number is kept as
/// `Missing` with its raw text and never takes part in an average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reading {
    Value(f64),
    Missing(String),
}

impl Reading {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Reading::Value(v),
            _ => Reading::Missing(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            Reading::Missing(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    pub year: i32,
    pub values: BTreeMap<String, Reading>,
}

impl ClimateRecord {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            values: BTreeMap::new(),
        }
    }

    /// Numeric reading at `key` (case-insensitive), if present and valid.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values
            .get(&key.to_uppercase())
            .and_then(Reading::value)
    }
}

/// One parsed table: per-year rows in input order, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateSeries {
    pub name: String,
    pub columns: Vec<String>,
    pub records: Vec<ClimateRecord>,
}

impl ClimateSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The trailing `years` records, or all of them if fewer exist.
    pub fn last_years(&self, years: usize) -> &[ClimateRecord] {
        let start = self.records.len().saturating_sub(years);
        &self.records[start..]
    }

    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?.year;
        let last = self.records.last()?.year;
        Some((first, last))
    }
}

/// The four coarse seasonal buckets of the temperature table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureBucket {
    JanFeb,
    MarMay,
    JunSep,
    OctDec,
}

impl TemperatureBucket {
    pub const ALL: [TemperatureBucket; 4] = [
        TemperatureBucket::JanFeb,
        TemperatureBucket::MarMay,
        TemperatureBucket::JunSep,
        TemperatureBucket::OctDec,
    ];

    /// Column label in the temperature table.
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureBucket::JanFeb => "JAN-FEB",
            TemperatureBucket::MarMay => "MAR-MAY",
            TemperatureBucket::JunSep => "JUN-SEP",
            TemperatureBucket::OctDec => "OCT-DEC",
        }
    }

    pub fn for_month(month: Month) -> Self {
        MONTH_BUCKETS[month.index()]
    }

    #[allow(dead_code)]
    pub fn months(&self) -> Vec<Month> {
        Month::ALL
            .iter()
            .copied()
            .filter(|m| Self::for_month(*m) == *self)
            .collect()
    }
}

const MONTH_BUCKETS: [TemperatureBucket; 12] = [
    TemperatureBucket::JanFeb,
    TemperatureBucket::JanFeb,
    TemperatureBucket::MarMay,
    TemperatureBucket::MarMay,
    TemperatureBucket::MarMay,
    TemperatureBucket::JunSep,
    TemperatureBucket::JunSep,
    TemperatureBucket::JunSep,
    TemperatureBucket::JunSep,
    TemperatureBucket::OctDec,
    TemperatureBucket::OctDec,
    TemperatureBucket::OctDec,
];

/// Average of one key over a lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregate {
    pub avg: f64,
    pub sample_years: usize,
}

impl Aggregate {
    pub fn has_data(&self) -> bool {
        self.sample_years > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateAggregate {
    pub month: Month,
    pub avg_rainfall: f64,
    pub avg_temperature: f64,
    pub rainfall_years: usize,
    pub temperature_years: usize,
    /// Smaller of the two per-axis sample counts.
    pub sample_years: usize,
}

impl ClimateAggregate {
    pub fn from_parts(month: Month, rainfall: Aggregate, temperature: Aggregate) -> Self {
        Self {
            month,
            avg_rainfall: rainfall.avg,
            avg_temperature: temperature.avg,
            rainfall_years: rainfall.sample_years,
            temperature_years: temperature.sample_years,
            sample_years: rainfall.sample_years.min(temperature.sample_years),
        }
    }

    pub fn has_data(&self) -> bool {
        self.sample_years > 0
    }
}

/// Long-window climate summary for display alongside recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateOverview {
    pub lookback_years: usize,
    pub months: Vec<ClimateAggregate>,
    pub annual_rainfall: f64,
    pub wettest_month: Option<Month>,
    pub mean_temperature: f64,
    pub target: ClimateAggregate,
    pub target_season: Season,
    pub climate_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_parse_numeric_and_missing() {
        assert_eq!(Reading::parse("12.5"), Reading::Value(12.5));
        assert_eq!(Reading::parse(" 3 "), Reading::Value(3.0));
        assert_eq!(Reading::parse(""), Reading::Missing(String::new()));
        assert_eq!(Reading::parse("NA"), Reading::Missing("NA".into()));
        assert!(Reading::parse("-").value().is_none());
    }

    #[test]
    fn reading_rejects_non_finite() {
        assert!(Reading::parse("NaN").value().is_none());
        assert!(Reading::parse("inf").value().is_none());
    }

    #[test]
    fn bucket_lookup_covers_every_month() {
        assert_eq!(TemperatureBucket::for_month(Month::Jan), TemperatureBucket::JanFeb);
        assert_eq!(TemperatureBucket::for_month(Month::May), TemperatureBucket::MarMay);
        assert_eq!(TemperatureBucket::for_month(Month::Jun), TemperatureBucket::JunSep);
        assert_eq!(TemperatureBucket::for_month(Month::Dec), TemperatureBucket::OctDec);

        let total: usize = TemperatureBucket::ALL.iter().map(|b| b.months().len()).sum();
        assert_eq!(total, 12);
        assert_eq!(TemperatureBucket::JunSep.months().len(), 4);
        assert_eq!(TemperatureBucket::JanFeb.months().len(), 2);
    }

    #[test]
    fn series_last_years_window() {
        let series = ClimateSeries {
            name: "rainfall".into(),
            columns: vec!["JAN".into()],
            records: (2000..2008).map(ClimateRecord::new).collect(),
        };
        let window = series.last_years(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].year, 2005);
        assert_eq!(series.last_years(50).len(), 8);
        assert_eq!(series.year_span(), Some((2000, 2007)));
    }

    #[test]
    fn aggregate_sample_years_is_min_of_axes() {
        let agg = ClimateAggregate::from_parts(
            Month::Jul,
            Aggregate {
                avg: 300.0,
                sample_years: 5,
            },
            Aggregate {
                avg: 28.0,
                sample_years: 3,
            },
        );
        assert_eq!(agg.sample_years, 3);
        assert!(agg.has_data());
    }
}
