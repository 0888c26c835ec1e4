use crate::error::{AdvisorError, Result};
use crate::models::{ClimateRecord, ClimateSeries, Month, Reading, TemperatureBucket};

pub const RAINFALL_TABLE: &str = "rainfall";
pub const TEMPERATURE_TABLE: &str = "temperature";

/// Parse one climate table.
///
/// The first header cell must be `year`; every other header cell becomes an
/// upper-cased value key. Cells that are not finite numbers are kept as
/// missing readings. A missing header or a row whose width differs from the
/// header is a `MalformedTable` error.
pub fn parse_table(name: &str, text: &str) -> Result<ClimateSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AdvisorError::malformed(name, e.to_string()))?
        .clone();

    match headers.get(0) {
        Some(first) if first.eq_ignore_ascii_case("year") => {}
        _ => return Err(AdvisorError::malformed(name, "header row absent")),
    }
    if headers.len() < 2 {
        return Err(AdvisorError::malformed(
            name,
            "header row has no value columns",
        ));
    }

    let columns: Vec<String> = headers.iter().skip(1).map(|h| h.to_uppercase()).collect();
    let mut records = Vec::new();

    for (i, row) in reader.records().enumerate() {
        // Row 1 is the header
        let line = i + 2;
        let row = row.map_err(|e| match e.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => AdvisorError::malformed(
                name,
                format!(
                    "row {} has {} columns but the header has {}",
                    line, len, expected_len
                ),
            ),
            _ => AdvisorError::malformed(name, format!("row {}: {}", line, e)),
        })?;

        let year_cell = row.get(0).unwrap_or_default();
        let year = year_cell.parse::<i32>().map_err(|_| {
            AdvisorError::malformed(
                name,
                format!("row {}: year '{}' is not an integer", line, year_cell),
            )
        })?;

        let mut record = ClimateRecord::new(year);
        for (column, cell) in columns.iter().zip(row.iter().skip(1)) {
            record.values.insert(column.clone(), Reading::parse(cell));
        }
        records.push(record);
    }

    tracing::debug!(
        "Parsed {} table: {} years, {} columns",
        name,
        records.len(),
        columns.len()
    );

    Ok(ClimateSeries {
        name: name.to_string(),
        columns,
        records,
    })
}

/// Both historical series, parsed and ready for aggregation.
#[derive(Debug, Clone, Default)]
pub struct ClimateTables {
    pub rainfall: ClimateSeries,
    pub temperature: ClimateSeries,
}

impl ClimateTables {
    pub fn parse(rainfall_text: &str, temperature_text: &str) -> Result<Self> {
        let rainfall = parse_table(RAINFALL_TABLE, rainfall_text)?;
        let temperature = parse_table(TEMPERATURE_TABLE, temperature_text)?;

        let rain_keys: Vec<&str> = Month::ALL.iter().map(|m| m.abbrev()).collect();
        warn_missing_columns(&rainfall, &rain_keys);
        let temp_keys: Vec<&str> = TemperatureBucket::ALL.iter().map(|b| b.label()).collect();
        warn_missing_columns(&temperature, &temp_keys);

        Ok(Self {
            rainfall,
            temperature,
        })
    }
}

fn warn_missing_columns(series: &ClimateSeries, expected: &[&str]) {
    if series.is_empty() {
        tracing::warn!("{} table has no data rows", series.name);
    }

    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|key| !series.columns.iter().any(|c| c == key))
        .collect();

    if !missing.is_empty() {
        tracing::warn!(
            "{} table is missing columns {:?}; affected months will have no data",
            series.name,
            missing
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAIN: &str = "\
YEAR,JAN,FEB,MAR,APR,MAY,JUN,JUL,AUG,SEP,OCT,NOV,DEC
2001,10,20,30,40,50,160,280,250,170,70,30,10
2002,12, NA ,28,,55,170,290,260,180,80,25,12
";

    #[test]
    fn parses_rows_in_input_order() {
        let series = parse_table(RAINFALL_TABLE, RAIN).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.records[0].year, 2001);
        assert_eq!(series.records[1].year, 2002);
        assert_eq!(series.columns.len(), 12);
        assert_eq!(series.records[0].get("JUL"), Some(280.0));
        assert_eq!(series.records[0].get("jul"), Some(280.0));
    }

    #[test]
    fn non_numeric_cells_are_missing_not_errors() {
        let series = parse_table(RAINFALL_TABLE, RAIN).unwrap();
        let row = &series.records[1];
        assert_eq!(row.get("FEB"), None);
        assert_eq!(row.values.get("FEB"), Some(&Reading::Missing("NA".into())));
        assert_eq!(row.get("APR"), None);
        assert_eq!(row.get("MAY"), Some(55.0));
    }

    #[test]
    fn lowercase_year_header_accepted() {
        let series = parse_table(TEMPERATURE_TABLE, "year,jan-feb\n1999,19.5\n").unwrap();
        assert_eq!(series.columns, vec!["JAN-FEB".to_string()]);
        assert_eq!(series.records[0].get("JAN-FEB"), Some(19.5));
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = parse_table(RAINFALL_TABLE, "").unwrap_err();
        assert!(matches!(err, AdvisorError::MalformedTable { .. }));
    }

    #[test]
    fn headerless_input_is_malformed() {
        let err = parse_table(RAINFALL_TABLE, "2001,10,20\n2002,11,21\n").unwrap_err();
        match err {
            AdvisorError::MalformedTable { table, reason } => {
                assert_eq!(table, "rainfall");
                assert!(reason.contains("header"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn ragged_row_is_malformed() {
        let text = "year,JAN,FEB\n2001,1,2\n2002,3\n";
        let err = parse_table(RAINFALL_TABLE, text).unwrap_err();
        match err {
            AdvisorError::MalformedTable { reason, .. } => {
                assert!(reason.contains("row 3"), "{}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn non_integer_year_is_malformed() {
        let err = parse_table(RAINFALL_TABLE, "year,JAN\nabc,1\n").unwrap_err();
        assert!(matches!(err, AdvisorError::MalformedTable { .. }));
    }

    #[test]
    fn header_only_table_has_no_records() {
        let series = parse_table(RAINFALL_TABLE, "year,JAN,FEB\n").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn tables_parse_both_series() {
        let temp = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n2001,20,28,27,23\n";
        let tables = ClimateTables::parse(RAIN, temp).unwrap();
        assert_eq!(tables.rainfall.len(), 2);
        assert_eq!(tables.temperature.len(), 1);
    }

    #[test]
    fn tables_fail_if_either_series_is_malformed() {
        assert!(ClimateTables::parse(RAIN, "").is_err());
        assert!(ClimateTables::parse("", "year,JAN-FEB\n2001,20\n").is_err());
    }
}
