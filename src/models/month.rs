use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Zero-based month index (Jan = 0).
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Upper-case abbreviation used as the rainfall table column key.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Month::Jan => "JAN",
            Month::Feb => "FEB",
            Month::Mar => "MAR",
            Month::Apr => "APR",
            Month::May => "MAY",
            Month::Jun => "JUN",
            Month::Jul => "JUL",
            Month::Aug => "AUG",
            Month::Sep => "SEP",
            Month::Oct => "OCT",
            Month::Nov => "NOV",
            Month::Dec => "DEC",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::Jan => "January",
            Month::Feb => "February",
            Month::Mar => "March",
            Month::Apr => "April",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "August",
            Month::Sep => "September",
            Month::Oct => "October",
            Month::Nov => "November",
            Month::Dec => "December",
        }
    }

    /// Accepts abbreviations, full names and zero-based indices.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index);
        }
        let lower = s.to_lowercase();
        Self::ALL.iter().copied().find(|m| {
            m.abbrev().eq_ignore_ascii_case(&lower) || m.as_str().to_lowercase() == lower
        })
    }

    /// Current month in local time.
    pub fn current() -> Self {
        use chrono::Datelike;
        let month0 = chrono::Local::now().month0() as usize;
        Self::ALL[month0 % 12]
    }

    /// Season band this month is designated to.
    pub fn season(&self) -> Season {
        match self {
            Month::Jun | Month::Jul | Month::Aug | Month::Sep => Season::Monsoon,
            Month::Mar | Month::Apr | Month::May => Season::Summer,
            Month::Oct | Month::Nov | Month::Dec | Month::Jan | Month::Feb => Season::Winter,
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Month {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Month::from_str(&value).ok_or_else(|| format!("unknown month '{}'", value))
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.abbrev().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Monsoon,
    Winter,
    Summer,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Monsoon => "Monsoon",
            Season::Winter => "Winter",
            Season::Summer => "Summer",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_from_str_valid() {
        assert_eq!(Month::from_str("JAN"), Some(Month::Jan));
        assert_eq!(Month::from_str("jun"), Some(Month::Jun));
        assert_eq!(Month::from_str("September"), Some(Month::Sep));
        assert_eq!(Month::from_str(" dec "), Some(Month::Dec));
        assert_eq!(Month::from_str("0"), Some(Month::Jan));
        assert_eq!(Month::from_str("11"), Some(Month::Dec));
    }

    #[test]
    fn month_from_str_invalid() {
        assert_eq!(Month::from_str("12"), None);
        assert_eq!(Month::from_str("Sept"), None);
        assert_eq!(Month::from_str(""), None);
    }

    #[test]
    fn month_index_round_trip() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
            assert_eq!(Month::from_index(i), Some(*month));
        }
        assert_eq!(Month::from_index(12), None);
    }

    #[test]
    fn season_bands() {
        assert_eq!(Month::Jul.season(), Season::Monsoon);
        assert_eq!(Month::Sep.season(), Season::Monsoon);
        assert_eq!(Month::Apr.season(), Season::Summer);
        assert_eq!(Month::Nov.season(), Season::Winter);
        assert_eq!(Month::Feb.season(), Season::Winter);
    }

    #[test]
    fn month_deserializes_from_yaml_names() {
        let months: Vec<Month> = serde_yaml::from_str("[Jun, JUL, august]").unwrap();
        assert_eq!(months, vec![Month::Jun, Month::Jul, Month::Aug]);
    }
}
