use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Country – the fixed EU whitelist
// ---------------------------------------------------------------------------

/// EU member-state codes in the order the dashboard lists them.
const EU_CODES: [&str; 27] = [
    "BE", "BG", "CZ", "DK", "DE", "EE", "IE", "EL", "ES", "FR", "HR", "IT", "CY", "LV", "LT",
    "LU", "HU", "MT", "NL", "AT", "PL", "PT", "RO", "SI", "SK", "FI", "SE",
];

/// One of the 27 whitelisted EU countries.
///
/// Ordering follows the whitelist order, not the alphabetical order of the
/// codes, so every map keyed by `Country` iterates the way tables list rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Country(u8);

impl Country {
    /// Look up a country code; anything outside the whitelist yields `None`.
    pub fn parse(code: &str) -> Option<Self> {
        EU_CODES
            .iter()
            .position(|c| *c == code)
            .map(|i| Country(i as u8))
    }

    /// All whitelisted countries in list order.
    pub fn all() -> impl Iterator<Item = Country> {
        (0..EU_CODES.len() as u8).map(Country)
    }

    pub fn code(self) -> &'static str {
        EU_CODES[self.0 as usize]
    }

    /// Position in the whitelist (stable, used for palette lookup).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub const COUNT: usize = EU_CODES.len();
}

/// Romania, the initially selected country.
impl Default for Country {
    fn default() -> Self {
        Country(22)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Indicator
// ---------------------------------------------------------------------------

/// The three indicators the dataset carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Indicator {
    Gdp,
    Life,
    Pop,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Indicator::Gdp, Indicator::Life, Indicator::Pop];

    /// Map an upstream indicator code (`PIB`, `SV`, `POP`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PIB" => Some(Indicator::Gdp),
            "SV" => Some(Indicator::Life),
            "POP" => Some(Indicator::Pop),
            _ => None,
        }
    }

    /// Upstream code, inverse of [`Indicator::from_code`].
    pub fn code(self) -> &'static str {
        match self {
            Indicator::Gdp => "PIB",
            Indicator::Life => "SV",
            Indicator::Pop => "POP",
        }
    }

    /// Short internal key.
    pub fn key(self) -> &'static str {
        match self {
            Indicator::Gdp => "gdp",
            Indicator::Life => "life",
            Indicator::Pop => "pop",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Gdp => "GDP per capita",
            Indicator::Life => "Life expectancy",
            Indicator::Pop => "Population",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one input row as it appears on disk
// ---------------------------------------------------------------------------

/// The year column arrives either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearField {
    Int(i64),
    Float(f64),
    Text(String),
}

/// An unvalidated row: `{ tara, an, indicator, valoare }`.
///
/// Every field is optional so a row with a missing column still
/// deserializes and is rejected by validation instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub tara: Option<String>,
    pub an: Option<YearField>,
    pub indicator: Option<String>,
    pub valoare: Option<f64>,
}

// ---------------------------------------------------------------------------
// Record – a validated row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub country: Country,
    pub year: i32,
    pub indicator: Indicator,
    pub value: f64,
}

/// Why a raw row was dropped during indexing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("country {0:?} is not in the EU whitelist")]
    UnknownCountry(Option<String>),
    #[error("year {0:?} is not a finite integer")]
    InvalidYear(Option<YearField>),
    #[error("missing value")]
    MissingValue,
    #[error("unknown indicator code {0:?}")]
    UnknownIndicator(Option<String>),
}

fn parse_year(field: &YearField) -> Option<i32> {
    let as_float = match field {
        YearField::Int(i) => return i32::try_from(*i).ok(),
        YearField::Float(f) => *f,
        YearField::Text(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i32>() {
                return Some(i);
            }
            s.parse::<f64>().ok()?
        }
    };
    if as_float.is_finite()
        && as_float.fract() == 0.0
        && as_float >= i32::MIN as f64
        && as_float <= i32::MAX as f64
    {
        Some(as_float as i32)
    } else {
        None
    }
}

impl TryFrom<RawRecord> for Record {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let country = match raw.tara.as_deref().and_then(Country::parse) {
            Some(c) => c,
            None => return Err(RecordError::UnknownCountry(raw.tara)),
        };
        let year = match raw.an.as_ref().and_then(parse_year) {
            Some(y) => y,
            None => return Err(RecordError::InvalidYear(raw.an)),
        };
        let value = raw.valoare.ok_or(RecordError::MissingValue)?;
        let indicator = match raw.indicator.as_deref().and_then(Indicator::from_code) {
            Some(i) => i,
            None => return Err(RecordError::UnknownIndicator(raw.indicator)),
        };
        Ok(Record {
            country,
            year,
            indicator,
            value,
        })
    }
}

// ---------------------------------------------------------------------------
// YearEntry – the partial record stored per (country, year)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearEntry {
    pub gdp: Option<f64>,
    pub life: Option<f64>,
    pub pop: Option<f64>,
}

impl YearEntry {
    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::Gdp => self.gdp,
            Indicator::Life => self.life,
            Indicator::Pop => self.pop,
        }
    }

    /// Overwrites any previous value for `indicator`.
    pub fn set(&mut self, indicator: Indicator, value: f64) {
        let slot = match indicator {
            Indicator::Gdp => &mut self.gdp,
            Indicator::Life => &mut self.life,
            Indicator::Pop => &mut self.pop,
        };
        *slot = Some(value);
    }

    /// All three indicators present.
    pub fn is_complete(&self) -> bool {
        self.gdp.is_some() && self.life.is_some() && self.pop.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tara: &str, an: YearField, indicator: &str, valoare: Option<f64>) -> RawRecord {
        RawRecord {
            tara: Some(tara.to_string()),
            an: Some(an),
            indicator: Some(indicator.to_string()),
            valoare,
        }
    }

    #[test]
    fn country_order_follows_whitelist() {
        let be = Country::parse("BE").unwrap();
        let at = Country::parse("AT").unwrap();
        assert!(be < at);
        assert_eq!(Country::all().count(), Country::COUNT);
        assert_eq!(Country::all().last().unwrap().code(), "SE");
        assert!(Country::parse("US").is_none());
        assert!(Country::parse("ro").is_none());
        assert_eq!(Country::default().code(), "RO");
    }

    #[test]
    fn indicator_codes_round_trip() {
        for ind in Indicator::ALL {
            assert_eq!(Indicator::from_code(ind.code()), Some(ind));
        }
        assert_eq!(Indicator::from_code("SV").unwrap().key(), "life");
        assert!(Indicator::from_code("CO2").is_none());
    }

    #[test]
    fn year_accepts_numbers_and_numeric_strings() {
        let ok = [
            YearField::Int(2020),
            YearField::Float(2020.0),
            YearField::Text("2020".into()),
            YearField::Text(" 2020 ".into()),
            YearField::Text("2020.0".into()),
        ];
        for an in ok {
            let rec = Record::try_from(raw("RO", an, "PIB", Some(1.0))).unwrap();
            assert_eq!(rec.year, 2020);
        }
    }

    #[test]
    fn year_rejects_non_integers() {
        let bad = [
            YearField::Float(2020.5),
            YearField::Float(f64::NAN),
            YearField::Text("".into()),
            YearField::Text("last year".into()),
            YearField::Int(i64::MAX),
        ];
        for an in bad {
            let err = Record::try_from(raw("RO", an, "PIB", Some(1.0))).unwrap_err();
            assert!(matches!(err, RecordError::InvalidYear(_)));
        }
    }

    #[test]
    fn validation_reports_first_failing_field() {
        let err = Record::try_from(raw("US", YearField::Int(2020), "PIB", Some(1.0))).unwrap_err();
        assert_eq!(err, RecordError::UnknownCountry(Some("US".into())));

        let err = Record::try_from(raw("RO", YearField::Int(2020), "PIB", None)).unwrap_err();
        assert_eq!(err, RecordError::MissingValue);

        let err = Record::try_from(raw("RO", YearField::Int(2020), "CO2", Some(1.0))).unwrap_err();
        assert_eq!(err, RecordError::UnknownIndicator(Some("CO2".into())));

        let err = Record::try_from(RawRecord::default()).unwrap_err();
        assert_eq!(err, RecordError::UnknownCountry(None));
    }

    #[test]
    fn year_entry_set_overwrites() {
        let mut e = YearEntry::default();
        e.set(Indicator::Gdp, 1.0);
        e.set(Indicator::Gdp, 2.0);
        assert_eq!(e.get(Indicator::Gdp), Some(2.0));
        assert!(!e.is_complete());
        e.set(Indicator::Life, 80.0);
        e.set(Indicator::Pop, 5.0);
        assert!(e.is_complete());
    }
}
