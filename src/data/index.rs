use std::collections::{BTreeMap, BTreeSet};

use super::model::{Country, Indicator, RawRecord, Record, YearEntry};

// ---------------------------------------------------------------------------
// IndexedDataset – country → year → partial record
// ---------------------------------------------------------------------------

/// The nested lookup built once per load and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct IndexedDataset {
    by_country: BTreeMap<Country, BTreeMap<i32, YearEntry>>,
    rejected: usize,
}

/// Datasets are equal when they hold the same values; how many rows were
/// dropped on the way in does not matter.
impl PartialEq for IndexedDataset {
    fn eq(&self, other: &Self) -> bool {
        self.by_country == other.by_country
    }
}

impl IndexedDataset {
    /// Validate and index raw rows.
    ///
    /// Rows outside the whitelist, with an unusable year, without a value or
    /// with an unknown indicator code are dropped and counted, never reported
    /// as errors. Later rows overwrite earlier ones for the same
    /// (country, year, indicator).
    pub fn index<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut ds = IndexedDataset::default();
        for raw in records {
            match Record::try_from(raw) {
                Ok(rec) => ds.insert(rec),
                Err(e) => {
                    log::debug!("Dropping record: {e}");
                    ds.rejected += 1;
                }
            }
        }
        if ds.rejected > 0 {
            log::warn!("{} record(s) dropped while indexing", ds.rejected);
        }
        ds
    }

    /// Index rows that are already validated.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut ds = IndexedDataset::default();
        for rec in records {
            ds.insert(rec);
        }
        ds
    }

    fn insert(&mut self, rec: Record) {
        self.by_country
            .entry(rec.country)
            .or_default()
            .entry(rec.year)
            .or_default()
            .set(rec.indicator, rec.value);
    }

    /// The partial record for one country and year.
    pub fn entry(&self, country: Country, year: i32) -> Option<&YearEntry> {
        self.by_country.get(&country)?.get(&year)
    }

    pub fn value(&self, country: Country, year: i32, indicator: Indicator) -> Option<f64> {
        self.entry(country, year)?.get(indicator)
    }

    /// Every year present under any country, ascending and deduplicated.
    pub fn available_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self
            .by_country
            .values()
            .flat_map(|per_year| per_year.keys().copied())
            .collect();
        years.into_iter().collect()
    }

    /// [`available_years`](Self::available_years), keeping only the most
    /// recent `window` years when a window is given.
    pub fn recent_years(&self, window: Option<usize>) -> Vec<i32> {
        let mut years = self.available_years();
        if let Some(n) = window {
            let skip = years.len().saturating_sub(n);
            years.drain(..skip);
        }
        years
    }

    /// Countries with at least one entry, in whitelist order.
    pub fn countries(&self) -> impl Iterator<Item = Country> + '_ {
        self.by_country.keys().copied()
    }

    /// Number of (country, year) cells.
    pub fn len(&self) -> usize {
        self.by_country.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_country.is_empty()
    }

    /// Rows dropped while indexing.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Project the dataset back into validated rows.
    pub fn to_records(&self) -> Vec<Record> {
        let mut out = Vec::new();
        for (&country, per_year) in &self.by_country {
            for (&year, entry) in per_year {
                for indicator in Indicator::ALL {
                    if let Some(value) = entry.get(indicator) {
                        out.push(Record {
                            country,
                            year,
                            indicator,
                            value,
                        });
                    }
                }
            }
        }
        out
    }
}
