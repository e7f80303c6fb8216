use super::index::IndexedDataset;
use super::model::{Country, Indicator, YearEntry};

// ---------------------------------------------------------------------------
// Read-only selections used by the three views
// ---------------------------------------------------------------------------

/// One country's bubble for a given year; only built when all three
/// indicators are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubblePoint {
    pub country: Country,
    pub gdp: f64,
    pub life: f64,
    pub pop: f64,
}

/// `(year, value)` points for the line chart.
///
/// Follows the order of `years`; years without a value for the indicator are
/// skipped rather than drawn as gaps.
pub fn line_series(
    dataset: &IndexedDataset,
    country: Country,
    indicator: Indicator,
    years: &[i32],
) -> Vec<(i32, f64)> {
    years
        .iter()
        .filter_map(|&y| dataset.value(country, y, indicator).map(|v| (y, v)))
        .collect()
}

/// Bubbles for every country having GDP, life expectancy and population in `year`.
pub fn bubble_points(dataset: &IndexedDataset, year: i32) -> Vec<BubblePoint> {
    Country::all()
        .filter_map(|country| {
            let e = dataset.entry(country, year)?;
            Some(BubblePoint {
                country,
                gdp: e.gdp?,
                life: e.life?,
                pop: e.pop?,
            })
        })
        .collect()
}

/// Table rows: every country with an entry in `year`, whitelist order.
pub fn table_rows(dataset: &IndexedDataset, year: i32) -> Vec<(Country, YearEntry)> {
    Country::all()
        .filter_map(|country| dataset.entry(country, year).map(|e| (country, *e)))
        .collect()
}

/// Present values of one table column.
pub fn column_samples(rows: &[(Country, YearEntry)], indicator: Indicator) -> Vec<f64> {
    rows.iter().filter_map(|(_, e)| e.get(indicator)).collect()
}
