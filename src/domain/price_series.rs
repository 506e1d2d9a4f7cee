//! Historical state price table and the chart-ready series cut from it.

use thiserror::Error;
use time::Date;

pub const DATE_COLUMN: &str = "Date";
pub const PRICE_LABEL: &str = "Price";
pub const X_AXIS_LABEL: &str = "Year and Month";
pub const Y_AXIS_LABEL: &str = "Housing Price";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrendError {
    #[error("State '{0}' not found in the dataset. Please check the spelling and try again.")]
    RegionNotFound(String),
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegionColumn {
    pub name: String,
    pub prices: Vec<Option<f64>>,
}

/// Wide table: one row per date, one column per region. Read-only once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceTable {
    dates: Vec<Date>,
    regions: Vec<RegionColumn>,
}

impl PriceTable {
    pub fn new(dates: Vec<Date>, regions: Vec<RegionColumn>) -> Result<Self, TrendError> {
        for (idx, region) in regions.iter().enumerate() {
            if region.prices.len() != dates.len() {
                return Err(TrendError::RaggedColumn {
                    column: region.name.clone(),
                    expected: dates.len(),
                    actual: region.prices.len(),
                });
            }
            if region.name == DATE_COLUMN
                || regions[..idx].iter().any(|other| other.name == region.name)
            {
                return Err(TrendError::DuplicateColumn(region.name.clone()));
            }
        }
        Ok(Self { dates, regions })
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.name.as_str())
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Exact, case-sensitive column lookup.
    pub fn column(&self, region: &str) -> Option<&[Option<f64>]> {
        self.regions
            .iter()
            .find(|column| column.name == region)
            .map(|column| column.prices.as_slice())
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.column(region).is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub date: Date,
    pub price: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
    pub region: String,
    pub points: Vec<SeriesPoint>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Header of the two-column projection; the region column is renamed.
    pub fn columns(&self) -> [&'static str; 2] {
        [DATE_COLUMN, PRICE_LABEL]
    }

    /// Points with a usable price, in table order.
    pub fn priced(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.points.iter().filter_map(|point| {
            point
                .price
                .filter(|price| price.is_finite())
                .map(|price| (point.date, price))
        })
    }
}

/// Projects the table onto `Date` and one region column, keeping row order.
pub fn prepare(table: &PriceTable, region: &str) -> Result<PriceSeries, TrendError> {
    let prices = table
        .column(region)
        .ok_or_else(|| TrendError::RegionNotFound(region.to_string()))?;

    let points = table
        .dates
        .iter()
        .zip(prices)
        .map(|(date, price)| SeriesPoint {
            date: *date,
            price: *price,
        })
        .collect();

    Ok(PriceSeries {
        region: region.to_string(),
        points,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: PriceSeries,
}

impl TrendChart {
    pub fn new(series: PriceSeries) -> Self {
        Self {
            title: format!("Housing Price Trend for {}", series.region),
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            series,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrendView {
    Prompt,
    NotFound(String),
    Chart(TrendChart),
}

pub const TREND_PROMPT: &str = "Please enter a state name to display the trend.";

/// Guards the region before preparing: nothing is prepared for an unknown
/// column. The input is matched verbatim, without trimming.
pub fn resolve_trend(table: &PriceTable, input: &str) -> TrendView {
    if input.is_empty() {
        return TrendView::Prompt;
    }
    if !table.contains_region(input) {
        tracing::debug!(region = input, "trend region not present in price table");
        return TrendView::NotFound(TrendError::RegionNotFound(input.to_string()).to_string());
    }
    match prepare(table, input) {
        Ok(series) => TrendView::Chart(TrendChart::new(series)),
        Err(err) => TrendView::NotFound(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn sample_table() -> PriceTable {
        PriceTable::new(
            vec![date!(2020 - 01 - 31), date!(2020 - 02 - 29), date!(2020 - 03 - 31)],
            vec![
                RegionColumn {
                    name: "CA".to_string(),
                    prices: vec![Some(600_000.0), Some(605_500.0), None],
                },
                RegionColumn {
                    name: "TX".to_string(),
                    prices: vec![Some(240_000.0), Some(241_000.0), Some(243_250.0)],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn prepare_keeps_every_row_in_order() {
        let table = sample_table();
        let series = prepare(&table, "CA").unwrap();

        assert_eq!(series.len(), table.row_count());
        assert_eq!(series.region, "CA");
        assert_eq!(series.columns(), ["Date", "Price"]);
        let prices: Vec<_> = series.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, table.column("CA").unwrap().to_vec());
        let dates: Vec<_> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, table.dates().to_vec());
    }

    #[test]
    fn priced_skips_missing_cells_only_for_plotting() {
        let series = prepare(&sample_table(), "CA").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.priced().count(), 2);
    }

    #[test]
    fn prepare_rejects_unknown_region() {
        let err = prepare(&sample_table(), "NV").unwrap_err();
        assert_eq!(err, TrendError::RegionNotFound("NV".to_string()));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = sample_table();
        assert!(table.contains_region("TX"));
        assert!(!table.contains_region("tx"));
        assert!(!table.contains_region(" TX"));
    }

    #[test]
    fn guard_prompts_on_empty_input() {
        assert_eq!(resolve_trend(&sample_table(), ""), TrendView::Prompt);
    }

    #[test]
    fn guard_reports_missing_region_without_chart() {
        let view = resolve_trend(&sample_table(), "ca");
        assert_eq!(
            view,
            TrendView::NotFound(
                "State 'ca' not found in the dataset. Please check the spelling and try again."
                    .to_string()
            )
        );
    }

    #[test]
    fn guard_builds_labelled_chart() {
        let TrendView::Chart(chart) = resolve_trend(&sample_table(), "TX") else {
            panic!("expected a chart");
        };
        assert_eq!(chart.title, "Housing Price Trend for TX");
        assert_eq!(chart.x_label, "Year and Month");
        assert_eq!(chart.y_label, "Housing Price");
        assert_eq!(chart.series.len(), 3);
    }

    #[test]
    fn table_rejects_ragged_columns() {
        let err = PriceTable::new(
            vec![date!(2021 - 01 - 01)],
            vec![RegionColumn {
                name: "WA".to_string(),
                prices: vec![],
            }],
        )
        .unwrap_err();
        assert!(matches!(err, TrendError::RaggedColumn { expected: 1, actual: 0, .. }));
    }

    #[test]
    fn table_rejects_duplicate_columns() {
        let column = RegionColumn {
            name: "WA".to_string(),
            prices: vec![Some(1.0)],
        };
        let err = PriceTable::new(vec![date!(2021 - 01 - 01)], vec![column.clone(), column]).unwrap_err();
        assert_eq!(err, TrendError::DuplicateColumn("WA".to_string()));
    }
}
