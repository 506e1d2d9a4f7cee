//! Loader for the wide state price CSV.
//!
//! - Reads the table from an HTTP(S) URL, a local file or the copy bundled
//!   into the binary.
//! - Keeps the last table in memory with a TTL and falls back to it when a
//!   refresh fails.

use std::{
    io::Read,
    path::PathBuf,
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use thiserror::Error;
use time::{macros::format_description, Date, Month};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        price_series::{PriceTable, RegionColumn, TrendError, DATE_COLUMN},
        CacheStatus,
    },
    util::assets,
};

/// Source string selecting the table bundled into the binary.
pub const EMBEDDED_SOURCE: &str = "embedded";

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
const USER_AGENT: &str = concat!("homematch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum PriceDataError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bundled price table is missing from the binary")]
    MissingBundledData,
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("price table has no 'Date' column")]
    MissingDateColumn,
    #[error("line {line}: unrecognised date '{value}'")]
    InvalidDate { line: u64, value: String },
    #[error("line {line}: price '{value}' in column '{column}' is not a number")]
    InvalidPrice {
        line: u64,
        column: String,
        value: String,
    },
    #[error(transparent)]
    Table(#[from] TrendError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriceDataSource {
    Embedded,
    Remote(Url),
    File(PathBuf),
}

impl PriceDataSource {
    /// `embedded` (or an empty string) selects the bundled table; an
    /// http(s) prefix a URL; anything else a filesystem path.
    pub fn parse(raw: &str) -> Result<Self, PriceDataError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(EMBEDDED_SOURCE) {
            Ok(Self::Embedded)
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(Self::Remote(Url::parse(trimmed)?))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Embedded => format!("bundled {}", assets::BUNDLED_PRICE_FILE),
            Self::Remote(url) => url.to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

#[derive(Clone, Debug)]
struct Cached {
    table: PriceTable,
    fetched_at: SystemTime,
}

#[derive(Clone)]
pub struct PriceDataClient {
    http: Client,
    source: PriceDataSource,
    cache: Arc<Mutex<Option<Cached>>>,
    ttl: Duration,
}

impl PriceDataClient {
    pub fn new(source: &str) -> Result<Self, PriceDataError> {
        let source = PriceDataSource::parse(source)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            source,
            cache: Arc::new(Mutex::new(None)),
            ttl: DEFAULT_TTL,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn source(&self) -> &PriceDataSource {
        &self.source
    }

    /// Returns the cached table while it is within the TTL, otherwise reloads.
    pub async fn load_table(&self) -> Result<CachedPayload<PriceTable>, PriceDataError> {
        if let Some(payload) = self.cached(false).await {
            debug!(source = %self.source.describe(), "serving price table from cache");
            return Ok(payload);
        }
        self.refresh().await
    }

    /// Reloads unconditionally. On failure the previous table is returned as
    /// stale when there is one.
    pub async fn refresh(&self) -> Result<CachedPayload<PriceTable>, PriceDataError> {
        match self.fetch().await {
            Ok(table) => {
                info!(
                    source = %self.source.describe(),
                    rows = table.row_count(),
                    regions = table.region_count(),
                    "loaded price table"
                );
                let fetched_at = SystemTime::now();
                *self.cache.lock().await = Some(Cached {
                    table: table.clone(),
                    fetched_at,
                });
                Ok(CachedPayload {
                    data: table,
                    fetched_at,
                    status: CacheStatus::Fresh,
                })
            }
            Err(err) => {
                if let Some(stale) = self.cached(true).await {
                    warn!(error = %err, "price table refresh failed; using cached copy");
                    return Ok(stale);
                }
                Err(err)
            }
        }
    }

    async fn cached(&self, allow_stale: bool) -> Option<CachedPayload<PriceTable>> {
        let guard = self.cache.lock().await;
        let cached = guard.as_ref()?;
        let expired = cached
            .fetched_at
            .elapsed()
            .map(|age| age >= self.ttl)
            .unwrap_or(true);
        if expired && !allow_stale {
            return None;
        }
        Some(CachedPayload {
            data: cached.table.clone(),
            fetched_at: cached.fetched_at,
            status: if expired {
                CacheStatus::Stale
            } else {
                CacheStatus::Cached
            },
        })
    }

    async fn fetch(&self) -> Result<PriceTable, PriceDataError> {
        let body = match &self.source {
            PriceDataSource::Embedded => {
                debug!("reading bundled price table");
                let data = assets::bundled_price_table().ok_or(PriceDataError::MissingBundledData)?;
                return parse_price_table(data.as_ref());
            }
            PriceDataSource::Remote(url) => {
                debug!(%url, "downloading price table");
                self.http
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
            PriceDataSource::File(path) => {
                debug!(path = %path.display(), "reading price table");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| PriceDataError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };
        parse_price_table(body.as_bytes())
    }
}

/// Parses a wide CSV with one `Date` column and one column per region.
/// Empty price cells are kept as missing values so the row count is preserved.
pub fn parse_price_table<R: Read>(input: R) -> Result<PriceTable, PriceDataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    let date_idx = headers
        .iter()
        .position(|name| name == DATE_COLUMN)
        .ok_or(PriceDataError::MissingDateColumn)?;

    let mut dates = Vec::new();
    let mut regions: Vec<RegionColumn> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != date_idx)
        .map(|(_, name)| RegionColumn {
            name: name.clone(),
            prices: Vec::new(),
        })
        .collect();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| PriceDataError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;
        dates.push(date);

        let cells = record
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != date_idx)
            .map(|(_, cell)| cell);
        for (column, cell) in regions.iter_mut().zip(cells) {
            column.prices.push(parse_price(cell).map_err(|_| PriceDataError::InvalidPrice {
                line,
                column: column.name.clone(),
                value: cell.to_string(),
            })?);
        }
    }

    Ok(PriceTable::new(dates, regions)?)
}

fn parse_price(cell: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cell.parse::<f64>().map(Some)
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM` (first of month) and `M/D/YYYY`.
pub fn parse_date(raw: &str) -> Option<Date> {
    let iso = format_description!("[year]-[month]-[day]");
    let us = format_description!("[month padding:none]/[day padding:none]/[year]");

    if let Ok(date) = Date::parse(raw, iso) {
        return Some(date);
    }
    if let Ok(date) = Date::parse(raw, us) {
        return Some(date);
    }

    let (year, month) = raw.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    Date::from_calendar_date(year, month, 1).ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use time::macros::date;

    use super::*;

    const SAMPLE: &str = "\
Date,CA,TX,NY
2020-01-31,600000,240000,380000
2020-02-29,605500,,381250.5
2020-03-31,611000,243250,NaN
";

    #[test]
    fn parses_wide_table() {
        let table = parse_price_table(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.region_names().collect::<Vec<_>>(), ["CA", "TX", "NY"]);
        assert_eq!(
            table.column("CA").unwrap(),
            &[Some(600_000.0), Some(605_500.0), Some(611_000.0)]
        );
        assert_eq!(table.column("TX").unwrap()[1], None);
        assert_eq!(table.column("NY").unwrap()[2], None);
        assert_eq!(table.dates()[1], date!(2020 - 02 - 29));
    }

    #[test]
    fn date_column_may_be_anywhere() {
        let csv = "WA,Date\n500000,2021-05\n";
        let table = parse_price_table(csv.as_bytes()).unwrap();
        assert_eq!(table.dates(), &[date!(2021 - 05 - 01)]);
        assert_eq!(table.column("WA").unwrap(), &[Some(500_000.0)]);
    }

    #[test]
    fn missing_date_column_is_rejected() {
        let err = parse_price_table("CA,TX\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PriceDataError::MissingDateColumn));
    }

    #[test]
    fn bad_cells_name_the_line() {
        let err = parse_price_table("Date,CA\nyesterday,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PriceDataError::InvalidDate { line: 2, .. }));

        let err = parse_price_table("Date,CA\n2020-01-01,1\n2020-02-01,lots\n".as_bytes()).unwrap_err();
        match err {
            PriceDataError::InvalidPrice { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "CA");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn date_formats() {
        assert_eq!(parse_date("2019-12-31"), Some(date!(2019 - 12 - 31)));
        assert_eq!(parse_date("2019-12"), Some(date!(2019 - 12 - 01)));
        assert_eq!(parse_date("1/31/2000"), Some(date!(2000 - 01 - 31)));
        assert_eq!(parse_date("2019-13"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn source_kind_follows_scheme() {
        assert!(matches!(
            PriceDataSource::parse("https://example.com/prices.csv").unwrap(),
            PriceDataSource::Remote(_)
        ));
        assert_eq!(
            PriceDataSource::parse("data/state_prices.csv").unwrap(),
            PriceDataSource::File(PathBuf::from("data/state_prices.csv"))
        );
        assert_eq!(PriceDataSource::parse("embedded").unwrap(), PriceDataSource::Embedded);
        assert_eq!(PriceDataSource::parse("  ").unwrap(), PriceDataSource::Embedded);
    }

    #[tokio::test]
    async fn default_source_loads_outside_the_crate_root() {
        let config = crate::config::AppConfig::default();
        let client = PriceDataClient::new(&config.price_data).unwrap();
        assert_eq!(client.source(), &PriceDataSource::Embedded);

        let previous = std::env::current_dir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        std::env::set_current_dir(elsewhere.path()).unwrap();
        let loaded = client.load_table().await;
        std::env::set_current_dir(previous).unwrap();

        let table = loaded.unwrap().data;
        assert_eq!(table.region_count(), 51);
        assert!(table.contains_region("CA"));
        assert!(table.row_count() > 0);
    }

    #[tokio::test]
    async fn loads_and_caches_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let client = PriceDataClient::new(file.path().to_str().unwrap()).unwrap();

        let first = client.load_table().await.unwrap();
        assert_eq!(first.status, CacheStatus::Fresh);
        assert_eq!(first.data.row_count(), 3);

        let second = client.load_table().await.unwrap();
        assert_eq!(second.status, CacheStatus::Cached);
        assert_eq!(second.data, first.data);
    }

    #[tokio::test]
    async fn failed_refresh_falls_back_to_stale_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let client = PriceDataClient::new(path.to_str().unwrap())
            .unwrap()
            .with_ttl(Duration::ZERO);

        client.load_table().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let fallback = client.refresh().await.unwrap();
        assert_eq!(fallback.status, CacheStatus::Stale);
        assert_eq!(fallback.data.row_count(), 3);
    }

    #[tokio::test]
    async fn zero_ttl_never_serves_from_cache() {
        let client = PriceDataClient::new(EMBEDDED_SOURCE)
            .unwrap()
            .with_ttl(Duration::ZERO);

        client.load_table().await.unwrap();
        let again = client.load_table().await.unwrap();
        assert_eq!(again.status, CacheStatus::Fresh);
    }
}
