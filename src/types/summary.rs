//! Plain-struct views of the aggregated tables consumed by the renderers.

use crate::types::lat_lon::LatLon;
use crate::types::month::Month;
use chrono::NaiveDate;

/// Number of exceedances recorded in one calendar month of UTC days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyExceedance {
    pub month: Month,
    pub exceedances: i64,
}

/// Number of exceedances recorded in one district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictExceedance {
    pub district: String,
    pub exceedances: i64,
}

/// Mean exceedance rate and mean weather conditions of one district.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictWeatherProfile {
    pub district: String,
    /// Share of joined rows flagged as exceedances, in `[0, 1]`.
    pub mean_exceedance: f64,
    pub mean_wind_speed: f64,
    pub mean_precipitation: f64,
    pub mean_temperature: f64,
}

/// Symmetric Pearson correlation matrix; undefined entries are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` x `labels.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row)?.get(column).copied()
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

/// One fully populated row of the joined table.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedObservation {
    pub utc_day: NaiveDate,
    pub exceedance: bool,
    pub district: String,
    pub position: LatLon,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub temperature: f64,
}

/// An inspection point drawn on the pollution map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub position: LatLon,
    pub exceedance: bool,
    /// Pre-escaped HTML shown when the marker is clicked.
    pub popup: String,
}

/// Why rows left the joined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinReport {
    /// Rows produced by the left join, before dropping incomplete ones.
    pub joined_rows: usize,
    /// Rows whose UTC day had no weather observation, or no UTC day at all.
    pub unmatched_rows: usize,
    /// Matched rows still missing a district, coordinate or weather value.
    pub incomplete_rows: usize,
    pub retained_rows: usize,
}

/// Counts of date values that could not be turned into a UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeParseSummary {
    pub total: usize,
    pub unparsed: usize,
}

/// Everything the renderers need, computed in one pipeline pass.
#[derive(Debug, Clone)]
pub struct ExceedanceReport {
    pub inspection_time: TimeParseSummary,
    pub weather_time: TimeParseSummary,
    pub join: JoinReport,
    pub monthly: Vec<MonthlyExceedance>,
    pub districts: Vec<DistrictExceedance>,
    pub profiles: Vec<DistrictWeatherProfile>,
    pub correlation: CorrelationMatrix,
    pub observations: Vec<JoinedObservation>,
    pub markers: Vec<MapMarker>,
}
