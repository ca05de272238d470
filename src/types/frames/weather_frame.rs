//! Contains the `WeatherLazyFrame` structure wrapping hourly weather observations.

use crate::transform::error::TransformError;
use crate::transform::time::normalize_weather_times;
use crate::types::summary::TimeParseSummary;
use polars::prelude::{DataFrame, LazyFrame, PolarsResult};

/// A wrapper around a Polars `LazyFrame` holding hourly weather observations.
///
/// Columns follow [`crate::columns::WEATHER_SCHEMA`]; time normalization
/// adds the `utc_day` join key built from the UTC year, month, day and hour.
#[derive(Clone)]
pub struct WeatherLazyFrame {
    /// The underlying Polars LazyFrame containing the observations.
    pub frame: LazyFrame,
}

impl WeatherLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    pub fn normalize_time(self) -> Result<(WeatherLazyFrame, TimeParseSummary), TransformError> {
        normalize_weather_times(self)
    }

    pub fn collect(&self) -> PolarsResult<DataFrame> {
        self.frame.clone().collect()
    }
}
