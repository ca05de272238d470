//! Contains the `InspectionLazyFrame` structure wrapping the air-quality inspection table.

use crate::transform::classify::classify_inspections;
use crate::transform::error::TransformError;
use crate::transform::time::normalize_inspection_times;
use crate::types::summary::TimeParseSummary;
use polars::prelude::{DataFrame, LazyFrame, PolarsResult};

/// A wrapper around a Polars `LazyFrame` holding air-quality inspection records.
///
/// Freshly loaded frames carry the columns `raw_date`, `result`, `district`,
/// `longitude` and `latitude` (see [`crate::columns`]). Time
/// normalization adds `date` and `utc_day`, classification adds `exceedance`.
///
/// Instances are obtained via [`crate::load_inspections`].
#[derive(Clone)]
pub struct InspectionLazyFrame {
    /// The underlying Polars LazyFrame containing the inspection records.
    pub frame: LazyFrame,
}

impl InspectionLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Adds the `date` and `utc_day` columns for a zone `utc_offset_hours` ahead of UTC.
    pub fn normalize_time(
        self,
        utc_offset_hours: i64,
    ) -> Result<(InspectionLazyFrame, TimeParseSummary), TransformError> {
        normalize_inspection_times(self, utc_offset_hours)
    }

    /// Adds the `exceedance` flag column.
    pub fn classify(self, trigger: &str) -> Result<InspectionLazyFrame, TransformError> {
        classify_inspections(self, trigger)
    }

    /// Executes the lazy query.
    pub fn collect(&self) -> PolarsResult<DataFrame> {
        self.frame.clone().collect()
    }
}
