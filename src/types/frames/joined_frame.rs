//! Contains the `JoinedFrame`, the inspection/weather table after the join and null drop.

use polars::prelude::DataFrame;

/// Inspection rows with their matching weather observations attached.
///
/// Columns: `utc_day`, `exceedance`, `district`, `longitude`, `latitude`,
/// `wind_speed`, `precipitation`, `temperature`. No column contains nulls.
/// An inspection day matching several weather hours appears once per hour.
#[derive(Clone, Debug)]
pub struct JoinedFrame {
    pub frame: DataFrame,
}

impl JoinedFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}
