use crate::transform::error::TransformError;
use crate::types::columns::{
    COL_DISTRICT, COL_EXCEEDANCE, COL_LATITUDE, COL_LONGITUDE, COL_PRECIPITATION,
    COL_TEMPERATURE, COL_UTC_DAY, COL_WIND_SPEED,
};
use crate::types::frames::inspection_frame::InspectionLazyFrame;
use crate::types::frames::joined_frame::JoinedFrame;
use crate::types::frames::weather_frame::WeatherLazyFrame;
use crate::types::summary::JoinReport;
use log::info;
use polars::prelude::*;

/// Marker set on every weather row, null after the join when nothing matched.
const COL_MATCHED: &str = "__weather_matched";

/// Left-joins inspections onto weather observations by `utc_day` and drops incomplete rows.
///
/// Every weather hour sharing an inspection's UTC day yields one joined row;
/// null days never match. Rows with any null after the join are discarded,
/// with the reason counted in the returned [`JoinReport`].
pub fn join_weather(
    inspections: InspectionLazyFrame,
    weather: WeatherLazyFrame,
) -> Result<(JoinedFrame, JoinReport), TransformError> {
    let left = inspections.frame.select([
        col(COL_UTC_DAY),
        col(COL_EXCEEDANCE),
        col(COL_DISTRICT),
        col(COL_LONGITUDE),
        col(COL_LATITUDE),
    ]);
    let right = weather.frame.select([
        col(COL_UTC_DAY),
        col(COL_WIND_SPEED),
        col(COL_PRECIPITATION),
        col(COL_TEMPERATURE),
        lit(true).alias(COL_MATCHED),
    ]);

    let joined = left
        .left_join(right, col(COL_UTC_DAY), col(COL_UTC_DAY))
        .collect()?;

    let joined_rows = joined.height();
    let unmatched_rows = joined
        .column(COL_MATCHED)
        .map_err(|e| TransformError::ColumnNotFound(COL_MATCHED.to_string(), e))?
        .null_count();

    let complete = joined.drop(COL_MATCHED)?.drop_nulls::<String>(None)?;
    let report = JoinReport {
        joined_rows,
        unmatched_rows,
        incomplete_rows: joined_rows - unmatched_rows - complete.height(),
        retained_rows: complete.height(),
    };
    info!(
        "Joined {} rows: {} without weather for their UTC day, {} with missing fields, {} retained",
        report.joined_rows, report.unmatched_rows, report.incomplete_rows, report.retained_rows
    );

    Ok((JoinedFrame::new(complete), report))
}
