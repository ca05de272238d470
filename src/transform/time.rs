//! Derives the `utc_day` join key for both sources.
//!
//! Inspection dates are local calendar dates; their UTC day is local midnight
//! shifted back by the fixed UTC offset and floored to a day. Weather rows
//! carry explicit UTC components, of which the hour is only validated.

use crate::transform::error::TransformError;
use crate::types::columns::{
    COL_DATE, COL_RAW_DATE, COL_UTC_DAY, COL_UTC_DAY_OF_MONTH, COL_UTC_HOUR, COL_UTC_MONTH,
    COL_UTC_YEAR,
};
use crate::types::frames::inspection_frame::InspectionLazyFrame;
use crate::types::frames::weather_frame::WeatherLazyFrame;
use crate::types::summary::TimeParseSummary;
use crate::utils::{date_series, opt_i64s, opt_strings};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use log::{info, warn};
use polars::prelude::*;

pub const INSPECTION_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses an inspection date written as `DD.MM.YYYY`.
pub fn parse_inspection_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INSPECTION_DATE_FORMAT).ok()
}

/// Returns the UTC day of local midnight on `date` for a zone `utc_offset_hours` ahead of UTC.
///
/// ```
/// use chrono::NaiveDate;
/// use pollution_weather::inspection_utc_day;
///
/// let local = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
/// assert_eq!(inspection_utc_day(local, 3), NaiveDate::from_ymd_opt(2023, 6, 14));
/// ```
pub fn inspection_utc_day(date: NaiveDate, utc_offset_hours: i64) -> Option<NaiveDate> {
    let shift = TimeDelta::try_hours(utc_offset_hours)?;
    date.and_time(NaiveTime::MIN)
        .checked_sub_signed(shift)
        .map(|utc| utc.date())
}

/// Builds the UTC day of a weather observation from its UTC components.
///
/// Returns `None` when the components do not form a valid timestamp
/// (e.g. month 13, February 30th or hour 24). The hour is discarded.
pub fn weather_utc_day(year: i64, month: i64, day: i64, hour: i64) -> Option<NaiveDate> {
    let hour = u32::try_from(hour).ok()?;
    NaiveTime::from_hms_opt(hour, 0, 0)?;
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, TransformError> {
    df.column(name)
        .map_err(|e| TransformError::ColumnNotFound(name.to_string(), e))
}

fn log_summary(source: &str, summary: TimeParseSummary) {
    if summary.unparsed > 0 {
        warn!(
            "{} of {} {} dates could not be parsed; those rows get no UTC day",
            summary.unparsed, summary.total, source
        );
    } else {
        info!("All {} {} dates parsed", summary.total, source);
    }
}

/// Adds the parsed `date` and the derived `utc_day` columns to the inspection frame.
///
/// Unparsable or missing dates become null in both columns; one aggregate
/// warning is logged when that happens and processing continues.
pub fn normalize_inspection_times(
    inspections: InspectionLazyFrame,
    utc_offset_hours: i64,
) -> Result<(InspectionLazyFrame, TimeParseSummary), TransformError> {
    let mut df = inspections.frame.collect()?;

    let raw_dates = opt_strings(get_column(&df, COL_RAW_DATE)?).map_err(|e| {
        TransformError::ColumnType {
            column: COL_RAW_DATE.to_string(),
            source: e,
        }
    })?;
    let dates: Vec<Option<NaiveDate>> = raw_dates
        .iter()
        .map(|raw| raw.as_deref().and_then(parse_inspection_date))
        .collect();
    let utc_days: Vec<Option<NaiveDate>> = dates
        .iter()
        .map(|date| date.and_then(|d| inspection_utc_day(d, utc_offset_hours)))
        .collect();

    let summary = TimeParseSummary {
        total: dates.len(),
        unparsed: utc_days.iter().filter(|d| d.is_none()).count(),
    };
    log_summary("inspection", summary);

    df.with_column(date_series(COL_DATE, &dates)?)?;
    df.with_column(date_series(COL_UTC_DAY, &utc_days)?)?;
    Ok((InspectionLazyFrame::new(df.lazy()), summary))
}

/// Adds the `utc_day` column to the weather frame.
///
/// Rows whose UTC components are missing or invalid get a null `utc_day` and
/// are counted in one aggregate warning, the same way inspection dates are.
pub fn normalize_weather_times(
    weather: WeatherLazyFrame,
) -> Result<(WeatherLazyFrame, TimeParseSummary), TransformError> {
    let mut df = weather.frame.collect()?;

    let component = |name: &str| -> Result<Vec<Option<i64>>, TransformError> {
        opt_i64s(get_column(&df, name)?).map_err(|e| TransformError::ColumnType {
            column: name.to_string(),
            source: e,
        })
    };
    let years = component(COL_UTC_YEAR)?;
    let months = component(COL_UTC_MONTH)?;
    let days = component(COL_UTC_DAY_OF_MONTH)?;
    let hours = component(COL_UTC_HOUR)?;

    let utc_days: Vec<Option<NaiveDate>> = years
        .iter()
        .zip(&months)
        .zip(&days)
        .zip(&hours)
        .map(|(((year, month), day), hour)| match (year, month, day, hour) {
            (Some(y), Some(m), Some(d), Some(h)) => weather_utc_day(*y, *m, *d, *h),
            _ => None,
        })
        .collect();

    let summary = TimeParseSummary {
        total: utc_days.len(),
        unparsed: utc_days.iter().filter(|d| d.is_none()).count(),
    };
    log_summary("weather", summary);

    df.with_column(date_series(COL_UTC_DAY, &utc_days)?)?;
    Ok((WeatherLazyFrame::new(df.lazy()), summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::opt_dates;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_inspection_date() {
        assert_eq!(parse_inspection_date("15.06.2023"), Some(date(2023, 6, 15)));
        assert_eq!(parse_inspection_date(" 5.6.2023 "), Some(date(2023, 6, 5)));
        assert_eq!(parse_inspection_date("2023-06-15"), None);
        assert_eq!(parse_inspection_date("31.02.2023"), None);
        assert_eq!(parse_inspection_date(""), None);
    }

    #[test]
    fn test_inspection_utc_day_shifts_back_across_midnight() {
        assert_eq!(inspection_utc_day(date(2023, 6, 15), 3), Some(date(2023, 6, 14)));
        assert_eq!(inspection_utc_day(date(2023, 1, 1), 3), Some(date(2022, 12, 31)));
        assert_eq!(inspection_utc_day(date(2023, 6, 15), 0), Some(date(2023, 6, 15)));
        // West of Greenwich midnight stays on the same UTC day.
        assert_eq!(inspection_utc_day(date(2023, 6, 15), -5), Some(date(2023, 6, 15)));
    }

    #[test]
    fn test_inspection_utc_day_is_deterministic() {
        let first = inspection_utc_day(date(2023, 6, 15), 3);
        let second = inspection_utc_day(date(2023, 6, 15), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_weather_utc_day_discards_hour() {
        assert_eq!(weather_utc_day(2023, 6, 15, 21), Some(date(2023, 6, 15)));
        assert_eq!(weather_utc_day(2023, 6, 15, 0), Some(date(2023, 6, 15)));
    }

    #[test]
    fn test_weather_utc_day_rejects_invalid_components() {
        assert_eq!(weather_utc_day(2023, 13, 1, 0), None);
        assert_eq!(weather_utc_day(2023, 2, 30, 0), None);
        assert_eq!(weather_utc_day(2023, 6, 15, 24), None);
        assert_eq!(weather_utc_day(2023, 6, 15, -1), None);
    }

    #[test]
    fn test_normalize_inspection_times_counts_failures() -> Result<(), Box<dyn std::error::Error>> {
        let df = df! {
            COL_RAW_DATE => [Some("15.06.2023"), Some("not a date"), None],
        }?;
        let (frame, summary) =
            normalize_inspection_times(InspectionLazyFrame::new(df.lazy()), 3)?;
        assert_eq!(summary, TimeParseSummary { total: 3, unparsed: 2 });

        let out = frame.collect()?;
        assert_eq!(
            opt_dates(out.column(COL_UTC_DAY)?)?,
            vec![Some(date(2023, 6, 14)), None, None]
        );
        assert_eq!(
            opt_dates(out.column(COL_DATE)?)?,
            vec![Some(date(2023, 6, 15)), None, None]
        );
        Ok(())
    }

    #[test]
    fn test_normalize_weather_times() -> Result<(), Box<dyn std::error::Error>> {
        let df = df! {
            COL_UTC_YEAR => [Some(2023i64), Some(2023), None],
            COL_UTC_MONTH => [Some(6i64), Some(2), Some(6)],
            COL_UTC_DAY_OF_MONTH => [Some(15i64), Some(30), Some(15)],
            COL_UTC_HOUR => [Some(21i64), Some(0), Some(3)],
        }?;
        let (frame, summary) = normalize_weather_times(WeatherLazyFrame::new(df.lazy()))?;
        assert_eq!(summary, TimeParseSummary { total: 3, unparsed: 2 });
        assert_eq!(
            opt_dates(frame.collect()?.column(COL_UTC_DAY)?)?,
            vec![Some(date(2023, 6, 15)), None, None]
        );
        Ok(())
    }
}
