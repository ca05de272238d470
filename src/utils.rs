use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// `NaiveDate::num_days_from_ce` of 1970-01-01, the epoch of polars' `Date` type.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parses a decimal number, accepting a comma as decimal separator.
/// Blank, malformed and non-finite values yield `None`.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a whole number; integral decimals such as `"6.0"` are accepted.
pub(crate) fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        parse_decimal(trimmed)
            .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    })
}

/// Trims a text value, mapping blank text to `None`.
pub(crate) fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn opt_strings(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    Ok(column.str()?.into_iter().map(non_empty).collect())
}

pub(crate) fn opt_i64s(column: &Column) -> PolarsResult<Vec<Option<i64>>> {
    let cast = column.cast(&DataType::Int64)?;
    let values = cast.i64()?.into_iter().collect();
    Ok(values)
}

pub(crate) fn opt_f64s(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast.f64()?.into_iter().collect();
    Ok(values)
}

pub(crate) fn opt_dates(column: &Column) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let cast = column.cast(&DataType::Int32)?;
    let values = cast
        .i32()?
        .into_iter()
        .map(|days| days.and_then(days_to_date))
        .collect();
    Ok(values)
}

/// Builds a polars `Date` series from optional chrono dates.
pub(crate) fn date_series(name: &str, dates: &[Option<NaiveDate>]) -> PolarsResult<Series> {
    let days: Vec<Option<i32>> = dates
        .iter()
        .map(|d| d.map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE))
        .collect();
    Series::new(name.into(), days).cast(&DataType::Date)
}

fn days_to_date(days_since_epoch: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days_since_epoch.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_accepts_comma_and_rejects_junk() {
        assert_eq!(parse_decimal("37,61"), Some(37.61));
        assert_eq!(parse_decimal(" 55.75 "), Some(55.75));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("2023"), Some(2023));
        assert_eq!(parse_integer("6.0"), Some(6));
        assert_eq!(parse_integer("6.5"), None);
        assert_eq!(parse_integer("x"), None);
    }

    #[test]
    fn test_date_series_round_trips_through_polars() -> Result<(), Box<dyn std::error::Error>> {
        let dates = vec![
            NaiveDate::from_ymd_opt(2023, 6, 14),
            None,
            NaiveDate::from_ymd_opt(1969, 12, 31),
        ];
        let series = date_series("utc_day", &dates)?;
        assert_eq!(series.dtype(), &DataType::Date);
        assert_eq!(series.null_count(), 1);

        let column = Column::from(series);
        assert_eq!(opt_dates(&column)?, dates);
        Ok(())
    }
}
