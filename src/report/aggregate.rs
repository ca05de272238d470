//! Aggregations over the joined table.
//!
//! Each function is independent and reads only the post-drop [`JoinedFrame`].

use crate::report::error::ReportError;
use crate::types::columns::*;
use crate::types::frames::joined_frame::JoinedFrame;
use crate::types::month::Month;
use crate::types::summary::{
    CorrelationMatrix, DistrictExceedance, DistrictWeatherProfile, MonthlyExceedance,
};
use crate::utils::{opt_f64s, opt_i64s, opt_strings};
use polars::prelude::*;

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ReportError> {
    df.column(name)
        .map_err(|e| ReportError::ColumnNotFound(name.to_string(), e))
}

/// Unwraps a value of an aggregate column, which is never null for present groups.
fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T, ReportError> {
    value.ok_or_else(|| ReportError::UnexpectedNull {
        column: column.to_string(),
        row,
    })
}

/// Sums exceedances per calendar month of the UTC day, in chronological order.
pub fn monthly_exceedances(joined: &JoinedFrame) -> Result<Vec<MonthlyExceedance>, ReportError> {
    let df = joined
        .frame
        .clone()
        .lazy()
        .group_by([
            col(COL_UTC_DAY).dt().year().cast(DataType::Int64).alias(COL_YEAR),
            col(COL_UTC_DAY).dt().month().cast(DataType::Int64).alias(COL_MONTH),
        ])
        .agg([col(COL_EXCEEDANCE)
            .cast(DataType::Int64)
            .sum()
            .alias(COL_EXCEEDANCES)])
        .sort([COL_YEAR, COL_MONTH], SortMultipleOptions::default())
        .collect()?;

    let years = opt_i64s(get_column(&df, COL_YEAR)?)?;
    let months = opt_i64s(get_column(&df, COL_MONTH)?)?;
    let counts = opt_i64s(get_column(&df, COL_EXCEEDANCES)?)?;

    years
        .into_iter()
        .zip(months)
        .zip(counts)
        .enumerate()
        .map(|(row, ((year, month), count))| {
            let year = required(year, COL_YEAR, row)?;
            let month = required(month, COL_MONTH, row)?;
            Ok(MonthlyExceedance {
                month: Month::new(month as u32, year as i32),
                exceedances: required(count, COL_EXCEEDANCES, row)?,
            })
        })
        .collect()
}

/// Sums exceedances per district, sorted by district name.
///
/// A district whose joined rows are all clean reports 0.
pub fn district_exceedances(joined: &JoinedFrame) -> Result<Vec<DistrictExceedance>, ReportError> {
    let df = joined
        .frame
        .clone()
        .lazy()
        .group_by([col(COL_DISTRICT)])
        .agg([col(COL_EXCEEDANCE)
            .cast(DataType::Int64)
            .sum()
            .alias(COL_EXCEEDANCES)])
        .sort([COL_DISTRICT], SortMultipleOptions::default())
        .collect()?;

    let districts = opt_strings(get_column(&df, COL_DISTRICT)?)?;
    let counts = opt_i64s(get_column(&df, COL_EXCEEDANCES)?)?;

    districts
        .into_iter()
        .zip(counts)
        .enumerate()
        .map(|(row, (district, count))| {
            Ok(DistrictExceedance {
                district: required(district, COL_DISTRICT, row)?,
                exceedances: required(count, COL_EXCEEDANCES, row)?,
            })
        })
        .collect()
}

/// Mean exceedance rate, wind speed, precipitation and temperature per district.
pub fn district_weather_profiles(
    joined: &JoinedFrame,
) -> Result<Vec<DistrictWeatherProfile>, ReportError> {
    let df = joined
        .frame
        .clone()
        .lazy()
        .group_by([col(COL_DISTRICT)])
        .agg([
            col(COL_EXCEEDANCE)
                .cast(DataType::Float64)
                .mean()
                .alias(COL_MEAN_EXCEEDANCE),
            col(COL_WIND_SPEED).mean().alias(COL_MEAN_WIND_SPEED),
            col(COL_PRECIPITATION).mean().alias(COL_MEAN_PRECIPITATION),
            col(COL_TEMPERATURE).mean().alias(COL_MEAN_TEMPERATURE),
        ])
        .sort([COL_DISTRICT], SortMultipleOptions::default())
        .collect()?;

    let districts = opt_strings(get_column(&df, COL_DISTRICT)?)?;
    let exceedance = opt_f64s(get_column(&df, COL_MEAN_EXCEEDANCE)?)?;
    let wind = opt_f64s(get_column(&df, COL_MEAN_WIND_SPEED)?)?;
    let precipitation = opt_f64s(get_column(&df, COL_MEAN_PRECIPITATION)?)?;
    let temperature = opt_f64s(get_column(&df, COL_MEAN_TEMPERATURE)?)?;

    (0..df.height())
        .map(|row| {
            Ok(DistrictWeatherProfile {
                district: required(districts[row].clone(), COL_DISTRICT, row)?,
                mean_exceedance: required(exceedance[row], COL_MEAN_EXCEEDANCE, row)?,
                mean_wind_speed: required(wind[row], COL_MEAN_WIND_SPEED, row)?,
                mean_precipitation: required(precipitation[row], COL_MEAN_PRECIPITATION, row)?,
                mean_temperature: required(temperature[row], COL_MEAN_TEMPERATURE, row)?,
            })
        })
        .collect()
}

/// Pearson correlation of two columns with population moments.
fn pearson(a: &str, b: &str) -> Expr {
    let a = col(a).cast(DataType::Float64);
    let b = col(b).cast(DataType::Float64);
    let covariance = ((a.clone() - a.clone().mean()) * (b.clone() - b.clone().mean())).mean();
    covariance / (a.std(0) * b.std(0))
}

/// Pairwise Pearson correlations of the numeric joined columns.
///
/// Entries are `NaN` where a column has no variance or there are fewer than
/// two rows.
pub fn correlation_matrix(joined: &JoinedFrame) -> Result<CorrelationMatrix, ReportError> {
    let n = CORRELATION_COLUMNS.len();
    let mut exprs = Vec::with_capacity(n * (n + 1) / 2);
    for (i, a) in CORRELATION_COLUMNS.iter().enumerate() {
        for b in &CORRELATION_COLUMNS[i..] {
            exprs.push(pearson(a, b).alias(format!("{a}|{b}")));
        }
    }
    let df = joined.frame.clone().lazy().select(exprs).collect()?;

    let mut values = vec![vec![f64::NAN; n]; n];
    for (i, a) in CORRELATION_COLUMNS.iter().enumerate() {
        for (offset, b) in CORRELATION_COLUMNS[i..].iter().enumerate() {
            let j = i + offset;
            let value = opt_f64s(get_column(&df, &format!("{a}|{b}"))?)?
                .first()
                .copied()
                .flatten()
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(-1.0, 1.0))
                .unwrap_or(f64::NAN);
            values[i][j] = value;
            values[j][i] = value;
        }
    }

    Ok(CorrelationMatrix {
        labels: CORRELATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date_series;
    use chrono::NaiveDate;

    fn joined(rows: &[(NaiveDate, i32, &str, f64, f64, f64)]) -> JoinedFrame {
        let days: Vec<Option<NaiveDate>> = rows.iter().map(|r| Some(r.0)).collect();
        let mut df = df! {
            COL_EXCEEDANCE => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            COL_DISTRICT => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
            COL_LONGITUDE => vec![37.6f64; rows.len()],
            COL_LATITUDE => rows.iter().enumerate().map(|(i, _)| 55.0 + i as f64).collect::<Vec<_>>(),
            COL_WIND_SPEED => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
            COL_PRECIPITATION => rows.iter().map(|r| r.4).collect::<Vec<_>>(),
            COL_TEMPERATURE => rows.iter().map(|r| r.5).collect::<Vec<_>>(),
        }
        .unwrap();
        df.with_column(date_series(COL_UTC_DAY, &days).unwrap())
            .unwrap();
        JoinedFrame::new(df)
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    #[test]
    fn test_monthly_exceedances_sorted_by_month() -> Result<(), ReportError> {
        let frame = joined(&[
            (day(7, 2), 1, "Арбат", 2.0, 0.0, 20.0),
            (day(6, 14), 1, "Арбат", 3.0, 0.0, 18.0),
            (day(6, 20), 1, "Басманный", 1.0, 1.0, 17.0),
            (day(7, 3), 0, "Басманный", 4.0, 0.5, 22.0),
        ]);
        let monthly = monthly_exceedances(&frame)?;
        assert_eq!(
            monthly,
            vec![
                MonthlyExceedance { month: Month::new(6, 2023), exceedances: 2 },
                MonthlyExceedance { month: Month::new(7, 2023), exceedances: 1 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_district_exceedances_zero_not_missing() -> Result<(), ReportError> {
        let frame = joined(&[
            (day(6, 14), 1, "Арбат", 2.0, 0.0, 20.0),
            (day(6, 14), 0, "Басманный", 2.0, 0.0, 20.0),
            (day(6, 15), 0, "Басманный", 3.0, 0.0, 21.0),
        ]);
        let districts = district_exceedances(&frame)?;
        assert_eq!(
            districts,
            vec![
                DistrictExceedance { district: "Арбат".to_string(), exceedances: 1 },
                DistrictExceedance { district: "Басманный".to_string(), exceedances: 0 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_district_weather_profiles_are_means() -> Result<(), ReportError> {
        let frame = joined(&[
            (day(6, 14), 1, "Арбат", 2.0, 1.0, 20.0),
            (day(6, 15), 0, "Арбат", 4.0, 0.0, 22.0),
        ]);
        let profiles = district_weather_profiles(&frame)?;
        assert_eq!(profiles.len(), 1);
        let arbat = &profiles[0];
        assert_eq!(arbat.district, "Арбат");
        assert!((arbat.mean_exceedance - 0.5).abs() < 1e-12);
        assert!((arbat.mean_wind_speed - 3.0).abs() < 1e-12);
        assert!((arbat.mean_precipitation - 0.5).abs() < 1e-12);
        assert!((arbat.mean_temperature - 21.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_correlation_matrix_is_symmetric_with_unit_diagonal() -> Result<(), ReportError> {
        let frame = joined(&[
            (day(6, 14), 1, "Арбат", 1.0, 0.0, 10.0),
            (day(6, 15), 0, "Арбат", 2.0, 0.0, 20.0),
            (day(6, 16), 1, "Арбат", 3.0, 0.0, 30.0),
        ]);
        let matrix = correlation_matrix(&frame)?;
        assert_eq!(matrix.size(), CORRELATION_COLUMNS.len());

        let wind = CORRELATION_COLUMNS.iter().position(|c| *c == COL_WIND_SPEED).unwrap();
        let temp = CORRELATION_COLUMNS.iter().position(|c| *c == COL_TEMPERATURE).unwrap();
        let precip = CORRELATION_COLUMNS.iter().position(|c| *c == COL_PRECIPITATION).unwrap();

        assert!((matrix.get(wind, wind).unwrap() - 1.0).abs() < 1e-9);
        assert!((matrix.get(wind, temp).unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(matrix.get(wind, temp), matrix.get(temp, wind));
        // constant precipitation has no variance
        assert!(matrix.get(precip, wind).unwrap().is_nan());
        Ok(())
    }

    #[test]
    fn test_aggregates_of_empty_frame_are_empty() -> Result<(), ReportError> {
        let frame = joined(&[]);
        assert!(monthly_exceedances(&frame)?.is_empty());
        assert!(district_exceedances(&frame)?.is_empty());
        assert!(district_weather_profiles(&frame)?.is_empty());
        let matrix = correlation_matrix(&frame)?;
        assert!(matrix.values.iter().flatten().all(|v| v.is_nan()));
        Ok(())
    }
}
