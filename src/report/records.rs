//! Row-level views handed to the renderers.

use crate::report::error::ReportError;
use crate::types::columns::*;
use crate::types::frames::joined_frame::JoinedFrame;
use crate::types::lat_lon::LatLon;
use crate::types::summary::{JoinedObservation, MapMarker};
use crate::utils::{opt_dates, opt_f64s, opt_i64s, opt_strings};
use polars::prelude::*;

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ReportError> {
    df.column(name)
        .map_err(|e| ReportError::ColumnNotFound(name.to_string(), e))
}

fn null_at(column: &str, row: usize) -> ReportError {
    ReportError::UnexpectedNull {
        column: column.to_string(),
        row,
    }
}

/// Materializes every joined row, in table order.
pub fn joined_observations(joined: &JoinedFrame) -> Result<Vec<JoinedObservation>, ReportError> {
    let df = &joined.frame;
    let days = opt_dates(get_column(df, COL_UTC_DAY)?)?;
    let flags = opt_i64s(get_column(df, COL_EXCEEDANCE)?)?;
    let districts = opt_strings(get_column(df, COL_DISTRICT)?)?;
    let longitudes = opt_f64s(get_column(df, COL_LONGITUDE)?)?;
    let latitudes = opt_f64s(get_column(df, COL_LATITUDE)?)?;
    let wind = opt_f64s(get_column(df, COL_WIND_SPEED)?)?;
    let precipitation = opt_f64s(get_column(df, COL_PRECIPITATION)?)?;
    let temperature = opt_f64s(get_column(df, COL_TEMPERATURE)?)?;

    (0..df.height())
        .map(|row| {
            Ok(JoinedObservation {
                utc_day: days[row].ok_or_else(|| null_at(COL_UTC_DAY, row))?,
                exceedance: flags[row].ok_or_else(|| null_at(COL_EXCEEDANCE, row))? == 1,
                district: districts[row]
                    .clone()
                    .ok_or_else(|| null_at(COL_DISTRICT, row))?,
                position: LatLon(
                    latitudes[row].ok_or_else(|| null_at(COL_LATITUDE, row))?,
                    longitudes[row].ok_or_else(|| null_at(COL_LONGITUDE, row))?,
                ),
                wind_speed: wind[row].ok_or_else(|| null_at(COL_WIND_SPEED, row))?,
                precipitation: precipitation[row]
                    .ok_or_else(|| null_at(COL_PRECIPITATION, row))?,
                temperature: temperature[row].ok_or_else(|| null_at(COL_TEMPERATURE, row))?,
            })
        })
        .collect()
}

/// Escapes text for inclusion in an HTML fragment.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn popup(date: Option<&str>, district: Option<&str>, result: Option<&str>) -> String {
    let field = |value: Option<&str>| escape_html(value.unwrap_or("-"));
    format!(
        "Дата: {}<br>Район: {}<br>Результат: {}",
        field(date),
        field(district),
        field(result)
    )
}

/// Builds one map marker per classified inspection that has both coordinates.
///
/// Works on the inspection table, not the joined one, so inspections without
/// matching weather still appear on the map.
pub fn inspection_markers(inspections: &DataFrame) -> Result<Vec<MapMarker>, ReportError> {
    let dates = opt_strings(get_column(inspections, COL_RAW_DATE)?)?;
    let results = opt_strings(get_column(inspections, COL_RESULT)?)?;
    let districts = opt_strings(get_column(inspections, COL_DISTRICT)?)?;
    let longitudes = opt_f64s(get_column(inspections, COL_LONGITUDE)?)?;
    let latitudes = opt_f64s(get_column(inspections, COL_LATITUDE)?)?;
    let flags = opt_i64s(get_column(inspections, COL_EXCEEDANCE)?)?;

    let markers = (0..inspections.height())
        .filter_map(|row| {
            let position = LatLon(latitudes[row]?, longitudes[row]?);
            Some(MapMarker {
                position,
                exceedance: flags[row] == Some(1),
                popup: popup(
                    dates[row].as_deref(),
                    districts[row].as_deref(),
                    results[row].as_deref(),
                ),
            })
        })
        .collect();
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspection_markers_skip_rows_without_coordinates() -> Result<(), Box<dyn std::error::Error>> {
        let df = df! {
            COL_RAW_DATE => [Some("15.06.2023"), Some("16.06.2023"), Some("17.06.2023")],
            COL_RESULT => [Some("Выявлены повышенные <NO2>"), Some("Норма"), None],
            COL_DISTRICT => [Some("Арбат"), Some("Басманный"), None],
            COL_LONGITUDE => [Some(37.59f64), None, Some(37.7)],
            COL_LATITUDE => [Some(55.75f64), Some(55.77), Some(55.8)],
            COL_EXCEEDANCE => [1i32, 0, 0],
        }?;

        let markers = inspection_markers(&df)?;
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].position, LatLon(55.75, 37.59));
        assert!(markers[0].exceedance);
        assert_eq!(
            markers[0].popup,
            "Дата: 15.06.2023<br>Район: Арбат<br>Результат: Выявлены повышенные &lt;NO2&gt;"
        );
        assert!(!markers[1].exceedance);
        assert!(markers[1].popup.contains("Район: -"));
        Ok(())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a & "b" <c>"#), "a &amp; &quot;b&quot; &lt;c&gt;");
    }
}
