//! Reads the `;`-delimited air-quality inspection table.

use crate::config::InspectionColumns;
use crate::loading::error::LoadError;
use crate::types::columns::{COL_DISTRICT, COL_LATITUDE, COL_LONGITUDE, COL_RAW_DATE, COL_RESULT};
use crate::types::frames::inspection_frame::InspectionLazyFrame;
use crate::utils::{opt_strings, parse_decimal};
use log::info;
use polars::prelude::*;
use std::path::Path;

/// Loads the inspection file into an [`InspectionLazyFrame`] with canonical column names.
///
/// Every column is read as text (no schema inference); dates stay raw until
/// [`crate::normalize_inspection_times`] runs. Coordinates are parsed here and
/// become null when blank or malformed.
///
/// # Errors
///
/// * [`LoadError::MissingInput`] if `path` does not exist.
/// * [`LoadError::CsvRead`] if polars cannot parse the file.
/// * [`LoadError::MissingColumn`] if one of the configured header names is absent.
pub fn load_inspections(
    path: &Path,
    columns: &InspectionColumns,
) -> Result<InspectionLazyFrame, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingInput(path.to_path_buf()));
    }

    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| options.with_separator(b';'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .finish()
        .map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let text_column = |name: &str| -> Result<Vec<Option<String>>, LoadError> {
        let column = raw.column(name).map_err(|_| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })?;
        opt_strings(column).map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })
    };

    let dates = text_column(&columns.date)?;
    let results = text_column(&columns.result)?;
    let districts = text_column(&columns.district)?;
    let longitudes = parse_coordinates(text_column(&columns.longitude)?);
    let latitudes = parse_coordinates(text_column(&columns.latitude)?);

    let frame = DataFrame::new(vec![
        Column::new(COL_RAW_DATE.into(), dates),
        Column::new(COL_RESULT.into(), results),
        Column::new(COL_DISTRICT.into(), districts),
        Column::new(COL_LONGITUDE.into(), longitudes),
        Column::new(COL_LATITUDE.into(), latitudes),
    ])
    .map_err(|e| LoadError::FrameAssembly {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        "Loaded {} air quality inspections from {}",
        frame.height(),
        path.display()
    );
    Ok(InspectionLazyFrame::new(frame.lazy()))
}

fn parse_coordinates(raw: Vec<Option<String>>) -> Vec<Option<f64>> {
    raw.iter()
        .map(|value| value.as_deref().and_then(parse_decimal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Дата;Адрес;Результаты;Район;Долгота;Широта";

    fn write_fixture(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_inspections_renames_and_parses_coordinates() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_fixture(&[
            "15.06.2023;ул. Ленина, 1;Выявлены повышенные концентрации;Арбат;37,59;55,75",
            "16.06.2023;ул. Мира, 2;Нарушений не выявлено;Басманный;37.66;55.77",
            "17.06.2023;ул. Мира, 3;;Басманный;;",
        ]);

        let df = load_inspections(file.path(), &InspectionColumns::default())?.collect()?;
        assert_eq!(df.height(), 3);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![COL_RAW_DATE, COL_RESULT, COL_DISTRICT, COL_LONGITUDE, COL_LATITUDE]
        );

        let longitudes = df.column(COL_LONGITUDE)?.f64()?;
        assert_eq!(longitudes.get(0), Some(37.59));
        assert_eq!(longitudes.get(1), Some(37.66));
        assert_eq!(longitudes.get(2), None);

        let results = df.column(COL_RESULT)?.str()?;
        assert_eq!(results.get(2), None);
        Ok(())
    }

    #[test]
    fn test_load_inspections_missing_file() {
        let result = load_inspections(
            Path::new("/definitely/not/here/air_quality_inspections.csv"),
            &InspectionColumns::default(),
        );
        assert!(matches!(result, Err(LoadError::MissingInput(_))));
    }

    #[test]
    fn test_load_inspections_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Дата;Результаты;Район").unwrap();
        writeln!(file, "15.06.2023;ok;Арбат").unwrap();
        file.flush().unwrap();

        let result = load_inspections(file.path(), &InspectionColumns::default());
        match result {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "Долгота"),
            other => panic!("expected MissingColumn, got {:?}", other.err()),
        }
    }
}
