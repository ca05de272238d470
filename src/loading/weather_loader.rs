//! Reads the whitespace-delimited historical weather table.

use crate::loading::error::LoadError;
use crate::types::columns::{FieldKind, WEATHER_SCHEMA};
use crate::types::frames::weather_frame::WeatherLazyFrame;
use crate::utils::{parse_decimal, parse_integer};
use log::{debug, info};
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Column buffer for one positional field, typed by its [`FieldKind`].
enum FieldBuffer {
    Text(Vec<Option<String>>),
    Integer(Vec<Option<i64>>),
    Decimal(Vec<Option<f64>>),
}

impl FieldBuffer {
    fn new(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldBuffer::Text(Vec::new()),
            FieldKind::Integer => FieldBuffer::Integer(Vec::new()),
            FieldKind::Decimal => FieldBuffer::Decimal(Vec::new()),
        }
    }

    fn push(&mut self, raw: Option<&str>) {
        match self {
            FieldBuffer::Text(values) => values.push(raw.map(str::to_string)),
            FieldBuffer::Integer(values) => values.push(raw.and_then(parse_integer)),
            FieldBuffer::Decimal(values) => values.push(raw.and_then(parse_decimal)),
        }
    }

    fn into_column(self, name: &str) -> Column {
        match self {
            FieldBuffer::Text(values) => Column::new(name.into(), values),
            FieldBuffer::Integer(values) => Column::new(name.into(), values),
            FieldBuffer::Decimal(values) => Column::new(name.into(), values),
        }
    }
}

/// Parses weather observation lines into a DataFrame following [`WEATHER_SCHEMA`].
///
/// The first `header_lines` lines are skipped, as are blank lines after them.
/// Each remaining line is split on runs of whitespace and mapped positionally:
/// missing trailing fields become null, surplus fields are ignored and values
/// that do not parse as the field's kind become null.
pub fn parse_weather_table(text: &str, header_lines: usize) -> PolarsResult<DataFrame> {
    let mut buffers: Vec<FieldBuffer> = WEATHER_SCHEMA
        .iter()
        .map(|(_, kind)| FieldBuffer::new(*kind))
        .collect();

    let mut short_rows = 0usize;
    for line in text.lines().skip(header_lines) {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let mut seen = 0usize;
        for buffer in buffers.iter_mut() {
            let field = fields.next();
            if field.is_some() {
                seen += 1;
            }
            buffer.push(field);
        }
        if seen < WEATHER_SCHEMA.len() {
            short_rows += 1;
        }
    }
    if short_rows > 0 {
        debug!(
            "{} weather rows had fewer than {} fields; missing fields are null",
            short_rows,
            WEATHER_SCHEMA.len()
        );
    }

    let columns = buffers
        .into_iter()
        .zip(WEATHER_SCHEMA.iter())
        .map(|(buffer, (name, _))| buffer.into_column(name))
        .collect();
    DataFrame::new(columns)
}

/// Loads the weather file into a [`WeatherLazyFrame`].
///
/// The file is decoded as UTF-8, replacing invalid byte sequences, since only
/// numeric fields are used downstream.
///
/// # Errors
///
/// * [`LoadError::MissingInput`] if `path` does not exist.
/// * [`LoadError::Io`] if the file cannot be read.
pub fn load_weather(path: &Path, header_lines: usize) -> Result<WeatherLazyFrame, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingInput(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let text = String::from_utf8_lossy(&bytes);

    let frame = parse_weather_table(&text, header_lines).map_err(|e| LoadError::FrameAssembly {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        "Loaded {} weather observations from {}",
        frame.height(),
        path.display()
    );
    Ok(WeatherLazyFrame::new(frame.lazy()))
}
