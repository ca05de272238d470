use crate::transform::error::TransformError;
use crate::types::columns::{COL_EXCEEDANCE, COL_RESULT};
use crate::types::frames::inspection_frame::InspectionLazyFrame;
use log::info;
use polars::prelude::*;

/// Returns `true` when the inspection result text reports elevated pollutant levels.
///
/// Matching is a case-insensitive substring test against `trigger`; a missing
/// result never matches.
///
/// ```
/// use pollution_weather::is_exceedance;
///
/// let trigger = "выявлены повышенные";
/// assert!(is_exceedance(Some("Выявлены повышенные концентрации"), trigger));
/// assert!(!is_exceedance(Some("Нарушений не выявлено"), trigger));
/// assert!(!is_exceedance(None, trigger));
/// ```
pub fn is_exceedance(result: Option<&str>, trigger: &str) -> bool {
    result.is_some_and(|text| text.to_lowercase().contains(&trigger.to_lowercase()))
}

/// Adds the `exceedance` column (Int32, 1 or 0) derived from the `result` column.
pub fn classify_inspections(
    inspections: InspectionLazyFrame,
    trigger: &str,
) -> Result<InspectionLazyFrame, TransformError> {
    let mut df = inspections.frame.collect()?;

    let flags: Vec<i32> = df
        .column(COL_RESULT)
        .map_err(|e| TransformError::ColumnNotFound(COL_RESULT.to_string(), e))?
        .str()
        .map_err(|e| TransformError::ColumnType {
            column: COL_RESULT.to_string(),
            source: e,
        })?
        .into_iter()
        .map(|result| i32::from(is_exceedance(result, trigger)))
        .collect();

    let exceedances = flags.iter().filter(|flag| **flag == 1).count();
    info!(
        "Classified {} inspections, {} report elevated levels",
        flags.len(),
        exceedances
    );

    df.with_column(Series::new(COL_EXCEEDANCE.into(), flags))?;
    Ok(InspectionLazyFrame::new(df.lazy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCEEDANCE_TRIGGER;

    #[test]
    fn test_is_exceedance_is_case_insensitive() {
        assert!(is_exceedance(
            Some("ВЫЯВЛЕНЫ ПОВЫШЕННЫЕ концентрации диоксида азота"),
            DEFAULT_EXCEEDANCE_TRIGGER
        ));
        assert!(is_exceedance(
            Some("По результатам: выявлены повышенные уровни"),
            DEFAULT_EXCEEDANCE_TRIGGER
        ));
        assert!(!is_exceedance(Some("выявлены"), DEFAULT_EXCEEDANCE_TRIGGER));
        assert!(!is_exceedance(Some(""), DEFAULT_EXCEEDANCE_TRIGGER));
    }

    #[test]
    fn test_classify_inspections_adds_flag_column() -> Result<(), Box<dyn std::error::Error>> {
        let df = df! {
            COL_RESULT => [
                Some("Выявлены повышенные концентрации"),
                Some("Нарушений не выявлено"),
                None,
            ],
        }?;
        let classified =
            classify_inspections(InspectionLazyFrame::new(df.lazy()), DEFAULT_EXCEEDANCE_TRIGGER)?
                .collect()?;
        let flags: Vec<Option<i32>> = classified.column(COL_EXCEEDANCE)?.i32()?.into_iter().collect();
        assert_eq!(flags, vec![Some(1), Some(0), Some(0)]);
        Ok(())
    }
}
