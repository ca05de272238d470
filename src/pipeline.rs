//! Runs the stages in order: load, normalize time, classify, join, aggregate, render.
//!
//! Every stage receives its inputs explicitly and returns a new frame; the
//! only shared state is the [`PipelineConfig`].

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::loading::error::LoadError;
use crate::loading::inspection_loader::load_inspections;
use crate::loading::weather_loader::load_weather;
use crate::render::render_all;
use crate::render::sink::ArtifactSink;
use crate::report::build_report;
use crate::transform::join::join_weather;
use crate::types::summary::ExceedanceReport;
use log::info;

/// Fails with [`LoadError::MissingInput`] for the first input file that does not exist.
///
/// Runs before anything is loaded so that a missing file never leaves partial output.
pub fn ensure_inputs_exist(config: &PipelineConfig) -> Result<(), LoadError> {
    for path in [&config.inspections_path, &config.weather_path] {
        if !path.exists() {
            return Err(LoadError::MissingInput(path.clone()));
        }
    }
    Ok(())
}

/// Loads both inputs and computes every summary, without rendering anything.
pub fn analyze(config: &PipelineConfig) -> Result<ExceedanceReport, PipelineError> {
    ensure_inputs_exist(config)?;

    let inspections = load_inspections(&config.inspections_path, &config.inspection_columns)?;
    let weather = load_weather(&config.weather_path, config.weather_header_lines)?;

    let (inspections, inspection_time) = inspections.normalize_time(config.utc_offset_hours)?;
    let (weather, weather_time) = weather.normalize_time()?;
    let inspections = inspections.classify(&config.exceedance_trigger)?;
    info!("Inspection and weather times aligned to UTC days");

    let (joined, join) = join_weather(inspections.clone(), weather)?;
    let report = build_report(&inspections, &joined, inspection_time, weather_time, join)?;
    Ok(report)
}

/// Runs the whole pipeline, writing the six report artifacts to `sink`.
pub fn run(config: &PipelineConfig, sink: &mut dyn ArtifactSink) -> Result<(), PipelineError> {
    let report = analyze(config)?;
    render_all(&report, config, sink)?;
    info!("Analysis complete, results saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sink::MemorySink;
    use crate::types::artifact::{ArtifactKind, ARTIFACT_NAMES};
    use crate::types::summary::DistrictExceedance;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    const INSPECTIONS: &str = "\
Дата;Адрес;Результаты;Район;Долгота;Широта
15.06.2023;ул. Ленина, 1;Выявлены повышенные концентрации NO2;Арбат;37,59;55,75
15.06.2023;ул. Мира, 2;Превышений не выявлено;Басманный;37,66;55,77
";

    fn weather_file(dir: &Path, header_lines: usize) -> std::io::Result<()> {
        let mut text = String::new();
        for i in 0..header_lines {
            text.push_str(&format!("# metadata {}\n", i));
        }
        // 2023-06-14 21:00 UTC is midnight of the 15th in UTC+3
        text.push_str(
            "27612 2023 6 14 21 2023 6 15 0 00:00 3 20.0 8 2 180 3.5 0.4 18.5 71 1012.3\n",
        );
        fs::write(dir.join("weather.txt"), text)
    }

    fn fixture() -> Result<(TempDir, PipelineConfig), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("inspections.csv"), INSPECTIONS)?;
        weather_file(dir.path(), 22)?;
        let config = PipelineConfig::builder()
            .inspections_path(dir.path().join("inspections.csv"))
            .weather_path(dir.path().join("weather.txt"))
            .build();
        Ok((dir, config))
    }

    #[test]
    fn test_analyze_same_day_inspections_share_one_weather_row() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, config) = fixture()?;
        let report = analyze(&config)?;

        assert_eq!(report.join.retained_rows, 2);
        assert_eq!(report.observations.len(), 2);
        let first = &report.observations[0];
        let second = &report.observations[1];
        assert_eq!(first.utc_day, second.utc_day);
        assert_eq!(
            (first.wind_speed, first.precipitation, first.temperature),
            (second.wind_speed, second.precipitation, second.temperature)
        );
        assert_eq!(first.wind_speed, 3.5);

        assert_eq!(
            report.districts,
            vec![
                DistrictExceedance { district: "Арбат".to_string(), exceedances: 1 },
                DistrictExceedance { district: "Басманный".to_string(), exceedances: 0 },
            ]
        );
        let total: i64 = report.districts.iter().map(|d| d.exceedances).sum();
        assert_eq!(total, 1);

        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.monthly[0].exceedances, 1);
        assert_eq!(report.markers.len(), 2);
        assert_eq!(report.inspection_time.unparsed, 0);
        assert_eq!(report.weather_time.unparsed, 0);
        Ok(())
    }

    #[test]
    fn test_run_writes_every_artifact_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, config) = fixture()?;
        let mut sink = MemorySink::new();
        run(&config, &mut sink)?;

        let names: Vec<&str> = sink.artifacts.iter().map(|a| a.file_name).collect();
        assert_eq!(names, ARTIFACT_NAMES);
        for artifact in &sink.artifacts {
            assert!(!artifact.bytes.is_empty(), "{} is empty", artifact.file_name);
            let expected = if artifact.file_name.ends_with(".png") {
                ArtifactKind::Png
            } else {
                ArtifactKind::Html
            };
            assert_eq!(artifact.kind, expected);
        }
        Ok(())
    }

    #[test]
    fn test_run_with_missing_weather_file_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("inspections.csv"), INSPECTIONS)?;
        let config = PipelineConfig::builder()
            .inspections_path(dir.path().join("inspections.csv"))
            .weather_path(dir.path().join("weather.txt"))
            .build();

        let mut sink = MemorySink::new();
        let result = run(&config, &mut sink);
        match result {
            Err(PipelineError::Load(LoadError::MissingInput(path))) => {
                assert!(path.ends_with("weather.txt"))
            }
            other => panic!("expected a missing input error, got {:?}", other),
        }
        assert!(sink.is_empty());
        Ok(())
    }

    #[test]
    fn test_ensure_inputs_exist_checks_inspections_first() {
        let config = PipelineConfig::builder()
            .inspections_path("/nowhere/inspections.csv")
            .weather_path("/nowhere/weather.txt")
            .build();
        match ensure_inputs_exist(&config) {
            Err(LoadError::MissingInput(path)) => assert!(path.ends_with("inspections.csv")),
            other => panic!("expected a missing input error, got {:?}", other),
        }
    }
}
