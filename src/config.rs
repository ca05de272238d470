//! The configuration record threaded through every pipeline stage.
//!
//! There is no user-facing configuration surface: the binary runs with
//! [`PipelineConfig::default()`]. Tests and benchmarks use the builder to
//! point the pipeline at fixture files.

use crate::types::lat_lon::LatLon;
use bon::bon;
use std::path::PathBuf;

pub const DEFAULT_INSPECTIONS_FILE: &str = "air_quality_inspections.csv";
pub const DEFAULT_WEATHER_FILE: &str = "weather.txt";
pub const DEFAULT_WEATHER_HEADER_LINES: usize = 22;
/// Local inspection time is UTC+3.
pub const DEFAULT_UTC_OFFSET_HOURS: i64 = 3;
/// Lower-cased marker meaning "elevated levels were detected".
pub const DEFAULT_EXCEEDANCE_TRIGGER: &str = "выявлены повышенные";
pub const DEFAULT_MAP_CENTER: LatLon = LatLon(55.75, 37.61);
pub const DEFAULT_MAP_ZOOM: u8 = 10;

/// Header names of the inspection file columns the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionColumns {
    pub date: String,
    pub result: String,
    pub district: String,
    pub longitude: String,
    pub latitude: String,
}

impl Default for InspectionColumns {
    fn default() -> Self {
        Self {
            date: "Дата".to_string(),
            result: "Результаты".to_string(),
            district: "Район".to_string(),
            longitude: "Долгота".to_string(),
            latitude: "Широта".to_string(),
        }
    }
}

/// File locations, fixed offsets and markers used by a pipeline run.
///
/// # Examples
///
/// ```
/// use pollution_weather::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .inspections_path("fixtures/inspections.csv")
///     .utc_offset_hours(3)
///     .build();
/// assert_eq!(config.weather_header_lines, 22);
/// assert_eq!(config.weather_path.to_str(), Some("weather.txt"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub inspections_path: PathBuf,
    pub weather_path: PathBuf,
    /// Number of metadata lines preceding the first weather observation.
    pub weather_header_lines: usize,
    pub utc_offset_hours: i64,
    pub exceedance_trigger: String,
    pub inspection_columns: InspectionColumns,
    pub map_center: LatLon,
    pub map_zoom: u8,
}

#[bon]
impl PipelineConfig {
    #[builder]
    pub fn new(
        #[builder(into, default = PathBuf::from(DEFAULT_INSPECTIONS_FILE))] inspections_path: PathBuf,
        #[builder(into, default = PathBuf::from(DEFAULT_WEATHER_FILE))] weather_path: PathBuf,
        #[builder(default = DEFAULT_WEATHER_HEADER_LINES)] weather_header_lines: usize,
        #[builder(default = DEFAULT_UTC_OFFSET_HOURS)] utc_offset_hours: i64,
        #[builder(into, default = DEFAULT_EXCEEDANCE_TRIGGER.to_string())] exceedance_trigger: String,
        #[builder(default)] inspection_columns: InspectionColumns,
        #[builder(default = DEFAULT_MAP_CENTER)] map_center: LatLon,
        #[builder(default = DEFAULT_MAP_ZOOM)] map_zoom: u8,
    ) -> Self {
        Self {
            inspections_path,
            weather_path,
            weather_header_lines,
            utc_offset_hours,
            exceedance_trigger,
            inspection_columns,
            map_center,
            map_zoom,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
