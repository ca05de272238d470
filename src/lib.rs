mod config;
mod error;
mod loading;
mod pipeline;
mod render;
mod report;
mod transform;
mod types;
mod utils;

pub use config::*;
pub use error::PipelineError;
pub use pipeline::{analyze, ensure_inputs_exist, run};

pub use loading::error::LoadError;
pub use loading::inspection_loader::load_inspections;
pub use loading::weather_loader::{load_weather, parse_weather_table};

pub use transform::classify::{classify_inspections, is_exceedance};
pub use transform::error::TransformError;
pub use transform::join::join_weather;
pub use transform::time::{
    inspection_utc_day, normalize_inspection_times, normalize_weather_times,
    parse_inspection_date, weather_utc_day, INSPECTION_DATE_FORMAT,
};

pub use report::aggregate::{
    correlation_matrix, district_exceedances, district_weather_profiles, monthly_exceedances,
};
pub use report::build_report;
pub use report::error::ReportError;
pub use report::records::{inspection_markers, joined_observations};

pub use render::dashboard::pollution_dashboard;
pub use render::error::RenderError;
pub use render::map::pollution_map;
pub use render::raster::{
    correlation_heatmap, district_exceedances_chart, exceedances_plot, weather_impact_chart,
};
pub use render::render_all;
pub use render::sink::{ArtifactSink, FileSink, MemorySink};

pub use types::artifact::*;
pub use types::columns;
pub use types::frames::inspection_frame::InspectionLazyFrame;
pub use types::frames::joined_frame::JoinedFrame;
pub use types::frames::weather_frame::WeatherLazyFrame;
pub use types::lat_lon::LatLon;
pub use types::month::Month;
pub use types::summary::*;
