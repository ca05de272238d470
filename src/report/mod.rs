pub mod aggregate;
pub mod error;
pub mod records;

use crate::report::aggregate::{
    correlation_matrix, district_exceedances, district_weather_profiles, monthly_exceedances,
};
use crate::report::error::ReportError;
use crate::report::records::{inspection_markers, joined_observations};
use crate::types::frames::inspection_frame::InspectionLazyFrame;
use crate::types::frames::joined_frame::JoinedFrame;
use crate::types::summary::{ExceedanceReport, JoinReport, TimeParseSummary};
use log::{info, warn};

/// Computes every summary the renderers consume.
///
/// `inspections` is the classified inspection table before the join; it only
/// feeds the map markers.
pub fn build_report(
    inspections: &InspectionLazyFrame,
    joined: &JoinedFrame,
    inspection_time: TimeParseSummary,
    weather_time: TimeParseSummary,
    join: JoinReport,
) -> Result<ExceedanceReport, ReportError> {
    if joined.is_empty() {
        warn!("No inspection matched a weather observation; charts will be empty");
    }

    let monthly = monthly_exceedances(joined)?;
    let districts = district_exceedances(joined)?;
    let profiles = district_weather_profiles(joined)?;
    let correlation = correlation_matrix(joined)?;
    let observations = joined_observations(joined)?;
    let markers = inspection_markers(&inspections.collect()?)?;

    info!(
        "Aggregated {} months, {} districts, {} map markers",
        monthly.len(),
        districts.len(),
        markers.len()
    );

    Ok(ExceedanceReport {
        inspection_time,
        weather_time,
        join,
        monthly,
        districts,
        profiles,
        correlation,
        observations,
        markers,
    })
}
