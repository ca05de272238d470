pub mod dashboard;
pub mod error;
pub mod map;
pub mod palette;
pub mod raster;
pub mod sink;

use crate::config::PipelineConfig;
use crate::render::error::RenderError;
use crate::render::sink::ArtifactSink;
use crate::types::artifact::Artifact;
use crate::types::summary::ExceedanceReport;
use log::{debug, info};

/// Renders the six report artifacts in order and hands each to `sink`.
///
/// Stops at the first failure; artifacts already written stay written.
pub fn render_all(
    report: &ExceedanceReport,
    config: &PipelineConfig,
    sink: &mut dyn ArtifactSink,
) -> Result<(), RenderError> {
    let steps: [&dyn Fn() -> Result<Artifact, RenderError>; 6] = [
        &|| raster::exceedances_plot(&report.monthly),
        &|| raster::correlation_heatmap(&report.correlation),
        &|| raster::district_exceedances_chart(&report.districts),
        &|| raster::weather_impact_chart(&report.profiles),
        &|| map::pollution_map(&report.markers, config.map_center, config.map_zoom),
        &|| dashboard::pollution_dashboard(&report.observations),
    ];

    for step in steps {
        let artifact = step()?;
        debug!(
            "Rendered {} ({}, {} bytes)",
            artifact.file_name,
            artifact.kind,
            artifact.bytes.len()
        );
        sink.write(artifact)?;
    }
    info!("Rendered all report artifacts");
    Ok(())
}
