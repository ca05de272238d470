use crate::render::error::RenderError;
use crate::types::artifact::{Artifact, ArtifactKind, POLLUTION_DASHBOARD};
use crate::types::summary::JoinedObservation;
use ordered_float::OrderedFloat;
use plotly::common::{Marker, Mode, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};
use std::collections::BTreeMap;

const TITLE: &str = "Interactive pollution analysis";
const MIN_MARKER_SIZE: f64 = 6.0;
const MARKER_SIZE_SPAN: f64 = 14.0;

/// Points of one district, which becomes one coloured trace.
#[derive(Debug, Default, PartialEq)]
struct DistrictSeries {
    district: String,
    days: Vec<String>,
    flags: Vec<u8>,
    sizes: Vec<usize>,
    hover: Vec<String>,
}

fn marker_size(wind_speed: f64, max_wind_speed: f64) -> usize {
    if max_wind_speed > 0.0 && wind_speed.is_finite() {
        let share = (wind_speed / max_wind_speed).clamp(0.0, 1.0);
        (MIN_MARKER_SIZE + MARKER_SIZE_SPAN * share).round() as usize
    } else {
        MIN_MARKER_SIZE as usize
    }
}

fn district_series(observations: &[JoinedObservation]) -> Vec<DistrictSeries> {
    let max_wind_speed = observations
        .iter()
        .map(|o| OrderedFloat(o.wind_speed))
        .max()
        .map_or(0.0, |w| w.0);

    let mut by_district: BTreeMap<&str, DistrictSeries> = BTreeMap::new();
    for observation in observations {
        let series = by_district
            .entry(observation.district.as_str())
            .or_insert_with(|| DistrictSeries {
                district: observation.district.clone(),
                ..Default::default()
            });
        series.days.push(observation.utc_day.format("%Y-%m-%d").to_string());
        series.flags.push(u8::from(observation.exceedance));
        series
            .sizes
            .push(marker_size(observation.wind_speed, max_wind_speed));
        series.hover.push(format!(
            "Temperature: {:.1}<br>Precipitation: {:.1}<br>Wind speed: {:.1}",
            observation.temperature, observation.precipitation, observation.wind_speed
        ));
    }
    by_district.into_values().collect()
}

/// Scatter of the exceedance flag over UTC days, one trace per district.
pub fn pollution_dashboard(observations: &[JoinedObservation]) -> Result<Artifact, RenderError> {
    let mut plot = Plot::new();
    for series in district_series(observations) {
        let trace = Scatter::new(series.days, series.flags)
            .mode(Mode::Markers)
            .name(&series.district)
            .text_array(series.hover)
            .marker(Marker::new().size_array(series.sizes));
        plot.add_trace(trace);
    }
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(TITLE))
            .x_axis(Axis::new().title(Title::with_text("UTC day")))
            .y_axis(Axis::new().title(Title::with_text("Pollution level"))),
    );

    Ok(Artifact::new(
        POLLUTION_DASHBOARD,
        ArtifactKind::Html,
        plot.to_html().into_bytes(),
    ))
}
