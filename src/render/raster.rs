//! Static PNG charts drawn with plotters into an in-memory buffer.

use crate::render::error::RenderError;
use crate::render::palette::{contrasting_text, coolwarm, normalize};
use crate::types::artifact::{
    Artifact, ArtifactKind, CORRELATION_MATRIX, DISTRICT_EXCEEDANCES, EXCEEDANCES_PLOT,
    WEATHER_IMPACT,
};
use crate::types::summary::{
    CorrelationMatrix, DistrictExceedance, DistrictWeatherProfile, MonthlyExceedance,
};
use image::{ImageFormat, RgbImage};
use ordered_float::OrderedFloat;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::error::Error;
use std::io::Cursor;
use std::ops::Range;

const FONT: &str = "sans-serif";
const MISSING_CELL: RGBColor = RGBColor(230, 230, 230);

type DrawResult = Result<(), Box<dyn Error>>;

/// Draws into a white RGB canvas of `size` and encodes it as PNG.
fn render_png<F>(file_name: &'static str, size: (u32, u32), draw: F) -> Result<Artifact, RenderError>
where
    F: for<'b> FnOnce(&DrawingArea<BitMapBackend<'b>, Shift>) -> DrawResult,
{
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        let drawn: DrawResult = (|| {
            root.fill(&WHITE)?;
            draw(&root)?;
            root.present()?;
            Ok(())
        })();
        drawn.map_err(|e| RenderError::Draw {
            artifact: file_name.to_string(),
            message: e.to_string(),
        })?;
    }

    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| RenderError::Draw {
        artifact: file_name.to_string(),
        message: "pixel buffer does not match image size".to_string(),
    })?;
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| RenderError::Encode(file_name.to_string(), e))?;
    Ok(Artifact::new(file_name, ArtifactKind::Png, png.into_inner()))
}

/// Range covering every finite value with 10% padding; `0..1` when there is none.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let finite: Vec<OrderedFloat<f64>> = values
        .filter(|v| v.is_finite())
        .map(OrderedFloat)
        .collect();
    let (min, max) = match (finite.iter().min(), finite.iter().max()) {
        (Some(min), Some(max)) => (min.0, max.0),
        _ => return 0.0..1.0,
    };
    let pad = if max > min { (max - min) * 0.1 } else { 0.5 };
    (min - pad)..(max + pad)
}

/// Line chart of exceedance counts per month.
pub fn exceedances_plot(monthly: &[MonthlyExceedance]) -> Result<Artifact, RenderError> {
    render_png(EXCEEDANCES_PLOT, (1200, 600), |root| {
        let labels: Vec<String> = monthly.iter().map(|m| m.month.to_string()).collect();
        let top = monthly
            .iter()
            .map(|m| m.exceedances)
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption("Pollution exceedances per month", (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-1i32..monthly.len() as i32, 0f64..top * 1.1)?;

        chart
            .configure_mesh()
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|x| {
                usize::try_from(*x)
                    .ok()
                    .and_then(|i| labels.get(i).cloned())
                    .unwrap_or_default()
            })
            .light_line_style(&WHITE)
            .bold_line_style(&RGBColor(220, 220, 220))
            .x_desc("Month")
            .y_desc("Exceedances")
            .axis_desc_style((FONT, 16))
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                monthly
                    .iter()
                    .enumerate()
                    .map(|(i, m)| (i as i32, m.exceedances as f64)),
                BLUE.stroke_width(2),
            ))?
            .label("Exceedances")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        Ok(())
    })
}

/// Annotated heat map of the correlation matrix on a cool-warm scale from -1 to 1.
pub fn correlation_heatmap(matrix: &CorrelationMatrix) -> Result<Artifact, RenderError> {
    render_png(CORRELATION_MATRIX, (800, 600), |root| {
        let area = root.titled("Correlation of weather factors and pollution", (FONT, 22))?;
        let (width, height) = area.dim_in_pixel();
        let n = matrix.size().max(1) as i32;

        let (left, bottom, right) = (130, 120, 90);
        let cell = ((width as i32 - left - right) / n)
            .min((height as i32 - bottom - 10) / n)
            .max(1);
        let grid_right = left + cell * n;
        let grid_bottom = 10 + cell * n;

        for (i, row) in matrix.values.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let x0 = left + j as i32 * cell;
                let y0 = 10 + i as i32 * cell;
                let fill = if value.is_finite() {
                    coolwarm((value + 1.0) / 2.0)
                } else {
                    MISSING_CELL
                };
                area.draw(&Rectangle::new([(x0, y0), (x0 + cell, y0 + cell)], fill.filled()))?;
                area.draw(&Text::new(
                    format!("{:.2}", value),
                    (x0 + cell / 2, y0 + cell / 2),
                    (FONT, 14)
                        .into_font()
                        .color(&contrasting_text(fill))
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                ))?;
            }
        }

        let label_style = (FONT, 13).into_font().color(&BLACK);
        for (i, label) in matrix.labels.iter().enumerate() {
            let centre = i as i32 * cell + cell / 2;
            area.draw(&Text::new(
                label.clone(),
                (left - 8, 10 + centre),
                label_style.pos(Pos::new(HPos::Right, VPos::Center)),
            ))?;
            area.draw(&Text::new(
                label.clone(),
                (left + centre, grid_bottom + 8),
                (FONT, 13)
                    .into_font()
                    .transform(FontTransform::Rotate90)
                    .color(&BLACK),
            ))?;
        }

        // colour bar, +1 at the top
        let bar_left = grid_right + 20;
        let steps = 100;
        for step in 0..steps {
            let t = 1.0 - step as f64 / (steps - 1) as f64;
            let y0 = 10 + step * (grid_bottom - 10) / steps;
            let y1 = 10 + (step + 1) * (grid_bottom - 10) / steps;
            area.draw(&Rectangle::new(
                [(bar_left, y0), (bar_left + 18, y1)],
                coolwarm(t).filled(),
            ))?;
        }
        for (text, y) in [("1.00", 10), ("0.00", (10 + grid_bottom) / 2), ("-1.00", grid_bottom)] {
            area.draw(&Text::new(
                text,
                (bar_left + 24, y),
                label_style.pos(Pos::new(HPos::Left, VPos::Center)),
            ))?;
        }
        Ok(())
    })
}

/// Bar chart of exceedances per district, one viridis colour per bar.
pub fn district_exceedances_chart(districts: &[DistrictExceedance]) -> Result<Artifact, RenderError> {
    render_png(DISTRICT_EXCEEDANCES, (1500, 700), |root| {
        let slots = districts.len().max(1) as i32;
        let top = districts
            .iter()
            .map(|d| d.exceedances)
            .max()
            .unwrap_or(0)
            .max(1);

        let mut chart = ChartBuilder::on(root)
            .caption("Pollution exceedances by district", (FONT, 24))
            .margin(20)
            .x_label_area_size(180)
            .y_label_area_size(60)
            .build_cartesian_2d((0i32..slots).into_segmented(), 0i64..top + top / 10 + 1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(districts.len().max(1))
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
                    .ok()
                    .and_then(|i| districts.get(i))
                    .map(|d| d.district.clone())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .x_label_style((FONT, 13).into_font().transform(FontTransform::Rotate90))
            .x_desc("District")
            .y_desc("Exceedances")
            .axis_desc_style((FONT, 16))
            .draw()?;

        let last = (districts.len().max(2) - 1) as f64;
        chart.draw_series(
            Histogram::vertical(&chart)
                .margin(3)
                .style_func(move |value, _| {
                    let index = match value {
                        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i as f64,
                        SegmentValue::Last => last,
                    };
                    ViridisRGB::get_color(index / last).filled()
                })
                .data(
                    districts
                        .iter()
                        .enumerate()
                        .map(|(i, d)| (i as i32, d.exceedances)),
                ),
        )?;
        Ok(())
    })
}

/// Scatter of mean wind speed against mean exceedance rate per district.
///
/// Marker radius grows with mean precipitation, colour follows mean temperature.
pub fn weather_impact_chart(profiles: &[DistrictWeatherProfile]) -> Result<Artifact, RenderError> {
    render_png(WEATHER_IMPACT, (1200, 600), |root| {
        let x_range = padded_range(profiles.iter().map(|p| p.mean_wind_speed));
        let y_range = padded_range(profiles.iter().map(|p| p.mean_exceedance));
        let precipitation = padded_range(profiles.iter().map(|p| p.mean_precipitation));
        let temperature = padded_range(profiles.iter().map(|p| p.mean_temperature));

        let mut chart = ChartBuilder::on(root)
            .caption("Weather impact on pollution by district", (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Mean wind speed, m/s")
            .y_desc("Mean pollution level")
            .axis_desc_style((FONT, 16))
            .draw()?;

        chart.draw_series(profiles.iter().map(|p| {
            let size = normalize(p.mean_precipitation, precipitation.start, precipitation.end);
            let radius = 4 + (size * 16.0).round() as i32;
            let colour = coolwarm(normalize(
                p.mean_temperature,
                temperature.start,
                temperature.end,
            ));
            Circle::new(
                (p.mean_wind_speed, p.mean_exceedance),
                radius,
                colour.mix(0.85).filled(),
            )
        }))?;

        root.draw(&Text::new(
            "size: mean precipitation, colour: mean temperature (blue cold, red warm)",
            (90, 580),
            (FONT, 13).into_font().color(&BLACK),
        ))?;
        Ok(())
    })
}
