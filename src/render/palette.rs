use plotters::style::RGBColor;

const COOLWARM: [(u8, u8, u8); 5] = [
    (59, 76, 192),
    (144, 178, 254),
    (221, 220, 220),
    (245, 156, 125),
    (180, 4, 38),
];

fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let scaled = t * (stops.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - lower as f64;
    let (a, b) = (stops[lower], stops[lower + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Diverging cool-warm colour at `t` in `[0, 1]`; 0.5 is neutral grey.
pub fn coolwarm(t: f64) -> RGBColor {
    interpolate(&COOLWARM, t)
}

/// Position of `value` within `[min, max]`, 0.5 when the range is empty.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: RGBColor) -> RGBColor {
    let luminance =
        0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    if luminance > 150.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
