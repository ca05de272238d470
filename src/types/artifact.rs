use std::fmt;

pub const EXCEEDANCES_PLOT: &str = "exceedances_plot.png";
pub const CORRELATION_MATRIX: &str = "correlation_matrix.png";
pub const DISTRICT_EXCEEDANCES: &str = "district_exceedances.png";
pub const WEATHER_IMPACT: &str = "weather_impact.png";
pub const POLLUTION_MAP: &str = "pollution_map.html";
pub const POLLUTION_DASHBOARD: &str = "pollution_dashboard.html";

/// Every artifact a pipeline run produces, in rendering order.
pub const ARTIFACT_NAMES: [&str; 6] = [
    EXCEEDANCES_PLOT,
    CORRELATION_MATRIX,
    DISTRICT_EXCEEDANCES,
    WEATHER_IMPACT,
    POLLUTION_MAP,
    POLLUTION_DASHBOARD,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Png,
    Html,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Png => write!(f, "png"),
            ArtifactKind::Html => write!(f, "html"),
        }
    }
}

/// A rendered output file, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: &'static str, kind: ArtifactKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            kind,
            bytes,
        }
    }
}
