/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use pollution_weather::LatLon;
///
/// let moscow_center = LatLon(55.75, 37.61);
/// assert_eq!(moscow_center.0, 55.75); // Latitude
/// assert_eq!(moscow_center.1, 37.61); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }
    pub fn longitude(self) -> f64 {
        self.1
    }
}
