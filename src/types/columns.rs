//! Canonical column names shared by every frame in the pipeline, and the
//! positional schema of the weather observation file.

// Inspection frame
pub const COL_RAW_DATE: &str = "raw_date";
pub const COL_DATE: &str = "date";
pub const COL_RESULT: &str = "result";
pub const COL_DISTRICT: &str = "district";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_EXCEEDANCE: &str = "exceedance";

// Join key, present on both sides
pub const COL_UTC_DAY: &str = "utc_day";

// Weather frame
pub const COL_STATION: &str = "station";
pub const COL_UTC_YEAR: &str = "utc_year";
pub const COL_UTC_MONTH: &str = "utc_month";
pub const COL_UTC_DAY_OF_MONTH: &str = "utc_day_of_month";
pub const COL_UTC_HOUR: &str = "utc_hour";
pub const COL_LOCAL_YEAR: &str = "local_year";
pub const COL_LOCAL_MONTH: &str = "local_month";
pub const COL_LOCAL_DAY_OF_MONTH: &str = "local_day_of_month";
pub const COL_LOCAL_HOUR: &str = "local_hour";
pub const COL_LOCAL_TIME: &str = "local_time";
pub const COL_UTC_OFFSET: &str = "utc_offset";
pub const COL_VISIBILITY: &str = "visibility";
pub const COL_CLOUD_COVER: &str = "cloud_cover";
pub const COL_WEATHER_CODE: &str = "weather_code";
pub const COL_WIND_DIRECTION: &str = "wind_direction";
pub const COL_WIND_SPEED: &str = "wind_speed"; // m/s
pub const COL_PRECIPITATION: &str = "precipitation"; // mm
pub const COL_TEMPERATURE: &str = "temperature"; // degrees C
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_PRESSURE: &str = "pressure";

// Aggregates
pub const COL_YEAR: &str = "year";
pub const COL_MONTH: &str = "month";
pub const COL_EXCEEDANCES: &str = "exceedances";
pub const COL_MEAN_EXCEEDANCE: &str = "mean_exceedance";
pub const COL_MEAN_WIND_SPEED: &str = "mean_wind_speed";
pub const COL_MEAN_PRECIPITATION: &str = "mean_precipitation";
pub const COL_MEAN_TEMPERATURE: &str = "mean_temperature";

/// How a positional weather field is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
}

/// Positional layout of one data line of the weather file.
pub const WEATHER_SCHEMA: [(&str, FieldKind); 20] = [
    (COL_STATION, FieldKind::Text),
    (COL_UTC_YEAR, FieldKind::Integer),
    (COL_UTC_MONTH, FieldKind::Integer),
    (COL_UTC_DAY_OF_MONTH, FieldKind::Integer),
    (COL_UTC_HOUR, FieldKind::Integer),
    (COL_LOCAL_YEAR, FieldKind::Integer),
    (COL_LOCAL_MONTH, FieldKind::Integer),
    (COL_LOCAL_DAY_OF_MONTH, FieldKind::Integer),
    (COL_LOCAL_HOUR, FieldKind::Integer),
    (COL_LOCAL_TIME, FieldKind::Text),
    (COL_UTC_OFFSET, FieldKind::Decimal),
    (COL_VISIBILITY, FieldKind::Decimal),
    (COL_CLOUD_COVER, FieldKind::Decimal),
    (COL_WEATHER_CODE, FieldKind::Text),
    (COL_WIND_DIRECTION, FieldKind::Decimal),
    (COL_WIND_SPEED, FieldKind::Decimal),
    (COL_PRECIPITATION, FieldKind::Decimal),
    (COL_TEMPERATURE, FieldKind::Decimal),
    (COL_HUMIDITY, FieldKind::Decimal),
    (COL_PRESSURE, FieldKind::Decimal),
];

/// Numeric columns of the joined table, in the order used by the correlation matrix.
pub const CORRELATION_COLUMNS: [&str; 6] = [
    COL_EXCEEDANCE,
    COL_LONGITUDE,
    COL_LATITUDE,
    COL_WIND_SPEED,
    COL_PRECIPITATION,
    COL_TEMPERATURE,
];
