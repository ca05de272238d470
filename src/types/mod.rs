pub mod artifact;
pub mod columns;
pub mod frames;
pub mod lat_lon;
pub mod month;
pub mod summary;
