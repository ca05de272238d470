pub mod error;
pub mod inspection_loader;
pub mod weather_loader;
