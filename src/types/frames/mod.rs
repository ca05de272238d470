pub mod inspection_frame;
pub mod joined_frame;
pub mod weather_frame;
