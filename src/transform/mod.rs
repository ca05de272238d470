pub mod classify;
pub mod error;
pub mod join;
pub mod time;
