pub mod config;
pub mod ergast;
pub mod error;
pub mod handler;
pub mod model;
pub mod notion;
pub mod recorder;
pub mod sync;
