pub mod config;
pub mod geojson;

pub use config::*;
pub use geojson::*;
