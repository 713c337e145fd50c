pub mod geo;
pub mod orthographic;
pub mod vec;

pub use geo::*;
pub use orthographic::*;
pub use vec::*;
