pub mod feature;
pub mod load_state;
pub mod world;

pub use feature::*;
pub use load_state::*;
pub use world::*;
