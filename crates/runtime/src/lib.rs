pub mod controller;
pub mod event_bus;
pub mod frame;
pub mod view;

pub use controller::*;
pub use event_bus::*;
pub use frame::*;
pub use view::*;
