pub mod arc;
pub mod compositor;
pub mod path;
pub mod scale;
pub mod symbology;

pub use arc::*;
pub use compositor::*;
pub use path::*;
pub use scale::*;
pub use symbology::*;
