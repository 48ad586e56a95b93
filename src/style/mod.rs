pub mod attributes;
pub mod color;
pub mod snapshot;
pub mod table;

pub use attributes::*;
pub use color::*;
pub use snapshot::*;
pub use table::*;
