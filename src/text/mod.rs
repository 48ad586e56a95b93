pub mod range;
pub mod types;

pub use range::*;
pub use types::*;
