pub mod attributed;

pub use attributed::*;
