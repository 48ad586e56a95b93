pub mod markdown;
pub mod patterns;
pub mod ignore;
pub mod detector;

pub use markdown::*;
pub use patterns::*;
pub use ignore::*;
pub use detector::*;
