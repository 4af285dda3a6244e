//! Result models

mod country;
mod related;
mod trends;

pub use country::*;
pub use related::*;
pub use trends::*;
