//! Provider operations

mod fetch;
mod interest;
mod related;
