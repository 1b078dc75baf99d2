//! Shared helpers: JSON lookup, parameter normalization, pagination types

pub mod constants;
pub mod json;
pub mod params;
pub mod types;
pub mod validation;
pub mod wire;

#[cfg(test)]
pub mod test_helpers;
