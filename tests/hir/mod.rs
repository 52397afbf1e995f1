//! Resolution layer tests
//!
//! - Inheritance walking over chains, cycles and dangling parents
//! - Feature resolution on item, relation and enum owners
//! - Resolution cache behavior, cancellation and invalidation

pub mod tests_cache;
pub mod tests_feature_resolution;
pub mod tests_walker;
