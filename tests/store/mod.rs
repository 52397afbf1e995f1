//! Declaration store tests
//!
//! Merge-on-redeclare behavior across files and declaration kinds.
