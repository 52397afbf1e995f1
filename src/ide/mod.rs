//! Host layer: the explicit context object and front-end entry points.
//!
//! [`AnalysisHost`] replaces any process-wide singleton: the embedding
//! application constructs one per workspace, feeds it declarations and
//! passes [`Analysis`] snapshots to its query and import front ends.

mod analysis;
mod requests;

pub use analysis::{Analysis, AnalysisHost};
