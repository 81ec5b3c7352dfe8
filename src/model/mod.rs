//! Track model: ordered control points, loop annotations, and invariants.

mod point;
mod track;

pub use point::{LoopSegment, TrackPoint};
pub use track::{TrackModel, MIN_CLOSED_POINTS};
