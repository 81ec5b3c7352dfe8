//! Curve builder: interpolating splines, loop offset compensation, and
//! curve-derived queries (position, tangent, tilt, arc length).

mod builder;
mod cache;
mod spline;

pub use builder::{LoopFrame, TrackCurve};
pub use cache::CurveCache;
pub use spline::{CatmullRom3, FALLBACK_AXIS};
