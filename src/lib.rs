//! Coasterkit - roller-coaster track geometry and ride-camera kinematics.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **model**: Track points, loop annotations, and model invariants
//! - **curve**: Spline construction, loop offset compensation, curve queries
//! - **ride**: Energy speed model, parallel-transport frame, camera pose
//! - **edit**: Editing operations and the composed session state
//! - **persistence**: Wire records, import validation, store interface
//!
//! # Usage
//!
//! ```
//! use coasterkit::{EditorState, RideMode};
//! use glam::Vec3;
//!
//! let mut editor = EditorState::new();
//! editor.add_point(Vec3::new(0.0, 3.0, 0.0));
//! editor.add_point(Vec3::new(20.0, 12.0, 0.0));
//! editor.add_point(Vec3::new(40.0, 3.0, 0.0));
//!
//! editor.start_ride();
//! editor.step(1.0 / 60.0);
//! assert_eq!(editor.ride.mode, RideMode::Ride);
//! assert!(editor.ride.progress > 0.0);
//! ```

pub mod curve;
pub mod edit;
pub mod model;
pub mod persistence;
pub mod ride;

// Re-export commonly used types at crate root
pub use curve::{CurveCache, LoopFrame, TrackCurve};
pub use edit::EditorState;
pub use model::{LoopSegment, TrackModel, TrackPoint};
pub use persistence::{CoasterRecord, CoasterStore, MemoryStore, NewCoaster};
pub use ride::{CameraPose, RideConfig, RideMode, RideState};
