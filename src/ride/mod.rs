//! Ride kinematics: the energy speed model, parallel-transport orientation
//! frame, camera pose, and the per-tick `step` state machine.

mod camera;
mod frame;
mod kinematics;
pub mod physics;

pub use camera::{target_pose, CameraPose, EYE_HEIGHT, LOOK_AHEAD, SMOOTHING};
pub use frame::{project_up, transport_up};
pub use kinematics::{step, RideConfig, RideMode, RideState};
