use glam::Vec3;

use crate::curve::TrackCurve;

use super::camera::{self, CameraPose, SMOOTHING};
use super::frame::transport_up;
use super::physics::{self, CHAIN_SPEED, EPSILON};

/// Top-level editor/ride mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RideMode {
    #[default]
    Build,
    Ride,
    Preview,
}

/// Per-ride configuration, owned by the editing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideConfig {
    pub speed_multiplier: f32,
    pub chain_lift: bool,
}

impl Default for RideConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            chain_lift: true,
        }
    }
}

/// Ephemeral ride-session state. Advanced exclusively through [`step`],
/// which is a pure function of the previous state, so the kinematics can
/// be driven from a render loop, a timer, or a test harness alike.
#[derive(Debug, Clone, PartialEq)]
pub struct RideState {
    pub mode: RideMode,
    pub is_riding: bool,
    /// Normalized position along the curve, 0..1.
    pub progress: f32,
    pub camera: CameraPose,
    max_height: f32,
    up: Vec3,
    first_peak: f32,
}

impl RideState {
    pub fn new() -> Self {
        Self {
            mode: RideMode::Build,
            is_riding: false,
            progress: 0.0,
            camera: CameraPose::DEFAULT,
            max_height: 0.0,
            up: Vec3::Y,
            first_peak: 0.0,
        }
    }

    /// Enters ride mode at the start of the curve: progress and the
    /// max-height tracker reset, the orientation frame returns to world up,
    /// and the camera snaps to its initial pose. The first-peak parameter
    /// is precomputed here, once per curve.
    pub fn start(curve: &TrackCurve) -> Self {
        let up = Vec3::Y;
        Self {
            mode: RideMode::Ride,
            is_riding: true,
            progress: 0.0,
            camera: camera::target_pose(curve, 0.0, up),
            max_height: curve.point_at(0.0).y,
            up,
            first_peak: physics::first_peak(curve),
        }
    }

    /// Leaves ride mode, back to building.
    pub fn stop(&self) -> Self {
        Self {
            mode: RideMode::Build,
            is_riding: false,
            progress: 0.0,
            ..self.clone()
        }
    }

    /// Running transported up vector.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Highest rail height reached so far this ride.
    pub fn max_height(&self) -> f32 {
        self.max_height
    }
}

impl Default for RideState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances the ride by `dt` seconds and returns the new state.
///
/// Speed is chain-haul before the first peak when the lift is enabled,
/// energy-conserving afterwards: a frictionless drop from the highest
/// point reached, floored so the car never stalls on a rise lower than a
/// prior summit. Overflow past the end wraps on closed tracks and stops
/// the ride on open ones. Non-finite or non-positive `dt` leaves the
/// state unchanged; a zero-length curve ends the ride immediately.
pub fn step(curve: &TrackCurve, state: &RideState, config: &RideConfig, dt: f32) -> RideState {
    if !state.is_riding || state.mode != RideMode::Ride {
        return state.clone();
    }
    if !dt.is_finite() || dt <= 0.0 {
        return state.clone();
    }

    let length = curve.length();
    if length <= EPSILON {
        return state.stop();
    }

    let height = curve.point_at(state.progress).y;
    let mut max_height = state.max_height.max(height);

    let speed = if config.chain_lift && state.progress < state.first_peak {
        CHAIN_SPEED * config.speed_multiplier
    } else {
        physics::energy_speed(max_height, height) * config.speed_multiplier
    };

    let mut progress = state.progress + speed * dt / length;
    if !progress.is_finite() {
        return state.stop();
    }
    if progress >= 1.0 {
        if curve.closed() {
            progress %= 1.0;
            if config.chain_lift {
                // The lift re-engages each lap.
                max_height = curve.point_at(0.0).y;
            }
        } else {
            return state.stop();
        }
    }

    let tangent = curve.tangent_at(progress);
    let up = transport_up(state.up, tangent);

    let target = camera::target_pose(curve, progress, up);
    let mut camera = state.camera;
    camera.smooth_toward(&target, SMOOTHING);

    RideState {
        mode: RideMode::Ride,
        is_riding: true,
        progress,
        camera,
        max_height,
        up,
        first_peak: state.first_peak,
    }
}
