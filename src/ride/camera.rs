use glam::Vec3;

use crate::curve::TrackCurve;

use super::frame::project_up;

/// Eye height above the rail, in world units.
pub const EYE_HEIGHT: f32 = 1.8;
/// Progress offset for the look-at target.
pub const LOOK_AHEAD: f32 = 0.05;
/// Exponential smoothing factor applied to the pose each tick.
pub const SMOOTHING: f32 = 0.2;

/// Rendered camera pose: position, look-at target, and roll about the
/// camera's forward axis (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub roll: f32,
}

impl CameraPose {
    pub const DEFAULT: Self = Self {
        position: Vec3::ZERO,
        look_at: Vec3::ZERO,
        roll: 0.0,
    };

    /// Moves this pose a fraction of the way toward `target`. Discrete
    /// stepping otherwise shows as jitter in the rendered view.
    pub fn smooth_toward(&mut self, target: &CameraPose, factor: f32) {
        self.position = self.position.lerp(target.position, factor);
        self.look_at = self.look_at.lerp(target.look_at, factor);
        self.roll += (target.roll - self.roll) * factor;
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Unsmoothed pose at `progress` given the transported up vector.
pub fn target_pose(curve: &TrackCurve, progress: f32, up: Vec3) -> CameraPose {
    let position = curve.point_at(progress) + up * EYE_HEIGHT;

    let look_t = if curve.closed() {
        (progress + LOOK_AHEAD).rem_euclid(1.0)
    } else {
        (progress + LOOK_AHEAD).min(0.999)
    };
    let look_tangent = curve.tangent_at(look_t);
    let look_up = project_up(up, look_tangent);
    let look_at = curve.point_at(look_t) + look_up * (EYE_HEIGHT * 0.5);

    let roll = curve.tilt_at(progress).to_radians();

    CameraPose {
        position,
        look_at,
        roll,
    }
}
