use glam::Vec3;

/// Minimum projected length before a direction counts as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-3;

/// Parallel transport of the running up vector onto the plane
/// perpendicular to the new tangent.
///
/// Carrying the previous up forward instead of re-deriving it from world
/// up is what keeps the camera roll-stable through a vertical loop: world
/// up would flip sides at the inversion, the transported vector rotates
/// smoothly with the rail.
///
/// Degenerate cases fall back deterministically: if the previous up is
/// nearly parallel to the tangent, world up is projected instead; if that
/// is also parallel, a fixed horizontal axis is used.
pub fn transport_up(previous_up: Vec3, tangent: Vec3) -> Vec3 {
    let projected = previous_up - tangent * previous_up.dot(tangent);
    if projected.length() > DEGENERATE_EPSILON {
        return projected.normalize();
    }

    let world = Vec3::Y - tangent * Vec3::Y.dot(tangent);
    if world.length() > DEGENERATE_EPSILON {
        world.normalize()
    } else {
        Vec3::X
    }
}

/// Projects `up` perpendicular to a look-ahead tangent, keeping `up`
/// unchanged when the projection degenerates.
pub fn project_up(up: Vec3, tangent: Vec3) -> Vec3 {
    let projected = up - tangent * up.dot(tangent);
    if projected.length() > DEGENERATE_EPSILON {
        projected.normalize()
    } else {
        up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transported_up_is_perpendicular_to_tangent() {
        let tangent = Vec3::new(1.0, 0.5, 0.0).normalize();
        let up = transport_up(Vec3::Y, tangent);
        assert_relative_eq!(up.dot(tangent), 0.0, epsilon = 1e-5);
        assert_relative_eq!(up.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn up_parallel_to_tangent_falls_back_to_world_up() {
        // Previous up straight along the tangent: projection degenerates.
        let up = transport_up(Vec3::X, Vec3::X);
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn vertical_tangent_falls_back_to_horizontal_axis() {
        let up = transport_up(Vec3::Y, Vec3::Y);
        assert_eq!(up, Vec3::X);
    }

    #[test]
    fn up_stays_continuous_through_an_inversion() {
        // Rotate the tangent through a full vertical circle in small steps,
        // as the camera sees through a loop.
        let mut up = Vec3::Y;
        let mut previous = up;
        let steps = 200;
        for i in 0..=steps {
            let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
            let tangent = Vec3::new(angle.cos(), angle.sin(), 0.0);
            up = transport_up(up, tangent);
            assert_relative_eq!(up.dot(tangent), 0.0, epsilon = 1e-4);
            // No sudden flips between ticks.
            assert!(up.dot(previous) > 0.9, "up flipped at step {i}");
            previous = up;
        }
    }
}
