use crate::curve::TrackCurve;

pub const G: f32 = 9.8;
/// Floor speed so the car never stalls, in curve units per second.
pub const MIN_SPEED: f32 = 1.0;
/// Constant haul speed while the chain lift is engaged.
pub const CHAIN_SPEED: f32 = 0.9;
pub const EPSILON: f32 = 1e-6;

const PEAK_SCAN_END: f32 = 0.5;
const PEAK_SCAN_STEP: f32 = 0.01;
/// Vertical tangent component that counts as climbing (or descending).
const CLIMB_THRESHOLD: f32 = 0.1;
/// Used when the scan finds no summit in the first half of the track.
const FALLBACK_PEAK: f32 = 0.2;

/// Speed from a frictionless drop off the highest point reached so far,
/// floored at [`MIN_SPEED`]. The caller applies the ride speed multiplier.
pub fn energy_speed(max_height: f32, height: f32) -> f32 {
    let drop = (max_height - height).max(0.0);
    (2.0 * G * drop).sqrt().max(MIN_SPEED)
}

/// Progress of the first ascent summit, scanned over the first half of the
/// curve. The chain lift hauls at constant speed up to this parameter and
/// releases past it.
pub fn first_peak(curve: &TrackCurve) -> f32 {
    let mut max_height = f32::NEG_INFINITY;
    let mut peak_t = 0.0;
    let mut found_climb = false;

    let steps = (PEAK_SCAN_END / PEAK_SCAN_STEP) as usize;
    for i in 0..=steps {
        let t = i as f32 * PEAK_SCAN_STEP;
        let height = curve.point_at(t).y;
        let tangent = curve.tangent_at(t);

        if tangent.y > CLIMB_THRESHOLD {
            found_climb = true;
        }
        if found_climb && height > max_height {
            max_height = height;
            peak_t = t;
        }
        if found_climb && tangent.y < -CLIMB_THRESHOLD && t > peak_t {
            break;
        }
    }

    if peak_t > 0.0 {
        peak_t
    } else {
        FALLBACK_PEAK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackModel;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn energy_speed_floors_at_min_speed() {
        assert_relative_eq!(energy_speed(5.0, 5.0), MIN_SPEED);
        assert_relative_eq!(energy_speed(5.0, 10.0), MIN_SPEED);
    }

    #[test]
    fn energy_speed_matches_free_fall() {
        let speed = energy_speed(20.0, 0.0);
        assert_relative_eq!(speed, (2.0 * G * 20.0).sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn energy_speed_increases_monotonically_with_drop() {
        let mut previous = 0.0;
        for drop in 1..20 {
            let speed = energy_speed(drop as f32, 0.0);
            assert!(speed > previous);
            previous = speed;
        }
    }

    #[test]
    fn first_peak_finds_the_summit_of_a_hill() {
        let mut model = TrackModel::new();
        model.add_point(Vec3::new(0.0, 0.0, 0.0));
        model.add_point(Vec3::new(20.0, 15.0, 0.0));
        model.add_point(Vec3::new(40.0, 0.0, 0.0));
        let curve = TrackCurve::build(&model).unwrap();

        let peak = first_peak(&curve);
        let peak_height = curve.point_at(peak).y;
        // The summit is at the middle control point, half way along.
        assert_relative_eq!(peak, 0.5, epsilon = 0.03);
        assert!(peak_height > 14.0);
    }

    #[test]
    fn first_peak_falls_back_on_flat_tracks() {
        let mut model = TrackModel::new();
        model.add_point(Vec3::new(0.0, 3.0, 0.0));
        model.add_point(Vec3::new(40.0, 3.0, 0.0));
        let curve = TrackCurve::build(&model).unwrap();

        assert_relative_eq!(first_peak(&curve), 0.2);
    }
}
