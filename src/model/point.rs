use glam::Vec3;

/// A user-placed control vertex defining the rail path.
///
/// Points are kept in an ordered sequence; the order defines traversal
/// order along the track. Ids are minted from a monotonic counter and
/// never reused within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub id: String,
    pub position: Vec3,
    /// Signed banking angle in degrees, interpolated along the curve.
    pub tilt: f32,
    /// Derived: true iff a [`LoopSegment`] names this point as entry.
    pub has_loop: bool,
}

impl TrackPoint {
    pub fn new(id: String, position: Vec3) -> Self {
        Self {
            id,
            position,
            tilt: 0.0,
            has_loop: false,
        }
    }
}

/// Annotation describing a full vertical rotation starting at a track point.
///
/// The loop is a corkscrew helix: one full 360-degree turn around the local
/// tangent at `radius`, advancing `pitch` units forward over the turn.
/// `pitch` must be positive or the rail would self-intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSegment {
    pub id: String,
    /// Non-owning reference to the entry track point.
    pub entry_point_id: String,
    pub radius: f32,
    /// Forward distance traveled over one full rotation.
    pub pitch: f32,
}

impl LoopSegment {
    pub const DEFAULT_RADIUS: f32 = 5.0;
    pub const DEFAULT_PITCH: f32 = 12.0;

    pub fn new(id: String, entry_point_id: String) -> Self {
        Self {
            id,
            entry_point_id,
            radius: Self::DEFAULT_RADIUS,
            pitch: Self::DEFAULT_PITCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_point_has_no_tilt_or_loop() {
        let point = TrackPoint::new("point-1".to_string(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(point.tilt, 0.0);
        assert!(!point.has_loop);
    }

    #[test]
    fn new_loop_uses_defaults() {
        let seg = LoopSegment::new("loop-1".to_string(), "point-1".to_string());
        assert_eq!(seg.radius, 5.0);
        assert_eq!(seg.pitch, 12.0);
    }
}
