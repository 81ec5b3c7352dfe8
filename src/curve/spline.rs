use glam::Vec3;

/// Uniform Catmull-Rom tension. 0.5 gives the standard interpolating
/// spline that passes through every control point with C1 continuity.
const TENSION: f32 = 0.5;

/// Parameter offset used for numeric tangent differentiation.
const TANGENT_DELTA: f32 = 1e-4;

/// Sample count for arc-length approximation.
const ARC_SAMPLES: usize = 200;

/// Axis substituted when a tangent degenerates to zero length.
pub const FALLBACK_AXIS: Vec3 = Vec3::X;

/// Interpolating Catmull-Rom spline over 3D control points.
///
/// Parameter `t` in [0, 1] maps uniformly onto the segments between
/// consecutive control points: segment `i` occupies `[i/S, (i+1)/S]` where
/// `S` is the segment count (N for closed splines, N-1 for open ones).
/// Out-of-range parameters clamp when open and wrap when closed.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom3 {
    points: Vec<Vec3>,
    closed: bool,
}

impl CatmullRom3 {
    /// Requires at least two control points.
    pub fn new(points: Vec<Vec3>, closed: bool) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points, closed })
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    fn normalize_t(&self, t: f32) -> f32 {
        if !t.is_finite() {
            return 0.0;
        }
        if self.closed {
            t.rem_euclid(1.0)
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Position on the spline at parameter `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let segments = self.segment_count();
        let scaled = self.normalize_t(t) * segments as f32;

        let mut index = scaled.floor() as usize;
        let mut weight = scaled - index as f32;
        if index >= segments {
            // t == 1.0 on an open spline lands past the last segment.
            index = segments - 1;
            weight = 1.0;
        }

        let p1 = self.points[index % n];
        let p2 = self.points[(index + 1) % n];
        let p0 = if self.closed {
            self.points[(index + n - 1) % n]
        } else if index > 0 {
            self.points[index - 1]
        } else {
            // Mirror-extrapolate past the first point so the end tangent
            // follows the first segment.
            self.points[0] * 2.0 - self.points[1]
        };
        let p3 = if self.closed {
            self.points[(index + 2) % n]
        } else if index + 2 < n {
            self.points[index + 2]
        } else {
            self.points[n - 1] * 2.0 - self.points[n - 2]
        };

        hermite(p1, p2, (p2 - p0) * TENSION, (p3 - p1) * TENSION, weight)
    }

    /// Unit tangent at parameter `t`, via central differencing. Degenerate
    /// geometry (coincident points) falls back to [`FALLBACK_AXIS`] rather
    /// than producing NaN.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (lo, hi) = if self.closed {
            (t - TANGENT_DELTA, t + TANGENT_DELTA)
        } else {
            (
                (t - TANGENT_DELTA).max(0.0),
                (t + TANGENT_DELTA).min(1.0),
            )
        };
        (self.point_at(hi) - self.point_at(lo))
            .try_normalize()
            .unwrap_or(FALLBACK_AXIS)
    }

    /// Approximate arc length from sampled chord distances.
    pub fn length(&self) -> f32 {
        let mut total = 0.0;
        let mut prev = self.point_at(0.0);
        for i in 1..=ARC_SAMPLES {
            let next = self.point_at(i as f32 / ARC_SAMPLES as f32);
            total += prev.distance(next);
            prev = next;
        }
        total
    }
}

/// Cubic Hermite basis over one segment.
fn hermite(p1: Vec3, p2: Vec3, m1: Vec3, m2: Vec3, s: f32) -> Vec3 {
    let s2 = s * s;
    let s3 = s2 * s;
    p1 * (2.0 * s3 - 3.0 * s2 + 1.0)
        + m1 * (s3 - 2.0 * s2 + s)
        + p2 * (-2.0 * s3 + 3.0 * s2)
        + m2 * (s3 - s2)
}
