use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec3;

use crate::model::{LoopSegment, TrackModel, TrackPoint};

use super::spline::{CatmullRom3, FALLBACK_AXIS};

/// Orientation frame and shape of one corkscrew loop, resolved against the
/// spline at build time. Renderers sample the helix from this; the ride
/// path itself follows the offset-compensated spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopFrame {
    /// Loop entry position on the adjusted curve.
    pub entry: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub radius: f32,
    pub pitch: f32,
}

impl LoopFrame {
    /// Point on the helix at angle `theta` in [0, 2pi]: one full turn
    /// around the tangent at `radius`, advancing `pitch` forward over the
    /// turn. `theta = 0` is the entry; `theta = 2pi` is the exit, `pitch`
    /// units ahead of the entry.
    pub fn sample(&self, theta: f32) -> Vec3 {
        self.entry
            + self.forward * (self.pitch * theta / TAU)
            + self.up * (self.radius * (1.0 - theta.cos()))
            + self.right * (self.radius * theta.sin())
    }
}

/// Continuous rail path derived from a [`TrackModel`].
///
/// Built in two passes: a base spline through the raw control positions
/// determines tangents at each loop entry, then every control point after a
/// looped point is displaced forward by that loop's pitch (the distance the
/// helix travels) before the final spline is constructed. On a closed ring
/// the accumulated displacement is cancelled by a counter-offset growing
/// linearly with ring progress, so the ring still closes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCurve {
    spline: CatmullRom3,
    tilts: Vec<f32>,
    loops: Vec<LoopFrame>,
    length: f32,
}

impl TrackCurve {
    /// Builds the curve for a model, or `None` with fewer than two points.
    /// A closed flag with fewer than three points is treated as open.
    pub fn build(model: &TrackModel) -> Option<Self> {
        Self::from_points(model.points(), model.loops(), model.is_looped())
    }

    pub fn from_points(
        points: &[TrackPoint],
        loops: &[LoopSegment],
        closed: bool,
    ) -> Option<Self> {
        let n = points.len();
        if n < 2 {
            return None;
        }
        let closed = closed && n >= 3;

        let raw: Vec<Vec3> = points.iter().map(|p| p.position).collect();
        let base = CatmullRom3::new(raw, closed)?;
        let segments = base.segment_count() as f32;

        let mut loop_by_entry: HashMap<&str, &LoopSegment> = HashMap::new();
        for seg in loops {
            loop_by_entry.entry(seg.entry_point_id.as_str()).or_insert(seg);
        }

        // Total forward displacement around a closed ring; cancelled
        // progressively below so the ring still meets itself.
        let mut total_offset = Vec3::ZERO;
        if closed {
            for (i, point) in points.iter().enumerate() {
                if let Some(seg) = loop_by_entry.get(point.id.as_str()).copied() {
                    let forward = base.tangent_at(i as f32 / segments);
                    total_offset += forward * seg.pitch;
                }
            }
        }

        let mut adjusted = Vec::with_capacity(n);
        let mut loop_frames = Vec::new();
        let mut running_offset = Vec3::ZERO;

        for (i, point) in points.iter().enumerate() {
            let t = i as f32 / segments;
            let compensation = if closed { -total_offset * t } else { Vec3::ZERO };
            let position = base.point_at(t) + running_offset + compensation;
            adjusted.push(position);

            if let Some(seg) = loop_by_entry.get(point.id.as_str()).copied() {
                let forward = base.tangent_at(t);
                loop_frames.push(loop_frame(position, forward, seg));
                running_offset += forward * seg.pitch;
            }
        }

        let spline = CatmullRom3::new(adjusted, closed)?;
        let length = spline.length();
        let tilts = points.iter().map(|p| p.tilt).collect();

        Some(Self {
            spline,
            tilts,
            loops: loop_frames,
            length,
        })
    }

    pub fn closed(&self) -> bool {
        self.spline.closed()
    }

    /// Position on the rail at normalized progress `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.spline.point_at(t)
    }

    /// Unit tangent at normalized progress `t`.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        self.spline.tangent_at(t)
    }

    /// Approximate arc length of the full curve.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Banking angle in degrees at progress `t`, linearly interpolated
    /// between the per-point tilt values over the same segment
    /// parametrization as the spline.
    pub fn tilt_at(&self, t: f32) -> f32 {
        let n = self.tilts.len();
        let segments = self.spline.segment_count();
        let t = if self.closed() {
            if t.is_finite() {
                t.rem_euclid(1.0)
            } else {
                0.0
            }
        } else {
            t.clamp(0.0, 1.0)
        };

        let scaled = t * segments as f32;
        let mut index = scaled.floor() as usize;
        let mut weight = scaled - index as f32;
        if index >= segments {
            index = segments - 1;
            weight = 1.0;
        }

        let a = self.tilts[index % n];
        let b = self.tilts[(index + 1) % n];
        a + (b - a) * weight
    }

    /// Control-point positions after loop offset compensation. Editors
    /// place point widgets here so they align with the rendered rail.
    pub fn adjusted_positions(&self) -> &[Vec3] {
        self.spline.control_points()
    }

    /// Resolved loop frames in traversal order.
    pub fn loop_frames(&self) -> &[LoopFrame] {
        &self.loops
    }
}

fn loop_frame(entry: Vec3, forward: Vec3, seg: &LoopSegment) -> LoopFrame {
    let up = (Vec3::Y - forward * Vec3::Y.dot(forward))
        .try_normalize()
        .unwrap_or(Vec3::Z);
    let right = forward.cross(up).try_normalize().unwrap_or(FALLBACK_AXIS);
    LoopFrame {
        entry,
        forward,
        up,
        right,
        radius: seg.radius,
        pitch: seg.pitch,
    }
}
