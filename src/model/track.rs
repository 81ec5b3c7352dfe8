use glam::Vec3;

use super::point::{LoopSegment, TrackPoint};

const POINT_ID_PREFIX: &str = "point-";
const LOOP_ID_PREFIX: &str = "loop-";

/// Minimum points required before a track may close into a ring.
pub const MIN_CLOSED_POINTS: usize = 3;

/// Ordered track points plus loop annotations and the closed-ring flag.
///
/// All mutation goes through the methods here, which preserve the model
/// invariants (at most one loop per entry point, closing requires at least
/// three points) and bump a content revision used to key curve rebuilds.
/// Operations on a missing or already-satisfied target are silent no-ops.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackModel {
    points: Vec<TrackPoint>,
    loops: Vec<LoopSegment>,
    is_looped: bool,
    next_point_id: u64,
    next_loop_id: u64,
    revision: u64,
}

impl TrackModel {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            loops: Vec::new(),
            is_looped: false,
            next_point_id: 0,
            next_loop_id: 0,
            revision: 0,
        }
    }

    /// Rebuilds a model from deserialized parts, repairing invariants:
    /// loop segments whose entry point no longer exists are dropped,
    /// `has_loop` flags are recomputed, and the id counters are restored
    /// from the largest numeric id suffix so fresh ids are never reused.
    pub fn from_parts(
        mut points: Vec<TrackPoint>,
        loops: Vec<LoopSegment>,
        is_looped: bool,
    ) -> Self {
        let mut kept = Vec::with_capacity(loops.len());
        for seg in loops {
            let exists = points.iter().any(|p| p.id == seg.entry_point_id);
            let duplicate = kept
                .iter()
                .any(|k: &LoopSegment| k.entry_point_id == seg.entry_point_id);
            if exists && !duplicate {
                kept.push(seg);
            } else {
                log::warn!(
                    "dropping loop segment {} with dangling or duplicate entry point {}",
                    seg.id,
                    seg.entry_point_id
                );
            }
        }

        for point in &mut points {
            point.has_loop = kept.iter().any(|seg| seg.entry_point_id == point.id);
        }

        let next_point_id = max_id_suffix(points.iter().map(|p| p.id.as_str()), POINT_ID_PREFIX);
        let next_loop_id = max_id_suffix(kept.iter().map(|s| s.id.as_str()), LOOP_ID_PREFIX);
        let is_looped = is_looped && points.len() >= MIN_CLOSED_POINTS;

        Self {
            points,
            loops: kept,
            is_looped,
            next_point_id,
            next_loop_id,
            revision: 0,
        }
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn loops(&self) -> &[LoopSegment] {
        &self.loops
    }

    pub fn is_looped(&self) -> bool {
        self.is_looped
    }

    pub fn point(&self, id: &str) -> Option<&TrackPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Content revision, bumped by every observable mutation. Curve caching
    /// keys on this rather than on reference identity.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends a new point with a freshly minted id and zero tilt.
    /// Returns the new point's id.
    pub fn add_point(&mut self, position: Vec3) -> String {
        self.next_point_id += 1;
        let id = format!("{POINT_ID_PREFIX}{}", self.next_point_id);
        self.points.push(TrackPoint::new(id.clone(), position));
        self.revision += 1;
        id
    }

    pub fn update_point_position(&mut self, id: &str, position: Vec3) {
        if let Some(point) = self.points.iter_mut().find(|p| p.id == id) {
            point.position = position;
            self.revision += 1;
        }
    }

    pub fn update_point_tilt(&mut self, id: &str, tilt: f32) {
        if let Some(point) = self.points.iter_mut().find(|p| p.id == id) {
            point.tilt = tilt;
            self.revision += 1;
        }
    }

    /// Removes a point by id. An associated loop segment is intentionally
    /// left in place; dangling segments are ignored by the curve builder
    /// and dropped on the next deserialization repair.
    pub fn remove_point(&mut self, id: &str) {
        let before = self.points.len();
        self.points.retain(|p| p.id != id);
        if self.points.len() != before {
            if self.points.len() < MIN_CLOSED_POINTS {
                self.is_looped = false;
            }
            self.revision += 1;
        }
    }

    /// Creates a loop segment starting at the given point with default
    /// radius and pitch. No-op if the id is unknown or the point already
    /// has a loop.
    pub fn create_loop_at(&mut self, id: &str) {
        let Some(point) = self.points.iter_mut().find(|p| p.id == id) else {
            return;
        };
        if point.has_loop {
            return;
        }
        point.has_loop = true;
        self.next_loop_id += 1;
        let loop_id = format!("{LOOP_ID_PREFIX}{}", self.next_loop_id);
        self.loops
            .push(LoopSegment::new(loop_id, id.to_string()));
        self.revision += 1;
    }

    /// Closes or opens the ring. Closing with fewer than three points is
    /// a no-op.
    pub fn set_looped(&mut self, looped: bool) {
        if looped && self.points.len() < MIN_CLOSED_POINTS {
            return;
        }
        if self.is_looped != looped {
            self.is_looped = looped;
            self.revision += 1;
        }
    }

    /// Removes all points and loop segments in one transition. Id counters
    /// are kept so ids are never reused within a session.
    pub fn clear(&mut self) {
        self.points.clear();
        self.loops.clear();
        self.is_looped = false;
        self.revision += 1;
    }
}

impl Default for TrackModel {
    fn default() -> Self {
        Self::new()
    }
}

fn max_id_suffix<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_points(n: usize) -> TrackModel {
        let mut model = TrackModel::new();
        for i in 0..n {
            model.add_point(Vec3::new(i as f32 * 10.0, 0.0, 0.0));
        }
        model
    }

    #[test]
    fn add_point_mints_sequential_ids() {
        let mut model = TrackModel::new();
        let a = model.add_point(Vec3::ZERO);
        let b = model.add_point(Vec3::X);
        assert_eq!(a, "point-1");
        assert_eq!(b, "point-2");
        assert_eq!(model.points().len(), 2);
    }

    #[test]
    fn update_missing_point_is_noop() {
        let mut model = model_with_points(2);
        let revision = model.revision();
        model.update_point_position("point-99", Vec3::ONE);
        model.update_point_tilt("point-99", 45.0);
        assert_eq!(model.revision(), revision);
    }

    #[test]
    fn remove_point_keeps_loop_segment() {
        let mut model = model_with_points(3);
        model.create_loop_at("point-2");
        model.remove_point("point-2");
        assert_eq!(model.points().len(), 2);
        assert_eq!(model.loops().len(), 1);
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut model = model_with_points(3);
        model.remove_point("point-3");
        let id = model.add_point(Vec3::ZERO);
        assert_eq!(id, "point-4");
    }

    #[test]
    fn create_loop_at_is_idempotent() {
        let mut model = model_with_points(3);
        model.create_loop_at("point-2");
        model.create_loop_at("point-2");
        assert_eq!(model.loops().len(), 1);
        assert!(model.point("point-2").unwrap().has_loop);
        let looped = model.points().iter().filter(|p| p.has_loop).count();
        assert_eq!(looped, 1);
    }

    #[test]
    fn create_loop_at_unknown_point_is_noop() {
        let mut model = model_with_points(2);
        model.create_loop_at("point-9");
        assert!(model.loops().is_empty());
    }

    #[test]
    fn closing_requires_three_points() {
        let mut model = model_with_points(2);
        model.set_looped(true);
        assert!(!model.is_looped());

        model.add_point(Vec3::new(20.0, 0.0, 0.0));
        model.set_looped(true);
        assert!(model.is_looped());
    }

    #[test]
    fn removing_below_three_points_opens_the_ring() {
        let mut model = model_with_points(3);
        model.set_looped(true);
        model.remove_point("point-1");
        assert!(!model.is_looped());
    }

    #[test]
    fn clear_resets_points_and_loops_together() {
        let mut model = model_with_points(3);
        model.create_loop_at("point-1");
        model.clear();
        assert!(model.points().is_empty());
        assert!(model.loops().is_empty());
        assert!(!model.is_looped());
    }

    #[test]
    fn mutations_bump_revision() {
        let mut model = TrackModel::new();
        let r0 = model.revision();
        let id = model.add_point(Vec3::ZERO);
        let r1 = model.revision();
        model.update_point_tilt(&id, 10.0);
        let r2 = model.revision();
        assert!(r1 > r0);
        assert!(r2 > r1);
    }

    #[test]
    fn from_parts_drops_dangling_loops() {
        let points = vec![
            TrackPoint::new("point-1".to_string(), Vec3::ZERO),
            TrackPoint::new("point-2".to_string(), Vec3::X),
        ];
        let loops = vec![
            LoopSegment::new("loop-1".to_string(), "point-1".to_string()),
            LoopSegment::new("loop-2".to_string(), "point-77".to_string()),
        ];
        let model = TrackModel::from_parts(points, loops, false);
        assert_eq!(model.loops().len(), 1);
        assert!(model.point("point-1").unwrap().has_loop);
        assert!(!model.point("point-2").unwrap().has_loop);
    }

    #[test]
    fn from_parts_restores_id_counters() {
        let points = vec![
            TrackPoint::new("point-4".to_string(), Vec3::ZERO),
            TrackPoint::new("point-7".to_string(), Vec3::X),
        ];
        let mut model = TrackModel::from_parts(points, Vec::new(), false);
        let id = model.add_point(Vec3::ONE);
        assert_eq!(id, "point-8");
    }

    #[test]
    fn from_parts_opens_undersized_rings() {
        let points = vec![
            TrackPoint::new("point-1".to_string(), Vec3::ZERO),
            TrackPoint::new("point-2".to_string(), Vec3::X),
        ];
        let model = TrackModel::from_parts(points, Vec::new(), true);
        assert!(!model.is_looped());
    }
}
