use crate::model::TrackModel;

use super::builder::TrackCurve;

/// Memoized curve keyed on the model's content revision.
///
/// The model is mutated in place, so reference identity says nothing about
/// staleness; the revision counter does. The curve is rebuilt at most once
/// per revision and reused by every query in between.
#[derive(Debug, Default)]
pub struct CurveCache {
    built_for: Option<u64>,
    curve: Option<TrackCurve>,
}

impl CurveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the curve for the model's current revision, rebuilding if
    /// the model changed since the last call. `None` when the model has
    /// fewer than two points.
    pub fn curve(&mut self, model: &TrackModel) -> Option<&TrackCurve> {
        if self.built_for != Some(model.revision()) {
            self.curve = TrackCurve::build(model);
            self.built_for = Some(model.revision());
        }
        self.curve.as_ref()
    }

    /// Drops the cached curve; the next query rebuilds.
    pub fn invalidate(&mut self) {
        self.built_for = None;
        self.curve = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn rebuilds_only_when_revision_changes() {
        let mut model = TrackModel::new();
        model.add_point(Vec3::ZERO);
        model.add_point(Vec3::new(10.0, 0.0, 0.0));

        let mut cache = CurveCache::new();
        let first = cache.curve(&model).cloned().unwrap();
        let second = cache.curve(&model).cloned().unwrap();
        assert_eq!(first, second);

        model.update_point_position("point-2", Vec3::new(10.0, 8.0, 0.0));
        let third = cache.curve(&model).cloned().unwrap();
        assert_ne!(first.point_at(1.0), third.point_at(1.0));
    }

    #[test]
    fn empty_model_yields_none_without_stale_curve() {
        let mut model = TrackModel::new();
        model.add_point(Vec3::ZERO);
        model.add_point(Vec3::X);

        let mut cache = CurveCache::new();
        assert!(cache.curve(&model).is_some());

        model.clear();
        assert!(cache.curve(&model).is_none());
    }
}
