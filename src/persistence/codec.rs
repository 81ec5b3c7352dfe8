use glam::Vec3;

use crate::model::{LoopSegment, TrackModel, TrackPoint};

use super::record::{CoasterRecord, LoopSegmentRecord, NewCoaster, TrackPointRecord};

/// Everything recovered from a stored coaster: the repaired model plus the
/// flags persisted alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCoaster {
    pub name: String,
    pub model: TrackModel,
    pub has_chain_lift: bool,
    pub show_wood_supports: bool,
}

/// Serializes a model and its companion flags into a record ready for the
/// store. Lossless: decoding the result reproduces an equivalent model.
pub fn encode(
    model: &TrackModel,
    name: &str,
    has_chain_lift: bool,
    show_wood_supports: bool,
) -> NewCoaster {
    NewCoaster {
        name: name.to_string(),
        track_points: model.points().iter().map(point_record).collect(),
        loop_segments: model.loops().iter().map(segment_record).collect(),
        is_looped: model.is_looped(),
        has_chain_lift,
        show_wood_supports,
    }
}

/// Rebuilds a model from a stored record. Repair happens in
/// [`TrackModel::from_parts`]: dangling loop references are dropped,
/// `has_loop` flags recomputed, and id counters restored.
pub fn decode(record: &CoasterRecord) -> DecodedCoaster {
    let points = record.track_points.iter().map(track_point).collect();
    let loops = record.loop_segments.iter().map(loop_segment).collect();
    let model = TrackModel::from_parts(points, loops, record.is_looped);

    log::info!(
        "loaded coaster {:?}: {} points, {} loops",
        record.name,
        model.points().len(),
        model.loops().len()
    );

    DecodedCoaster {
        name: record.name.clone(),
        model,
        has_chain_lift: record.has_chain_lift,
        show_wood_supports: record.show_wood_supports,
    }
}

fn point_record(point: &TrackPoint) -> TrackPointRecord {
    TrackPointRecord {
        id: point.id.clone(),
        position: point.position.to_array(),
        tilt: point.tilt,
        has_loop: point.has_loop,
    }
}

fn track_point(record: &TrackPointRecord) -> TrackPoint {
    TrackPoint {
        id: record.id.clone(),
        position: Vec3::from_array(record.position),
        tilt: record.tilt,
        has_loop: record.has_loop,
    }
}

fn segment_record(seg: &LoopSegment) -> LoopSegmentRecord {
    LoopSegmentRecord {
        id: seg.id.clone(),
        entry_point_id: seg.entry_point_id.clone(),
        radius: seg.radius,
        pitch: seg.pitch,
    }
}

fn loop_segment(record: &LoopSegmentRecord) -> LoopSegment {
    LoopSegment {
        id: record.id.clone(),
        entry_point_id: record.entry_point_id.clone(),
        radius: record.radius,
        pitch: record.pitch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn as_record(coaster: NewCoaster) -> CoasterRecord {
        CoasterRecord {
            id: 1,
            name: coaster.name,
            track_points: coaster.track_points,
            loop_segments: coaster.loop_segments,
            is_looped: coaster.is_looped,
            has_chain_lift: coaster.has_chain_lift,
            show_wood_supports: coaster.show_wood_supports,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_model() -> TrackModel {
        let mut model = TrackModel::new();
        model.add_point(Vec3::new(0.0, 0.0, 0.0));
        model.add_point(Vec3::new(10.0, 5.0, 0.0));
        model.add_point(Vec3::new(20.0, 0.0, 4.0));
        model.update_point_tilt("point-2", 25.0);
        model.create_loop_at("point-2");
        model.set_looped(true);
        model
    }

    #[test]
    fn round_trip_reproduces_the_model() {
        let model = sample_model();
        let encoded = encode(&model, "Thunderhead", true, false);
        let decoded = decode(&as_record(encoded));

        assert_eq!(decoded.name, "Thunderhead");
        assert_eq!(decoded.model.points(), model.points());
        assert_eq!(decoded.model.loops(), model.loops());
        assert_eq!(decoded.model.is_looped(), model.is_looped());
    }

    #[test]
    fn round_trip_of_empty_model() {
        let model = TrackModel::new();
        let decoded = decode(&as_record(encode(&model, "Empty", false, false)));
        assert!(decoded.model.points().is_empty());
        assert!(decoded.model.loops().is_empty());
    }

    #[test]
    fn decode_preserves_point_order_and_positions() {
        let model = sample_model();
        let decoded = decode(&as_record(encode(&model, "t", true, true)));
        let ids: Vec<&str> = decoded.model.points().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["point-1", "point-2", "point-3"]);
        assert_eq!(
            decoded.model.point("point-2").unwrap().position,
            Vec3::new(10.0, 5.0, 0.0)
        );
        assert_eq!(decoded.model.point("point-2").unwrap().tilt, 25.0);
    }

    #[test]
    fn decode_repairs_dangling_loops() {
        let mut encoded = encode(&sample_model(), "t", true, false);
        encoded.loop_segments.push(LoopSegmentRecord {
            id: "loop-9".to_string(),
            entry_point_id: "point-404".to_string(),
            radius: 5.0,
            pitch: 12.0,
        });

        let decoded = decode(&as_record(encoded));
        assert_eq!(decoded.model.loops().len(), 1);
    }

    #[test]
    fn decode_continues_the_id_counter() {
        let decoded = decode(&as_record(encode(&sample_model(), "t", true, false)));
        let mut model = decoded.model;
        assert_eq!(model.add_point(Vec3::ZERO), "point-4");
    }
}
