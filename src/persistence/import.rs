use serde_json::Value;
use thiserror::Error;

use super::record::{LoopSegmentRecord, NewCoaster, TrackPointRecord};

/// Why an externally supplied coaster JSON was rejected. Validation is
/// whole-or-nothing: a failing payload is never partially applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(String),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("coaster name must be a non-empty string")]
    InvalidName,
    #[error("trackPoints must be an array")]
    MissingTrackPoints,
    #[error("track point at index {0} is malformed")]
    InvalidTrackPoint(usize),
    #[error("loop segment at index {0} is malformed")]
    InvalidLoopSegment(usize),
}

/// Validates an externally supplied coaster JSON string and converts it
/// into a [`NewCoaster`] ready for the store.
///
/// Required: a top-level object, a non-empty trimmed `name`, and a
/// `trackPoints` array where every element carries a string `id`, a
/// three-element finite-number `position`, and a numeric `tilt`. Missing
/// `loopSegments` defaults to empty; `hasChainLift` defaults true; the
/// other flags default false.
pub fn parse_import(json: &str) -> Result<NewCoaster, ImportError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ImportError::Malformed(e.to_string()))?;
    let object = value.as_object().ok_or(ImportError::NotAnObject)?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ImportError::InvalidName)?
        .to_string();

    let raw_points = object
        .get("trackPoints")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingTrackPoints)?;

    let mut track_points = Vec::with_capacity(raw_points.len());
    for (index, raw) in raw_points.iter().enumerate() {
        track_points.push(parse_point(raw).ok_or(ImportError::InvalidTrackPoint(index))?);
    }

    let loop_segments = match object.get("loopSegments") {
        Some(Value::Array(raw_segments)) => {
            let mut segments = Vec::with_capacity(raw_segments.len());
            for (index, raw) in raw_segments.iter().enumerate() {
                segments.push(parse_segment(raw).ok_or(ImportError::InvalidLoopSegment(index))?);
            }
            segments
        }
        _ => Vec::new(),
    };

    Ok(NewCoaster {
        name,
        track_points,
        loop_segments,
        is_looped: bool_field(object, "isLooped", false),
        has_chain_lift: bool_field(object, "hasChainLift", true),
        show_wood_supports: bool_field(object, "showWoodSupports", false),
    })
}

fn bool_field(object: &serde_json::Map<String, Value>, key: &str, default: bool) -> bool {
    object.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn finite_f32(value: &Value) -> Option<f32> {
    let number = value.as_f64()? as f32;
    number.is_finite().then_some(number)
}

fn parse_point(raw: &Value) -> Option<TrackPointRecord> {
    let object = raw.as_object()?;
    let id = object.get("id")?.as_str()?.to_string();

    let position_values = object.get("position")?.as_array()?;
    if position_values.len() != 3 {
        return None;
    }
    let mut position = [0.0f32; 3];
    for (slot, value) in position.iter_mut().zip(position_values) {
        *slot = finite_f32(value)?;
    }

    let tilt = finite_f32(object.get("tilt")?)?;
    let has_loop = object
        .get("hasLoop")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(TrackPointRecord {
        id,
        position,
        tilt,
        has_loop,
    })
}

fn parse_segment(raw: &Value) -> Option<LoopSegmentRecord> {
    let object = raw.as_object()?;
    Some(LoopSegmentRecord {
        id: object.get("id")?.as_str()?.to_string(),
        entry_point_id: object.get("entryPointId")?.as_str()?.to_string(),
        radius: finite_f32(object.get("radius")?)?,
        pitch: match object.get("pitch") {
            Some(value) => finite_f32(value)?,
            None => 12.0,
        },
    })
}
