use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_pitch() -> f32 {
    12.0
}

fn default_true() -> bool {
    true
}

/// Wire shape of one control point: position as a 3-tuple, tilt in
/// degrees, and the derived loop flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPointRecord {
    pub id: String,
    pub position: [f32; 3],
    pub tilt: f32,
    #[serde(default)]
    pub has_loop: bool,
}

/// Wire shape of one loop annotation. Records written before pitch
/// existed omit it; it defaults to 12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopSegmentRecord {
    pub id: String,
    pub entry_point_id: String,
    pub radius: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
}

/// A coaster as stored by the persistence service. The store assigns
/// `id` and the timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoasterRecord {
    pub id: i64,
    pub name: String,
    pub track_points: Vec<TrackPointRecord>,
    #[serde(default)]
    pub loop_segments: Vec<LoopSegmentRecord>,
    #[serde(default)]
    pub is_looped: bool,
    #[serde(default = "default_true")]
    pub has_chain_lift: bool,
    #[serde(default)]
    pub show_wood_supports: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A coaster about to be created; everything the store assigns is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoaster {
    pub name: String,
    pub track_points: Vec<TrackPointRecord>,
    #[serde(default)]
    pub loop_segments: Vec<LoopSegmentRecord>,
    #[serde(default)]
    pub is_looped: bool,
    #[serde(default = "default_true")]
    pub has_chain_lift: bool,
    #[serde(default)]
    pub show_wood_supports: bool,
}

/// Listing entry, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoasterSummary {
    pub id: i64,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}
