use glam::Vec3;

use crate::curve::{CurveCache, TrackCurve};
use crate::model::TrackModel;
use crate::persistence::{self, CoasterRecord, CoasterStore, NewCoaster};
use crate::ride::{self, RideConfig, RideMode, RideState};

/// Authoring-session state with no bearing on the saved coaster.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub selected_point_id: Option<String>,
    pub is_adding_points: bool,
    pub is_night_mode: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_point_id: None,
            is_adding_points: true,
            is_night_mode: false,
        }
    }
}

/// The complete editor session: the persisted track model, the ephemeral
/// ride session, and UI state, kept in separate substructures so the curve
/// builder and ride kinematics stay testable without a UI harness.
///
/// All mutations go through methods here; operations whose target is
/// missing or whose precondition fails are silent no-ops. The derived
/// curve is memoized on the model's content revision.
#[derive(Debug)]
pub struct EditorState {
    pub model: TrackModel,
    pub ride: RideState,
    pub ui: UiState,
    pub ride_speed: f32,
    pub has_chain_lift: bool,
    pub show_wood_supports: bool,
    pub coaster_name: Option<String>,
    curve: CurveCache,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            model: TrackModel::new(),
            ride: RideState::new(),
            ui: UiState::default(),
            ride_speed: 1.0,
            has_chain_lift: true,
            show_wood_supports: false,
            coaster_name: None,
            curve: CurveCache::new(),
        }
    }

    /// The current rail curve, rebuilt only when the model changed.
    pub fn curve(&mut self) -> Option<&TrackCurve> {
        self.curve.curve(&self.model)
    }

    fn ride_config(&self) -> RideConfig {
        RideConfig {
            speed_multiplier: self.ride_speed,
            chain_lift: self.has_chain_lift,
        }
    }

    // Editing operations.

    pub fn add_point(&mut self, position: Vec3) -> String {
        self.model.add_point(position)
    }

    pub fn update_point_position(&mut self, id: &str, position: Vec3) {
        self.model.update_point_position(id, position);
    }

    pub fn update_point_tilt(&mut self, id: &str, tilt: f32) {
        self.model.update_point_tilt(id, tilt);
    }

    /// Removes a point, dropping the selection if it pointed at it.
    pub fn remove_point(&mut self, id: &str) {
        self.model.remove_point(id);
        if self.ui.selected_point_id.as_deref() == Some(id) {
            self.ui.selected_point_id = None;
        }
    }

    pub fn create_loop_at(&mut self, id: &str) {
        self.model.create_loop_at(id);
    }

    pub fn select_point(&mut self, id: Option<String>) {
        self.ui.selected_point_id = id;
    }

    /// Resets points, loops, selection, and the ride session as one
    /// transition; no intermediate state is observable.
    pub fn clear(&mut self) {
        self.model.clear();
        self.ui.selected_point_id = None;
        self.ride = RideState::new();
    }

    pub fn set_looped(&mut self, looped: bool) {
        self.model.set_looped(looped);
    }

    pub fn set_chain_lift(&mut self, enabled: bool) {
        self.has_chain_lift = enabled;
    }

    pub fn set_show_wood_supports(&mut self, show: bool) {
        self.show_wood_supports = show;
    }

    pub fn set_night_mode(&mut self, night: bool) {
        self.ui.is_night_mode = night;
    }

    pub fn set_adding_points(&mut self, adding: bool) {
        self.ui.is_adding_points = adding;
    }

    /// Speed multiplier for the ride. Non-finite or non-positive values
    /// are ignored.
    pub fn set_ride_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.ride_speed = speed;
        }
    }

    /// Switches between build and preview. Leaving ride mode stops the
    /// ride; entering it goes through [`EditorState::start_ride`].
    pub fn set_mode(&mut self, mode: RideMode) {
        match mode {
            RideMode::Ride => self.start_ride(),
            _ => {
                self.ride = self.ride.stop();
                self.ride.mode = mode;
            }
        }
    }

    // Ride session.

    /// Starts the ride at the beginning of the track. No-op with fewer
    /// than two points.
    pub fn start_ride(&mut self) {
        if self.model.points().len() < 2 {
            return;
        }
        if let Some(curve) = self.curve.curve(&self.model) {
            self.ride = RideState::start(curve);
        }
    }

    pub fn stop_ride(&mut self) {
        self.ride = self.ride.stop();
    }

    /// Advances the simulation by `dt` seconds. Call once per rendered
    /// frame, or from any other driver.
    pub fn step(&mut self, dt: f32) {
        if !self.ride.is_riding {
            return;
        }
        let config = self.ride_config();
        let Some(curve) = self.curve.curve(&self.model) else {
            self.ride = self.ride.stop();
            return;
        };
        self.ride = ride::step(curve, &self.ride, &config, dt);
    }

    // Persistence glue. Store failures never roll back local edits.

    /// Snapshot of the current model ready for the store.
    pub fn to_new_coaster(&self, name: &str) -> NewCoaster {
        persistence::encode(
            &self.model,
            name,
            self.has_chain_lift,
            self.show_wood_supports,
        )
    }

    /// Saves the current track under `name` and remembers the name.
    pub fn save(&mut self, store: &mut dyn CoasterStore, name: &str) -> CoasterRecord {
        let record = store.create(self.to_new_coaster(name));
        self.coaster_name = Some(record.name.clone());
        record
    }

    /// Replaces the session with a stored coaster. Returns false (leaving
    /// the session untouched) when the id is unknown.
    pub fn load(&mut self, store: &dyn CoasterStore, id: i64) -> bool {
        let Some(record) = store.get(id) else {
            return false;
        };
        let decoded = persistence::decode(&record);
        self.model = decoded.model;
        self.has_chain_lift = decoded.has_chain_lift;
        self.show_wood_supports = decoded.show_wood_supports;
        self.coaster_name = Some(decoded.name);
        self.ui.selected_point_id = None;
        self.ride = RideState::new();
        true
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates an externally supplied coaster JSON and stores it. The whole
/// payload is rejected on any validation failure; nothing is created.
pub fn import_coaster(
    store: &mut dyn CoasterStore,
    json: &str,
) -> Result<CoasterRecord, persistence::ImportError> {
    let coaster = persistence::parse_import(json)?;
    Ok(store.create(coaster))
}
