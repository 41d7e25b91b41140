//! What the single page app is showing, as a value.
//!
//! UI events become [`Action`]s; [`reduce`] returns the next [`ViewState`]
//! plus the [`Effect`]s (server loads, map moves) the shell should run.

use std::collections::HashSet;

use crate::models::{Id, Landmark, Location, PlanEntryDraft, Visit, VisitPlan};
use crate::render;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Map,
    Landmarks,
    Visited,
    Plans,
}

/// A landmark pinned on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub landmark_id: Id,
    pub location: Location,
    pub popup: String,
}

impl From<&Landmark> for Marker {
    fn from(landmark: &Landmark) -> Self {
        Self {
            landmark_id: landmark.id,
            location: landmark.location.clone(),
            popup: render::marker_popup(landmark),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub tab: Tab,
    pub landmarks: Vec<Landmark>,
    pub markers: Vec<Marker>,
    /// Spot clicked on the map that is not saved as a landmark yet.
    pub pending: Option<Location>,
    /// Landmark whose marker is centred and open.
    pub focused: Option<Id>,
    pub visits: Vec<Visit>,
    pub plans: Vec<VisitPlan>,
    /// Landmarks picked for the plan being built, in pick order.
    pub plan_builder: Vec<PlanEntryDraft>,
    pub notice: Option<String>,
}

impl ViewState {
    pub fn landmark(&self, id: Id) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.id == id)
    }

    pub fn is_selected_for_plan(&self, id: Id) -> bool {
        self.plan_builder.iter().any(|e| e.landmark_id == id)
    }

    /// Saving a landmark needs a clicked spot first.
    pub fn can_add_landmark(&self) -> bool {
        self.pending.is_some()
    }

    fn set_landmarks(&mut self, landmarks: Vec<Landmark>) {
        self.markers = landmarks.iter().map(Marker::from).collect();
        self.landmarks = landmarks;

        let live: HashSet<Id> = self.landmarks.iter().map(|l| l.id).collect();
        if self.focused.is_some_and(|id| !live.contains(&id)) {
            self.focused = None;
        }
        self.plan_builder.retain(|e| live.contains(&e.landmark_id));
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    SwitchTab(Tab),
    MapClicked { latitude: f64, longitude: f64 },
    ClearPending,
    LandmarksLoaded(Vec<Landmark>),
    VisitsLoaded(Vec<Visit>),
    PlansLoaded(Vec<VisitPlan>),
    /// A landmark was created or updated on the server.
    LandmarkSaved(Landmark),
    /// Jump to the map and open this landmark's marker.
    ShowOnMap(Id),
    LandmarkDeleted { id: Id, deleted_plans: u64 },
    VisitSaved,
    VisitDeleted(Id),
    PlanSaved,
    PlanDeleted(Id),
    /// Add the landmark to the plan builder, or remove it if already there.
    TogglePlanLandmark(Id),
    SetPlanNotes { landmark_id: Id, notes: String },
    ClearPlanBuilder,
    DismissNotice,
}

/// Work for the shell to do after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadLandmarks,
    LoadVisits,
    LoadPlans,
    FocusMap(Location),
}

/// Apply `action` to `state`.
pub fn reduce(mut state: ViewState, action: Action) -> (ViewState, Vec<Effect>) {
    let mut effects = Vec::new();

    match action {
        Action::SwitchTab(tab) => {
            state.tab = tab;
            effects.extend(load_for(tab));
        }
        Action::MapClicked {
            latitude,
            longitude,
        } => {
            state.pending = Some(Location::from_degrees(latitude, longitude));
        }
        Action::ClearPending => state.pending = None,
        Action::LandmarksLoaded(landmarks) => state.set_landmarks(landmarks),
        Action::VisitsLoaded(visits) => state.visits = visits,
        Action::PlansLoaded(plans) => state.plans = plans,
        Action::LandmarkSaved(saved) => {
            let mut landmarks = std::mem::take(&mut state.landmarks);
            match landmarks.iter_mut().find(|l| l.id == saved.id) {
                Some(existing) => *existing = saved,
                None => landmarks.insert(0, saved),
            }
            state.set_landmarks(landmarks);
            state.pending = None;
            state.notice = Some("Landmark saved successfully!".into());
        }
        Action::ShowOnMap(id) => {
            if let Some(landmark) = state.landmark(id) {
                effects.push(Effect::FocusMap(landmark.location.clone()));
                state.tab = Tab::Map;
                state.focused = Some(id);
            }
        }
        Action::LandmarkDeleted { id, deleted_plans } => {
            let landmarks = std::mem::take(&mut state.landmarks)
                .into_iter()
                .filter(|l| l.id != id)
                .collect();
            state.set_landmarks(landmarks);
            state.visits.retain(|v| v.landmark_id != id);
            state
                .plans
                .retain(|p| p.landmarks.iter().all(|e| e.landmark_id != id));
            state.notice = Some(render::cascade_notice(deleted_plans));
        }
        Action::VisitSaved => {
            state.notice = Some("Visit recorded successfully!".into());
            effects.push(Effect::LoadVisits);
        }
        Action::VisitDeleted(id) => {
            state.visits.retain(|v| v.id != id);
            state.notice = Some("Visit deleted successfully!".into());
        }
        Action::PlanSaved => {
            state.plan_builder.clear();
            state.notice = Some("Visit plan saved successfully!".into());
            effects.push(Effect::LoadPlans);
        }
        Action::PlanDeleted(id) => {
            state.plans.retain(|p| p.id != id);
            state.notice = Some("Plan deleted successfully!".into());
        }
        Action::TogglePlanLandmark(id) => {
            if state.is_selected_for_plan(id) {
                state.plan_builder.retain(|e| e.landmark_id != id);
            } else if state.landmark(id).is_some() {
                state.plan_builder.push(PlanEntryDraft {
                    landmark_id: id,
                    notes: String::new(),
                });
            }
        }
        Action::SetPlanNotes { landmark_id, notes } => {
            if let Some(entry) = state
                .plan_builder
                .iter_mut()
                .find(|e| e.landmark_id == landmark_id)
            {
                entry.notes = notes;
            }
        }
        Action::ClearPlanBuilder => state.plan_builder.clear(),
        Action::DismissNotice => state.notice = None,
    }

    (state, effects)
}

fn load_for(tab: Tab) -> Vec<Effect> {
    match tab {
        Tab::Map | Tab::Landmarks => vec![Effect::LoadLandmarks],
        Tab::Visited => vec![Effect::LoadVisits],
        // The plan builder picks from the landmark list.
        Tab::Plans => vec![Effect::LoadPlans, Effect::LoadLandmarks],
    }
}
