use crate::stages::{resolve_stage, Stage, STAGES};
use serde::{Deserialize, Serialize, Serializer};

const SECONDS_PER_HOUR: u64 = 3600;

/// A running fast. `start_time` is a unix timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastSession {
    pub start_time: i64,
    #[serde(default)]
    pub goal_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElapsedState {
    pub elapsed_seconds: u64,
    pub elapsed_hours: u64,
}

impl ElapsedState {
    /// Start instants in the future clamp to zero elapsed time.
    pub fn between(start_time: i64, now: i64) -> Self {
        let elapsed_seconds = now.saturating_sub(start_time).max(0) as u64;
        Self {
            elapsed_seconds,
            elapsed_hours: elapsed_seconds / SECONDS_PER_HOUR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerState {
    pub hour: u32,
    #[serde(rename = "style_tag", serialize_with = "serialize_style_tag")]
    pub stage: &'static Stage,
    pub filled: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub timer_text: String,
    pub elapsed: ElapsedState,
    pub markers: Vec<MarkerState>,
    pub active_stage: &'static Stage,
    pub catalog: &'static [Stage],
}

fn serialize_style_tag<S: Serializer>(stage: &&'static Stage, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(stage.style_tag)
}

/// Formats as `HH:MM:SS`. Hours keep growing past 99.
pub fn format_elapsed(elapsed_seconds: u64) -> String {
    let hours = elapsed_seconds / SECONDS_PER_HOUR;
    let minutes = (elapsed_seconds % SECONDS_PER_HOUR) / 60;
    let seconds = elapsed_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// A marker is colored by the stage its own hour falls in, not the elapsed stage.
pub fn compute_marker_state(hour: u32, elapsed_hours: u64) -> MarkerState {
    let hour_wide = u64::from(hour);
    MarkerState {
        hour,
        stage: resolve_stage(hour_wide),
        filled: hour_wide <= elapsed_hours,
        current: hour_wide == elapsed_hours,
    }
}

pub fn tick(session: &FastSession, now: i64, marker_hours: &[u32]) -> RenderModel {
    let elapsed = ElapsedState::between(session.start_time, now);
    RenderModel {
        timer_text: format_elapsed(elapsed.elapsed_seconds),
        elapsed,
        markers: marker_hours
            .iter()
            .map(|&hour| compute_marker_state(hour, elapsed.elapsed_hours))
            .collect(),
        active_stage: resolve_stage(elapsed.elapsed_hours),
        catalog: STAGES,
    }
}
