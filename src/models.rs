use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct StartFastRequest {
    pub goal_hours: Option<u32>,
    pub start_time: Option<i64>,
}

/// Form fields arrive as text; an empty goal means no goal.
#[derive(Debug, Default, Deserialize)]
pub struct StartFastForm {
    #[serde(default)]
    pub goal: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndedFastResponse {
    pub start_time: i64,
    pub goal_hours: u32,
    pub duration_hours: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TickQuery {
    pub markers: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
}
