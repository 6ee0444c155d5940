use crate::stages::STAGES;
use crate::tracker::{FastSession, MarkerState, RenderModel};
use chrono::{DateTime, Local};

/// Errors surfaced on the page through the `?error=` query code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    InvalidGoal,
    AlreadyRunning,
    NoFast,
}

impl PageError {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidGoal => "invalid-goal",
            Self::AlreadyRunning => "already-running",
            Self::NoFast => "no-fast",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid-goal" => Some(Self::InvalidGoal),
            "already-running" => Some(Self::AlreadyRunning),
            "no-fast" => Some(Self::NoFast),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidGoal => "Goal must be a non-negative number",
            Self::AlreadyRunning => "A fast is already in progress",
            Self::NoFast => "No fast in progress",
        }
    }
}

pub fn render_fasting(session: Option<&FastSession>, model: Option<&RenderModel>, error: Option<PageError>) -> String {
    let error_html = error
        .map(|err| format!(r#"<div class="status" data-type="error">{}</div>"#, err.message()))
        .unwrap_or_default();

    let body = match (session, model) {
        (Some(session), Some(model)) => render_running(session, model),
        _ => START_FORM_HTML.to_string(),
    };

    FASTING_HTML
        .replace("{{ERROR}}", &error_html)
        .replace("{{BODY}}", &body)
        .replace("{{STAGES}}", &render_catalog())
}

fn render_running(session: &FastSession, model: &RenderModel) -> String {
    let goal = if session.goal_hours > 0 {
        format!("Goal: {} hours", session.goal_hours)
    } else {
        "No goal set".to_string()
    };
    let stage = model.active_stage;

    RUNNING_HTML
        .replace("{{START}}", &session.start_time.to_string())
        .replace("{{STARTED_AT}}", &format_start(session.start_time))
        .replace("{{GOAL}}", &goal)
        .replace("{{TIMER}}", &model.timer_text)
        .replace("{{DOTS}}", &render_dots(&model.markers))
        .replace("{{STAGE_CLASS}}", stage.style_tag)
        .replace("{{STAGE_NAME}}", stage.name)
        .replace("{{STAGE_DESCRIPTION}}", stage.description)
}

fn render_dots(markers: &[MarkerState]) -> String {
    markers
        .iter()
        .map(|marker| {
            let mut class = format!("dot {}", marker.stage.style_tag);
            if marker.filled {
                class.push_str(" filled");
            }
            if marker.current {
                class.push_str(" current-hour");
            }
            format!(
                r#"<span class="{class}" data-hour="{hour}" title="Hour {hour}"></span>"#,
                hour = marker.hour
            )
        })
        .collect()
}

fn render_catalog() -> String {
    STAGES
        .iter()
        .map(|stage| {
            format!(
                r#"<div class="stage-item {}"><strong>{} (from {} hours)</strong><p>{}</p></div>"#,
                stage.style_tag, stage.name, stage.threshold_hours, stage.description
            )
        })
        .collect()
}

fn format_start(start_time: i64) -> String {
    DateTime::from_timestamp(start_time, 0)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| start_time.to_string())
}

const START_FORM_HTML: &str = r#"<section class="card">
      <p class="subtitle">No fast in progress.</p>
      <form method="post" action="/start_fast" class="actions">
        <input type="number" name="goal" min="0" placeholder="Goal hours (optional)" />
        <button class="btn-start" type="submit">Start fast</button>
      </form>
    </section>"#;

const RUNNING_HTML: &str = r#"<section class="card" id="current-fast" data-start-time="{{START}}">
      <p class="subtitle">Started {{STARTED_AT}} &middot; {{GOAL}}</p>
      <div id="timer" class="timer">{{TIMER}}</div>
      <div class="dots">{{DOTS}}</div>
      <div id="current-stage" class="box {{STAGE_CLASS}}">
        <strong id="stage-name">{{STAGE_NAME}}</strong>
        <p id="stage-description">{{STAGE_DESCRIPTION}}</p>
      </div>
      <div class="actions">
        <button class="btn-secondary" id="view-stages-btn" type="button">View stages</button>
        <form method="post" action="/end_fast">
          <button class="btn-end" type="submit">End fast</button>
        </form>
      </div>
    </section>"#;

const FASTING_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fasting Timer</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .card {
      display: grid;
      gap: 18px;
    }

    .timer {
      font-size: clamp(2.4rem, 8vw, 4rem);
      font-weight: 600;
      font-variant-numeric: tabular-nums;
      color: var(--accent-2);
    }

    .dots {
      display: flex;
      flex-wrap: wrap;
      gap: 5px;
    }

    .dot {
      width: 14px;
      height: 14px;
      border-radius: 50%;
      border: 2px solid currentColor;
      opacity: 0.35;
    }

    .dot.filled {
      background: currentColor;
      opacity: 1;
    }

    .dot.current-hour {
      outline: 2px solid var(--ink);
      outline-offset: 2px;
    }

    .box,
    .stage-item {
      border-radius: 18px;
      padding: 16px 18px;
      background: white;
      border-left: 8px solid currentColor;
    }

    .box p,
    .stage-item p {
      margin: 6px 0 0;
      color: var(--ink);
    }

    .stage-0 { color: #d9534f; }
    .stage-4 { color: #e8743b; }
    .stage-8 { color: #f0ad4e; }
    .stage-12 { color: #c9b531; }
    .stage-18 { color: #8cba3c; }
    .stage-24 { color: #4caf50; }
    .stage-36 { color: #2e9c8a; }
    .stage-48 { color: #2b8cbe; }
    .stage-54 { color: #3f6cc4; }
    .stage-72 { color: #5c4fc4; }
    .stage-96 { color: #8046b8; }
    .stage-120 { color: #a83f9a; }
    .stage-144 { color: #6b2f57; }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    input {
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 14px 18px;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
    }

    .btn-start { background: var(--accent); }
    .btn-end { background: var(--accent-2); }
    .btn-secondary { background: #8b857d; }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .modal {
      display: none;
      position: fixed;
      inset: 0;
      place-items: center;
    }

    .modal.is-active {
      display: grid;
    }

    .modal-background {
      position: absolute;
      inset: 0;
      background: rgba(43, 42, 40, 0.55);
    }

    .modal-content {
      position: relative;
      width: min(640px, 92vw);
      max-height: 80vh;
      overflow-y: auto;
      background: var(--bg-1);
      border-radius: 22px;
      padding: 24px;
      display: grid;
      gap: 12px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Fasting Timer</h1>
    </header>
    {{ERROR}}
    {{BODY}}
  </main>

  <div class="modal" id="stages-modal">
    <div class="modal-background"></div>
    <div class="modal-content">
      <div class="actions">
        <h2>Fasting stages</h2>
        <button class="btn-secondary" id="modal-close-btn" type="button">Close</button>
      </div>
      <div id="stages-list">{{STAGES}}</div>
    </div>
  </div>

  <script>
    const modal = document.getElementById('stages-modal');
    const openModal = () => modal.classList.add('is-active');
    const closeModal = () => modal.classList.remove('is-active');

    const viewStagesBtn = document.getElementById('view-stages-btn');
    if (viewStagesBtn) {
      viewStagesBtn.addEventListener('click', openModal);
    }
    document.getElementById('modal-close-btn').addEventListener('click', closeModal);
    document.querySelector('.modal-background').addEventListener('click', closeModal);

    const applyModel = (model) => {
      const timerEl = document.getElementById('timer');
      const stageEl = document.getElementById('current-stage');
      if (!timerEl || !stageEl) {
        return;
      }

      timerEl.textContent = model.timer_text;

      const byHour = new Map(model.markers.map((marker) => [marker.hour, marker]));
      document.querySelectorAll('.dot').forEach((dot) => {
        const marker = byHour.get(parseInt(dot.dataset.hour, 10));
        if (!marker) {
          return;
        }
        dot.className = `dot ${marker.style_tag}`;
        dot.classList.toggle('filled', marker.filled);
        dot.classList.toggle('current-hour', marker.current);
      });

      stageEl.className = `box ${model.active_stage.style_tag}`;
      document.getElementById('stage-name').textContent = model.active_stage.name;
      document.getElementById('stage-description').textContent = model.active_stage.description;
    };

    const refresh = async () => {
      if (!document.getElementById('current-fast')) {
        return;
      }
      const res = await fetch('/api/tick');
      if (!res.ok) {
        return;
      }
      applyModel(await res.json());
    };

    setInterval(() => refresh().catch(() => {}), 1000);
    refresh().catch(() => {});
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::tick;

    #[test]
    fn page_without_fast_shows_start_form() {
        let html = render_fasting(None, None, None);
        assert!(html.contains(r#"action="/start_fast""#));
        assert!(!html.contains(r#"id="current-fast""#));
        assert!(html.contains("Protein level phase (from 144 hours)"));
    }

    #[test]
    fn page_with_fast_renders_model() {
        let session = FastSession {
            start_time: 1_000_000,
            goal_hours: 16,
        };
        let model = tick(&session, 1_000_000 + 30_000, &[7, 8, 9]);
        let html = render_fasting(Some(&session), Some(&model), None);

        assert!(html.contains(r#"data-start-time="1000000""#));
        assert!(html.contains("08:20:00"));
        assert!(html.contains("Goal: 16 hours"));
        assert!(html.contains(r#"<span class="dot stage-4 filled" data-hour="7""#));
        assert!(html.contains(r#"<span class="dot stage-8 filled current-hour" data-hour="8""#));
        assert!(html.contains(r#"<span class="dot stage-8" data-hour="9""#));
        assert!(html.contains(r#"class="box stage-8""#));
        assert!(html.contains("Fat burning phase"));
    }

    #[test]
    fn error_codes_map_to_messages() {
        for error in [PageError::InvalidGoal, PageError::AlreadyRunning, PageError::NoFast] {
            assert_eq!(PageError::from_code(error.code()), Some(error));
        }
        assert_eq!(PageError::from_code("bogus"), None);

        let html = render_fasting(None, None, Some(PageError::NoFast));
        assert!(html.contains("No fast in progress"));
    }
}
