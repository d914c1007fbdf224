//! Scene replay
//!
//! Drives a [`HoverTooltip`] from a JSON scene (markers, journal entries,
//! viewport) and a line-based script of host notifications. Used by the
//! `marker-hover` binary to exercise the tooltip outside a real canvas.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Deserialize;

use crate::config::{SettingValue, SettingsStore, TooltipSettings};
use crate::content::{ContentDocument, DocumentRef, Marker, MarkerId};
use crate::error::MarkerHoverError;
use crate::host::{CanvasHost, ContentHost, EnrichOptions, HostError};
use crate::overlay::{Overlay, Point, Size, render_overlay_html};
use crate::tooltip::{HoverTooltip, TooltipPhase};

const SECRET_OPEN: &str = "<section class=\"secret\">";
const SECRET_CLOSE: &str = "</section>";

fn default_overlay_size() -> Size {
    Size {
        width: 300.0,
        height: 200.0,
    }
}

/// Marker placed on the replay canvas
#[derive(Debug, Clone, Deserialize)]
pub struct SceneMarker {
    #[serde(flatten)]
    pub marker: Marker,
    pub position: Point,
}

/// Scene file contents
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub viewport: Size,
    /// Size the host reports for the rendered overlay
    #[serde(default = "default_overlay_size")]
    pub overlay_size: Size,
    #[serde(default)]
    pub markers: Vec<SceneMarker>,
    /// Journal entries keyed by reference
    #[serde(default)]
    pub documents: HashMap<String, ContentDocument>,
    /// References whose lookup fails with a backend error
    #[serde(default)]
    pub failing_documents: Vec<String>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self, MarkerHoverError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, MarkerHoverError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Default)]
struct SceneCanvas {
    positions: HashMap<MarkerId, Point>,
    hovered: HashSet<MarkerId>,
}

/// Host backed by a loaded scene
pub struct SceneHost {
    documents: HashMap<DocumentRef, ContentDocument>,
    failing: HashSet<DocumentRef>,
    canvas: Mutex<SceneCanvas>,
    viewport: Size,
    overlay_size: Size,
    settings: TooltipSettings,
}

impl SceneHost {
    pub fn new(scene: &Scene, settings: TooltipSettings) -> Self {
        let documents = scene
            .documents
            .iter()
            .map(|(reference, doc)| (DocumentRef::new(reference.as_str()), doc.clone()))
            .collect();
        let failing = scene
            .failing_documents
            .iter()
            .map(|reference| DocumentRef::new(reference.as_str()))
            .collect();
        let positions = scene
            .markers
            .iter()
            .map(|m| (m.marker.id.clone(), m.position))
            .collect();

        Self {
            documents,
            failing,
            canvas: Mutex::new(SceneCanvas {
                positions,
                hovered: HashSet::new(),
            }),
            viewport: scene.viewport,
            overlay_size: scene.overlay_size,
            settings,
        }
    }

    fn with_canvas<T>(&self, f: impl FnOnce(&mut SceneCanvas) -> T) -> T {
        let mut canvas = self.canvas.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut canvas)
    }

    pub fn set_hovered(&self, marker: &MarkerId, hovered: bool) {
        self.with_canvas(|canvas| {
            if hovered {
                canvas.hovered.insert(marker.clone());
            } else {
                canvas.hovered.remove(marker);
            }
        });
    }

    pub fn move_marker(&self, marker: &MarkerId, position: Point) {
        self.with_canvas(|canvas| {
            canvas.positions.insert(marker.clone(), position);
        });
    }
}

impl ContentHost for SceneHost {
    async fn resolve_document(
        &self,
        reference: &DocumentRef,
    ) -> Result<Option<ContentDocument>, HostError> {
        if self.failing.contains(reference) {
            return Err(HostError::Backend(format!(
                "lookup of {} failed",
                reference
            )));
        }
        Ok(self.documents.get(reference).cloned())
    }

    async fn enrich_html(&self, markup: &str, options: &EnrichOptions) -> Result<String, HostError> {
        if options.secrets {
            return Ok(markup.to_string());
        }
        strip_secrets(markup)
    }
}

/// Remove secret sections the viewer is not allowed to see
fn strip_secrets(markup: &str) -> Result<String, HostError> {
    let mut visible = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(start) = rest.find(SECRET_OPEN) {
        visible.push_str(&rest[..start]);
        let after_open = &rest[start..];
        let Some(end) = after_open.find(SECRET_CLOSE) else {
            return Err(HostError::Enrichment("unclosed secret section".to_string()));
        };
        rest = &after_open[end + SECRET_CLOSE.len()..];
    }
    visible.push_str(rest);
    Ok(visible)
}

impl CanvasHost for SceneHost {
    fn screen_position(&self, marker: &MarkerId) -> Option<Point> {
        self.with_canvas(|canvas| canvas.positions.get(marker).copied())
    }

    fn is_hovered(&self, marker: &MarkerId) -> bool {
        self.with_canvas(|canvas| canvas.hovered.contains(marker))
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn measure(&self, _overlay: &Overlay) -> Size {
        self.overlay_size
    }
}

impl SettingsStore for SceneHost {
    fn setting(&self, key: &str) -> Option<SettingValue> {
        self.settings.setting(key)
    }
}

/// One line of a replay script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    HoverStart(MarkerId),
    HoverEnd(MarkerId),
    Wait(Duration),
    ViewportChanged,
    Refresh(MarkerId),
    Move(MarkerId, Point),
    Teardown,
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptStep::HoverStart(id) => write!(f, "hover-start {}", id),
            ScriptStep::HoverEnd(id) => write!(f, "hover-end {}", id),
            ScriptStep::Wait(d) => write!(f, "wait {}", d.as_millis()),
            ScriptStep::ViewportChanged => f.write_str("viewport"),
            ScriptStep::Refresh(id) => write!(f, "refresh {}", id),
            ScriptStep::Move(id, p) => write!(f, "move {} {} {}", id, p.x, p.y),
            ScriptStep::Teardown => f.write_str("teardown"),
        }
    }
}

/// Parse a replay script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, MarkerHoverError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let invalid = |message: String| MarkerHoverError::InvalidScript {
            line: index + 1,
            message,
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        let step = match words.as_slice() {
            ["hover-start", id] => ScriptStep::HoverStart(MarkerId::new(*id)),
            ["hover-end", id] => ScriptStep::HoverEnd(MarkerId::new(*id)),
            ["wait", ms] => {
                let ms: u64 = ms
                    .parse()
                    .map_err(|_| invalid(format!("invalid wait duration '{}'", ms)))?;
                ScriptStep::Wait(Duration::from_millis(ms))
            }
            ["viewport"] => ScriptStep::ViewportChanged,
            ["refresh", id] => ScriptStep::Refresh(MarkerId::new(*id)),
            ["move", id, x, y] => {
                let x: f64 = x
                    .parse()
                    .map_err(|_| invalid(format!("invalid x coordinate '{}'", x)))?;
                let y: f64 = y
                    .parse()
                    .map_err(|_| invalid(format!("invalid y coordinate '{}'", y)))?;
                ScriptStep::Move(MarkerId::new(*id), Point { x, y })
            }
            ["teardown"] => ScriptStep::Teardown,
            _ => return Err(invalid(format!("unknown command '{}'", line))),
        };
        steps.push(step);
    }
    Ok(steps)
}

/// Tooltip state after a script step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: String,
    pub phase: TooltipPhase,
    pub title: Option<String>,
    pub position: Option<Point>,
    pub html: String,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<22} {:?}", self.step, self.phase)?;
        if let Some(title) = &self.title {
            write!(f, " \"{}\"", title)?;
        }
        if let Some(pos) = self.position {
            write!(f, " at ({}, {})", pos.x, pos.y)?;
        }
        Ok(())
    }
}

/// A tooltip wired to a scene
pub struct Replay {
    tooltip: HoverTooltip<SceneHost>,
    markers: HashMap<MarkerId, Marker>,
}

impl Replay {
    pub fn new(scene: Scene, settings: TooltipSettings) -> Self {
        let host = SceneHost::new(&scene, settings);
        let markers = scene
            .markers
            .into_iter()
            .map(|m| (m.marker.id.clone(), m.marker))
            .collect();
        Self {
            tooltip: HoverTooltip::new(Arc::new(host)),
            markers,
        }
    }

    pub fn tooltip(&self) -> &HoverTooltip<SceneHost> {
        &self.tooltip
    }

    /// Apply one step. Must run inside a tokio runtime.
    pub async fn apply(&mut self, step: &ScriptStep) -> Result<(), MarkerHoverError> {
        match step {
            ScriptStep::HoverStart(id) => {
                let marker = self.marker(id)?;
                self.tooltip.host().set_hovered(id, true);
                self.tooltip.on_hover_start(marker);
            }
            ScriptStep::HoverEnd(id) => {
                self.marker(id)?;
                self.tooltip.host().set_hovered(id, false);
                self.tooltip.on_hover_end(id);
            }
            ScriptStep::Wait(duration) => self.wait(*duration).await,
            ScriptStep::ViewportChanged => {
                self.tooltip.on_viewport_changed();
            }
            ScriptStep::Refresh(id) => {
                self.marker(id)?;
                self.tooltip.on_marker_refresh(id);
            }
            ScriptStep::Move(id, position) => {
                self.marker(id)?;
                self.tooltip.host().move_marker(id, *position);
                self.tooltip.on_marker_refresh(id);
            }
            ScriptStep::Teardown => self.tooltip.on_teardown(),
        }
        self.tooltip.process_pending();
        Ok(())
    }

    /// Run every step, reporting the state after each
    pub async fn run(&mut self, steps: &[ScriptStep]) -> Result<Vec<StepReport>, MarkerHoverError> {
        let mut reports = Vec::with_capacity(steps.len());
        for step in steps {
            self.apply(step).await?;
            reports.push(self.report(step));
        }
        Ok(reports)
    }

    pub fn report(&self, step: &ScriptStep) -> StepReport {
        let overlay = self.tooltip.overlay().filter(|o| o.is_visible());
        StepReport {
            step: step.to_string(),
            phase: self.tooltip.phase(),
            title: overlay
                .and_then(|o| o.content())
                .map(|c| c.title.clone()),
            position: overlay.and_then(|o| o.position()),
            html: self
                .tooltip
                .overlay()
                .map(render_overlay_html)
                .unwrap_or_default(),
        }
    }

    fn marker(&self, id: &MarkerId) -> Result<Marker, MarkerHoverError> {
        self.markers
            .get(id)
            .cloned()
            .ok_or_else(|| MarkerHoverError::InvalidScene(format!("unknown marker '{}'", id)))
    }

    async fn wait(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                _ = self.tooltip.process_next() => {}
            }
        }
        self.tooltip.process_pending();
    }
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod replay_tests;
