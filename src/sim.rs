use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::{
    foundation::core::{ElementId, ScrollOffset, Span},
    foundation::error::{ScrollError, ScrollResult},
    page::sink::{RecordingSink, SinkOp},
    scene::config::SceneConfig,
    scene::scroll_scene::{SceneInputs, SceneReport, ScrollFrame, ScrollScene},
    scrub::video::SimulatedVideo,
    timeline::region::TriggerRegion,
    trigger::geometry::GeometryObserver,
};

fn default_true() -> bool {
    true
}

/// A headless page: scene config plus the layout and media a browser would provide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationInput {
    pub scene: SceneConfig,
    /// Elements present in the page, with their vertical extent.
    #[serde(default)]
    pub layout: BTreeMap<ElementId, Span>,
    #[serde(default)]
    pub videos: BTreeMap<ElementId, VideoSpec>,
    /// Whether the page has a visibility observer at all.
    #[serde(default = "default_true")]
    pub observer_available: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoSpec {
    pub duration: f64,
    /// Step index at which metadata arrives. `None` means the video never loads.
    #[serde(default)]
    pub ready_after: Option<usize>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SimulationStep {
    pub step: usize,
    pub frame: ScrollFrame,
    pub revealed: Vec<ElementId>,
    pub ready: Vec<ReadyEvent>,
    pub ops: Vec<SinkOp>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReadyEvent {
    pub resource: ElementId,
    pub position: Option<f64>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SimulationOutput {
    pub report: SceneReport,
    pub steps: Vec<SimulationStep>,
    pub videos: BTreeMap<ElementId, SimulatedVideo>,
}

impl SimulationInput {
    pub fn from_json_str(s: &str) -> ScrollResult<Self> {
        let input: Self = serde_json::from_str(s).map_err(|e| ScrollError::serde(e.to_string()))?;
        input.scene.validate()?;
        Ok(input)
    }

    pub fn from_path(path: &Path) -> ScrollResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            ScrollError::Other(
                anyhow::Error::new(e).context(format!("read simulation '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    /// Furthest offset worth scrolling to: the end of the last pin region or the bottom of the
    /// lowest element, whichever is greater.
    pub fn extent(&self) -> f64 {
        let vh = self.scene.viewport_height;
        let pins = self.scene.pins.iter().filter_map(|p| {
            TriggerRegion::from_element(p.element_top, &p.span, vh)
                .ok()
                .map(|r| r.end())
        });
        let layout = self.layout.values().map(|s| s.bottom() - vh);
        pins.chain(layout).fold(0.0, f64::max)
    }

    pub fn build_scene(&self) -> ScrollScene<GeometryObserver, SimulatedVideo> {
        let policy = self
            .scene
            .reveal
            .as_ref()
            .and_then(|r| r.policy().ok())
            .unwrap_or_default();
        let observer = self.observer_available.then(|| {
            GeometryObserver::new(policy, self.scene.viewport_height, self.layout.clone())
        });
        let inputs = SceneInputs {
            elements: self.layout.keys().cloned().collect::<BTreeSet<_>>(),
            observer,
            resources: self
                .videos
                .iter()
                .map(|(id, spec)| (id.clone(), SimulatedVideo::with_duration(spec.duration)))
                .collect(),
        };
        ScrollScene::build(&self.scene, inputs)
    }
}

/// Upper bound on the number of offsets [`sweep`] will generate.
pub const MAX_SWEEP_STEPS: usize = 100_000;

/// Evenly spaced offsets from `0` to `to` inclusive.
pub fn sweep(to: f64, step: f64) -> ScrollResult<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ScrollError::configuration("sweep step must be > 0"));
    }
    if !to.is_finite() || to < 0.0 {
        return Err(ScrollError::configuration("sweep end must be >= 0"));
    }
    let steps = (to / step).floor();
    if steps >= MAX_SWEEP_STEPS as f64 {
        return Err(ScrollError::configuration(format!(
            "sweep would produce more than {MAX_SWEEP_STEPS} offsets; use a larger step"
        )));
    }
    let n = steps as usize;
    let mut out: Vec<f64> = (0..=n).map(|i| i as f64 * step).collect();
    if out.last().is_some_and(|&last| last < to) {
        out.push(to);
    }
    Ok(out)
}

/// Drive a scene through `offsets`, one step per offset: scroll, then intersections, then any
/// media readiness scheduled for that step.
#[tracing::instrument(skip_all, fields(steps = offsets.len()))]
pub fn run(input: &SimulationInput, offsets: &[f64]) -> SimulationOutput {
    let mut scene = input.build_scene();
    let mut sink = RecordingSink::new();
    let mut steps = Vec::with_capacity(offsets.len());

    for (step, &o) in offsets.iter().enumerate() {
        let offset = ScrollOffset(o);
        let frame = match scene.start(offset, &mut sink) {
            Some(frame) => frame,
            None => scene.on_scroll(offset, &mut sink),
        };

        let entries = scene
            .observer()
            .map(|obs| obs.poll(offset))
            .unwrap_or_default();
        let revealed = scene.on_intersections(&entries, &mut sink);

        let ready = input
            .videos
            .iter()
            .filter(|(_, spec)| spec.ready_after == Some(step))
            .map(|(id, spec)| ReadyEvent {
                resource: id.clone(),
                position: scene.on_resource_ready(id, spec.duration),
            })
            .collect();

        steps.push(SimulationStep {
            step,
            frame,
            revealed,
            ready,
            ops: sink.take(),
        });
    }

    let videos = input
        .videos
        .keys()
        .filter_map(|id| scene.scrub_resource(id).map(|v| (id.clone(), v.clone())))
        .collect();

    SimulationOutput {
        report: scene.report().clone(),
        steps,
        videos,
    }
}

#[cfg(test)]
#[path = "../tests/unit/sim.rs"]
mod tests;
