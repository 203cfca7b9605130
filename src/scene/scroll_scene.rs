use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::segment::AppliedValue,
    foundation::core::{ElementId, Progress, ScrollOffset},
    foundation::error::{ScrollError, ScrollResult},
    page::hover::{HoverDirection, HoverEvent, HoverToggle},
    page::lifecycle::PageLifecycle,
    page::sink::ElementSink,
    scene::config::{HeaderConfig, PinConfig, RevealConfig, RevealFallback, SceneConfig},
    scrub::binding::{ScrubBinding, ScrubResource},
    timeline::pinned::{PinState, PinnedTimeline, TimelineSample},
    timeline::region::TriggerRegion,
    trigger::policy::IntersectionEntry,
    trigger::threshold::{ThresholdSwitch, Transition},
    trigger::viewport::{TriggerStatus, ViewportTrigger, VisibilityObserver},
};

/// Collaborators the embedder has already resolved for the current page.
pub struct SceneInputs<O, R> {
    /// Elements that exist in the page. Config entries naming anything else are skipped.
    pub elements: BTreeSet<ElementId>,
    /// Platform visibility observer, if the platform has one.
    pub observer: Option<O>,
    /// Scrub resources by id.
    pub resources: BTreeMap<ElementId, R>,
}

impl<O, R> Default for SceneInputs<O, R> {
    fn default() -> Self {
        Self {
            elements: BTreeSet::new(),
            observer: None,
            resources: BTreeMap::new(),
        }
    }
}

/// Outcome of initializing one part of the scene.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum PartStatus {
    #[default]
    NotConfigured,
    Live,
    /// Running with a reduced policy.
    Degraded(String),
    /// Not running; the rest of the page is unaffected.
    Skipped(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PinReport {
    pub id: ElementId,
    pub timeline: PartStatus,
    pub scrub: PartStatus,
}

/// Which parts of a scene came up, and why the others did not.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SceneReport {
    pub header: PartStatus,
    pub reveal: PartStatus,
    pub hover: PartStatus,
    pub pins: Vec<PinReport>,
}

/// Per-pin output of one scroll update.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PinFrame {
    pub id: ElementId,
    pub progress: Progress,
    pub pin: PinState,
    pub values: Vec<AppliedValue>,
    /// Resource position applied during this update, if any.
    pub scrub_position: Option<f64>,
}

/// Everything one scroll update produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScrollFrame {
    pub offset: ScrollOffset,
    pub header: Option<Transition>,
    pub pins: Vec<PinFrame>,
}

struct HeaderPart {
    target: ElementId,
    marker: String,
    switch: ThresholdSwitch,
}

struct RevealPart<O> {
    marker: String,
    fallback: RevealFallback,
    trigger: ViewportTrigger<O>,
}

struct HoverPart {
    target: ElementId,
    marker: String,
    toggle: HoverToggle,
}

struct ScrubPart<R> {
    resource: ElementId,
    binding: ScrubBinding<R>,
}

struct PinPart<R> {
    id: ElementId,
    timeline: PinnedTimeline,
    scrub: Option<ScrubPart<R>>,
    last: Option<TimelineSample>,
}

/// Composition root: owns every scroll-driven component of a page and routes platform events
/// to them.
///
/// Each component is initialized in isolation; a broken or missing one is logged, recorded in
/// the [`SceneReport`], and left out.
pub struct ScrollScene<O, R> {
    lifecycle: PageLifecycle,
    offset: ScrollOffset,
    header: Option<HeaderPart>,
    reveal: Option<RevealPart<O>>,
    hover: Option<HoverPart>,
    pins: Vec<PinPart<R>>,
    report: SceneReport,
}

impl<O, R> ScrollScene<O, R>
where
    O: VisibilityObserver,
    R: ScrubResource,
{
    #[tracing::instrument(skip_all, fields(pins = config.pins.len()))]
    pub fn build(config: &SceneConfig, inputs: SceneInputs<O, R>) -> Self {
        let SceneInputs {
            elements,
            observer,
            mut resources,
        } = inputs;

        let mut report = SceneReport::default();

        let header = config.header.as_ref().and_then(|cfg| {
            match build_header(cfg, &elements) {
                Ok(part) => {
                    report.header = PartStatus::Live;
                    Some(part)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "header switch skipped");
                    report.header = PartStatus::Skipped(err.to_string());
                    None
                }
            }
        });

        let reveal = config.reveal.as_ref().and_then(|cfg| {
            match build_reveal(cfg, &elements, observer) {
                Ok(part) => {
                    report.reveal = match part.trigger.status() {
                        TriggerStatus::Inert => PartStatus::Degraded(
                            ScrollError::collaborator_unavailable("visibility observer")
                                .to_string(),
                        ),
                        TriggerStatus::Watching | TriggerStatus::Idle => PartStatus::Live,
                    };
                    Some(part)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "viewport trigger skipped");
                    report.reveal = PartStatus::Skipped(err.to_string());
                    None
                }
            }
        });

        let hover = config.hover.as_ref().and_then(|cfg| {
            if elements.contains(&cfg.target) {
                report.hover = PartStatus::Live;
                Some(HoverPart {
                    target: cfg.target.clone(),
                    marker: cfg.marker.clone(),
                    toggle: HoverToggle::new(),
                })
            } else {
                let err = ScrollError::missing_target(format!("hover target '{}'", cfg.target));
                tracing::warn!(error = %err, "hover toggle skipped");
                report.hover = PartStatus::Skipped(err.to_string());
                None
            }
        });

        let mut pins = Vec::with_capacity(config.pins.len());
        for cfg in &config.pins {
            let mut pin_report = PinReport {
                id: cfg.id.clone(),
                timeline: PartStatus::NotConfigured,
                scrub: PartStatus::NotConfigured,
            };

            let timeline = match build_timeline(cfg, config.viewport_height, &elements) {
                Ok(tl) => tl,
                Err(err) => {
                    tracing::warn!(pin = %cfg.id, error = %err, "pinned timeline skipped");
                    pin_report.timeline = PartStatus::Skipped(err.to_string());
                    if cfg.scrub.is_some() {
                        pin_report.scrub =
                            PartStatus::Skipped("pinned timeline unavailable".to_owned());
                    }
                    report.pins.push(pin_report);
                    continue;
                }
            };
            pin_report.timeline = PartStatus::Live;

            let scrub = cfg.scrub.as_ref().and_then(|sc| {
                match resources.remove(&sc.resource) {
                    Some(resource) => {
                        pin_report.scrub = PartStatus::Live;
                        Some(ScrubPart {
                            resource: sc.resource.clone(),
                            binding: ScrubBinding::bind(resource),
                        })
                    }
                    None => {
                        let err = ScrollError::missing_target(format!(
                            "scrub resource '{}'",
                            sc.resource
                        ));
                        tracing::warn!(pin = %cfg.id, error = %err, "scrub binding skipped");
                        pin_report.scrub = PartStatus::Skipped(err.to_string());
                        None
                    }
                }
            });

            report.pins.push(pin_report);
            pins.push(PinPart {
                id: cfg.id.clone(),
                timeline,
                scrub,
                last: None,
            });
        }

        Self {
            lifecycle: PageLifecycle::Loading,
            offset: ScrollOffset::default(),
            header,
            reveal,
            hover,
            pins,
            report,
        }
    }

    pub fn report(&self) -> &SceneReport {
        &self.report
    }

    pub fn lifecycle(&self) -> PageLifecycle {
        self.lifecycle
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn observer(&self) -> Option<&O> {
        self.reveal.as_ref().and_then(|r| r.trigger.observer())
    }

    pub fn timeline(&self, pin: &ElementId) -> Option<&PinnedTimeline> {
        self.pins
            .iter()
            .find(|p| &p.id == pin)
            .map(|p| &p.timeline)
    }

    pub fn scrub_resource(&self, resource: &ElementId) -> Option<&R> {
        self.pins
            .iter()
            .filter_map(|p| p.scrub.as_ref())
            .find(|s| &s.resource == resource)
            .map(|s| s.binding.resource())
    }

    /// Mark the page loaded, apply the reveal fallback if one is configured and needed, and
    /// push the initial state for `offset`. Only the first call does anything.
    pub fn start(&mut self, offset: ScrollOffset, sink: &mut impl ElementSink) -> Option<ScrollFrame> {
        if !self.lifecycle.mark_loaded() {
            return None;
        }

        if let Some(reveal) = self.reveal.as_mut()
            && reveal.trigger.status() == TriggerStatus::Inert
            && reveal.fallback == RevealFallback::RevealAll
        {
            let revealed = reveal.trigger.reveal_all();
            tracing::debug!(count = revealed.len(), "revealing everything without observer");
            for id in &revealed {
                sink.add_marker(id, &reveal.marker);
            }
        }

        Some(self.on_scroll(offset, sink))
    }

    pub fn on_scroll(&mut self, offset: ScrollOffset, sink: &mut impl ElementSink) -> ScrollFrame {
        self.offset = offset;

        let header = self.header.as_mut().and_then(|h| {
            let transition = h.switch.update(offset)?;
            match transition {
                Transition::Enter => sink.add_marker(&h.target, &h.marker),
                Transition::Leave => sink.remove_marker(&h.target, &h.marker),
            }
            Some(transition)
        });

        let mut pins = Vec::with_capacity(self.pins.len());
        for pin in &mut self.pins {
            let sample = pin.timeline.sample(offset);
            let changed = pin.last.as_ref() != Some(&sample);

            let mut scrub_position = None;
            if changed {
                sink.set_pin(&pin.id, sample.pin);
                for v in &sample.values {
                    sink.apply(v);
                }
                let progress_moved = pin.last.as_ref().map(|l| l.progress) != Some(sample.progress);
                if progress_moved && let Some(scrub) = pin.scrub.as_mut() {
                    scrub_position = scrub.binding.on_progress(sample.progress);
                }
            }

            pins.push(PinFrame {
                id: pin.id.clone(),
                progress: sample.progress,
                pin: sample.pin,
                values: sample.values.clone(),
                scrub_position,
            });
            pin.last = Some(sample);
        }

        ScrollFrame {
            offset,
            header,
            pins,
        }
    }

    /// Forward a batch of intersection changes; returns the newly revealed elements.
    pub fn on_intersections(
        &mut self,
        entries: &[IntersectionEntry],
        sink: &mut impl ElementSink,
    ) -> Vec<ElementId> {
        let Some(reveal) = self.reveal.as_mut() else {
            return Vec::new();
        };
        let revealed = reveal.trigger.on_intersections(entries);
        for id in &revealed {
            sink.add_marker(id, &reveal.marker);
        }
        revealed
    }

    /// Readiness notification from a scrub resource. The position is derived from the
    /// progress at the current scroll offset.
    pub fn on_resource_ready(&mut self, resource: &ElementId, duration: f64) -> Option<f64> {
        let offset = self.offset;
        let Some(pin) = self
            .pins
            .iter_mut()
            .find(|p| p.scrub.as_ref().is_some_and(|s| &s.resource == resource))
        else {
            tracing::debug!(%resource, "readiness for unbound resource ignored");
            return None;
        };
        let current = pin.timeline.progress_for(offset);
        pin.scrub
            .as_mut()
            .and_then(|s| s.binding.on_ready(duration, current))
    }

    pub fn on_hover(
        &mut self,
        target: &ElementId,
        event: HoverEvent,
        sink: &mut impl ElementSink,
    ) -> Option<HoverDirection> {
        let hover = self.hover.as_mut().filter(|h| &h.target == target)?;
        let direction = hover.toggle.handle(event)?;
        match direction {
            HoverDirection::Forward => sink.add_marker(&hover.target, &hover.marker),
            HoverDirection::Reverse => sink.remove_marker(&hover.target, &hover.marker),
        }
        Some(direction)
    }
}

fn build_header(cfg: &HeaderConfig, elements: &BTreeSet<ElementId>) -> ScrollResult<HeaderPart> {
    if !elements.contains(&cfg.target) {
        return Err(ScrollError::missing_target(format!(
            "header '{}'",
            cfg.target
        )));
    }
    if !cfg.threshold.is_finite() {
        return Err(ScrollError::configuration("header threshold must be finite"));
    }
    Ok(HeaderPart {
        target: cfg.target.clone(),
        marker: cfg.marker.clone(),
        switch: ThresholdSwitch::new(cfg.threshold),
    })
}

fn build_reveal<O: VisibilityObserver>(
    cfg: &RevealConfig,
    elements: &BTreeSet<ElementId>,
    observer: Option<O>,
) -> ScrollResult<RevealPart<O>> {
    let policy = cfg.policy()?;
    let mut present = Vec::with_capacity(cfg.targets.len());
    for id in &cfg.targets {
        if elements.contains(id) {
            present.push(id.clone());
        } else {
            tracing::warn!(element = %id, "reveal target not in page; skipping");
        }
    }
    Ok(RevealPart {
        marker: cfg.marker.clone(),
        fallback: cfg.fallback,
        trigger: ViewportTrigger::new(present.into(), policy, observer),
    })
}

fn build_timeline(
    cfg: &PinConfig,
    viewport_height: f64,
    elements: &BTreeSet<ElementId>,
) -> ScrollResult<PinnedTimeline> {
    if !elements.contains(&cfg.id) {
        return Err(ScrollError::missing_target(format!("pin '{}'", cfg.id)));
    }
    let region = TriggerRegion::from_element(cfg.element_top, &cfg.span, viewport_height)?;

    let mut missing = BTreeSet::new();
    for id in cfg.content.targets() {
        if !elements.contains(id) && missing.insert(id) {
            tracing::warn!(pin = %cfg.id, element = %id, "segment target not in page; skipping");
        }
    }
    let segments = cfg.content.build_segments(|id| elements.contains(id))?;
    PinnedTimeline::new(region, segments)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scroll_scene.rs"]
mod tests;
