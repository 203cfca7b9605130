//! scrollsync turns a one-dimensional scroll offset into deterministic animation state.
//!
//! The engine is built from four independent parts plus a composition root:
//!
//! 1. **Viewport trigger**: one-shot "revealed" events as elements enter the viewport.
//! 2. **Threshold switch**: a two-state flag toggled when the offset crosses a fixed value.
//! 3. **Pinned timeline**: maps progress through a scroll region to segment values and pins
//!    the region while it plays.
//! 4. **Scrub binding**: follows a timeline's progress with a resource's playback position once
//!    the resource reports its duration.
//!
//! [`ScrollScene`] wires them together from a [`SceneConfig`] and routes scroll, intersection
//! and readiness events. Platform primitives (visibility observers, media elements, the DOM)
//! stay outside the crate behind [`VisibilityObserver`], [`ScrubResource`] and [`ElementSink`].
//!
//! Every output is a pure function of the current offset: there is no wall-clock time, so
//! scrolling backward exactly reverses forward progress.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod page;
mod scene;
mod scrub;
mod timeline;
mod trigger;

/// Headless driver used by the CLI and integration tests.
pub mod sim;

pub use animation::ease::Ease;
pub use animation::segment::{ActiveRange, AppliedValue, Segment};
pub use animation::value::{Lerp, Property, PropertyValue, ValueKind};
pub use foundation::core::{ElementId, Progress, ScrollOffset, Span, Targets, Vec2};
pub use foundation::error::{ScrollError, ScrollResult};
pub use page::hover::{HoverDirection, HoverEvent, HoverToggle};
pub use page::lifecycle::PageLifecycle;
pub use page::sink::{ElementSink, RecordingSink, SinkOp};
pub use scene::config::{
    HeaderConfig, HoverConfig, PinConfig, PinContent, RevealConfig, RevealFallback, SceneConfig,
    ScrubConfig, SegmentDef,
};
pub use scene::scroll_scene::{
    PartStatus, PinFrame, PinReport, SceneInputs, SceneReport, ScrollFrame, ScrollScene,
};
pub use scrub::binding::{ScrubBinding, ScrubResource, ScrubTarget};
pub use scrub::video::{MediaEvent, SimulatedVideo};
pub use timeline::narrative::{NarrativeOptions, narrative_segments};
pub use timeline::pinned::{PinState, PinnedTimeline, TimelineSample};
pub use timeline::region::{PinSpan, TriggerRegion};
pub use trigger::geometry::GeometryObserver;
pub use trigger::policy::{IntersectionEntry, RootMargin, VisibilityPolicy};
pub use trigger::threshold::{ThresholdState, ThresholdSwitch, Transition};
pub use trigger::viewport::{TriggerStatus, ViewportTrigger, VisibilityObserver};
