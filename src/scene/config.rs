use std::collections::BTreeSet;
use std::path::Path;

use crate::{
    animation::ease::Ease,
    animation::segment::{ActiveRange, Segment},
    animation::value::{Property, PropertyValue},
    foundation::core::ElementId,
    foundation::error::{ScrollError, ScrollResult},
    timeline::narrative::{NarrativeOptions, narrative_segments},
    timeline::region::PinSpan,
    trigger::policy::{RootMargin, VisibilityPolicy},
};

fn default_threshold() -> f64 {
    50.0
}

fn default_scrolled_marker() -> String {
    "scrolled".to_owned()
}

fn default_root_margin() -> String {
    "0px 0px -100px 0px".to_owned()
}

fn default_visibility_fraction() -> f64 {
    0.1
}

fn default_visible_marker() -> String {
    "is-visible".to_owned()
}

fn default_hover_marker() -> String {
    "is-hovered".to_owned()
}

/// Declarative description of every scroll-driven behavior on a page.
///
/// All values are fixed at construction; the scene never reconfigures at runtime.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Viewport height in pixels, used to size `per_segment` pin spans.
    pub viewport_height: f64,
    #[serde(default)]
    pub header: Option<HeaderConfig>,
    #[serde(default)]
    pub reveal: Option<RevealConfig>,
    #[serde(default)]
    pub hover: Option<HoverConfig>,
    #[serde(default)]
    pub pins: Vec<PinConfig>,
}

/// Sticky header: marker toggled when the page scrolls past `threshold`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderConfig {
    pub target: ElementId,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_scrolled_marker")]
    pub marker: String,
}

/// What to do with reveal targets when no visibility observer exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealFallback {
    /// Leave them unrevealed.
    #[default]
    None,
    /// Reveal everything immediately on start.
    RevealAll,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealConfig {
    pub targets: Vec<ElementId>,
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
    #[serde(default = "default_visibility_fraction")]
    pub visibility_fraction: f64,
    #[serde(default = "default_visible_marker")]
    pub marker: String,
    #[serde(default)]
    pub fallback: RevealFallback,
}

impl RevealConfig {
    pub fn policy(&self) -> ScrollResult<VisibilityPolicy> {
        VisibilityPolicy::new(RootMargin::parse(&self.root_margin)?, self.visibility_fraction)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoverConfig {
    pub target: ElementId,
    #[serde(default = "default_hover_marker")]
    pub marker: String,
}

/// One pinned region with its timeline content and optional scrub target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinConfig {
    pub id: ElementId,
    /// Page offset of the element's top edge.
    pub element_top: f64,
    pub span: PinSpan,
    #[serde(default)]
    pub content: PinContent,
    #[serde(default)]
    pub scrub: Option<ScrubConfig>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PinContent {
    /// Explicit segment list.
    Segments { segments: Vec<SegmentDef> },
    /// Generated one-line-at-a-time narrative.
    Narrative {
        lines: Vec<ElementId>,
        #[serde(default)]
        options: NarrativeOptions,
    },
}

impl Default for PinContent {
    fn default() -> Self {
        Self::Segments {
            segments: Vec::new(),
        }
    }
}

impl PinContent {
    /// Every element the content animates.
    pub fn targets(&self) -> Vec<&ElementId> {
        match self {
            Self::Segments { segments } => segments.iter().map(|s| &s.target).collect(),
            Self::Narrative { lines, .. } => lines.iter().collect(),
        }
    }

    /// Build runtime segments, keeping only those whose target passes `present`.
    pub fn build_segments(
        &self,
        present: impl Fn(&ElementId) -> bool,
    ) -> ScrollResult<Vec<Segment>> {
        match self {
            Self::Segments { segments } => segments
                .iter()
                .filter(|s| present(&s.target))
                .map(SegmentDef::build)
                .collect(),
            Self::Narrative { lines, options } => {
                let lines: Vec<ElementId> = lines.iter().filter(|l| present(l)).cloned().collect();
                narrative_segments(&lines, options)
            }
        }
    }
}

/// Serialized form of a [`Segment`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentDef {
    pub target: ElementId,
    pub property: Property,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub range: ActiveRange,
    #[serde(default)]
    pub ease: Ease,
}

impl SegmentDef {
    pub fn build(&self) -> ScrollResult<Segment> {
        Ok(Segment::new(
            self.target.clone(),
            self.property,
            self.from,
            self.to,
            self.range,
        )?
        .with_ease(self.ease))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrubConfig {
    /// Resource (video) whose playback position follows the pin's progress.
    pub resource: ElementId,
}

impl SceneConfig {
    pub fn from_json_str(s: &str) -> ScrollResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ScrollError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> ScrollResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            ScrollError::Other(anyhow::Error::new(e).context(format!(
                "read scene config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Page-wide checks only. Per-component problems are reported when the scene is built, so
    /// one bad pin cannot take the rest of the page down.
    pub fn validate(&self) -> ScrollResult<()> {
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(ScrollError::configuration("viewport_height must be > 0"));
        }
        let mut ids = BTreeSet::new();
        for pin in &self.pins {
            if !ids.insert(&pin.id) {
                return Err(ScrollError::configuration(format!(
                    "duplicate pin id '{}'",
                    pin.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
