use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::core::{ElementId, ScrollOffset, Span},
    trigger::policy::{IntersectionEntry, VisibilityPolicy},
    trigger::viewport::VisibilityObserver,
};

/// Headless [`VisibilityObserver`] that derives intersections from known element spans.
///
/// Unlike a browser observer it does not push notifications; the embedder polls it after each
/// scroll and forwards the entries to the trigger.
#[derive(Clone, Debug)]
pub struct GeometryObserver {
    policy: VisibilityPolicy,
    viewport_height: f64,
    layout: BTreeMap<ElementId, Span>,
    observed: BTreeSet<ElementId>,
}

impl GeometryObserver {
    pub fn new(
        policy: VisibilityPolicy,
        viewport_height: f64,
        layout: BTreeMap<ElementId, Span>,
    ) -> Self {
        Self {
            policy,
            viewport_height,
            layout,
            observed: BTreeSet::new(),
        }
    }

    pub fn is_observing(&self, id: &ElementId) -> bool {
        self.observed.contains(id)
    }

    /// Intersection entries for every observed element at `offset`.
    pub fn poll(&self, offset: ScrollOffset) -> Vec<IntersectionEntry> {
        let viewport = Span {
            top: offset.0,
            height: self.viewport_height,
        };
        self.observed
            .iter()
            .filter_map(|id| {
                let span = self.layout.get(id)?;
                Some(self.policy.intersection(id.clone(), *span, viewport))
            })
            .collect()
    }
}

impl VisibilityObserver for GeometryObserver {
    fn observe(&mut self, target: &ElementId) {
        if !self.layout.contains_key(target) {
            tracing::warn!(element = %target, "no layout for observed element");
        }
        self.observed.insert(target.clone());
    }

    fn unobserve(&mut self, target: &ElementId) {
        self.observed.remove(target);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/geometry.rs"]
mod tests;
