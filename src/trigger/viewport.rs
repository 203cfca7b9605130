use std::collections::BTreeSet;

use crate::{
    foundation::core::{ElementId, Targets},
    trigger::policy::{IntersectionEntry, VisibilityPolicy},
};

/// Platform visibility primitive (an `IntersectionObserver` in a browser).
pub trait VisibilityObserver {
    /// Start reporting intersection changes for `target`.
    fn observe(&mut self, target: &ElementId);
    /// Stop reporting for `target`.
    fn unobserve(&mut self, target: &ElementId);
}

/// What the trigger is doing after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerStatus {
    /// Observing at least one element that has not been revealed yet.
    Watching,
    /// Nothing to watch: empty or absent target set, or every element already revealed.
    Idle,
    /// The platform observer is unavailable; pending elements are only revealed through
    /// [`ViewportTrigger::reveal_all`].
    Inert,
}

/// One-shot reveal detector over a fixed set of elements.
///
/// Each element is reported at most once. Observation of an element stops the moment it is
/// reported, so re-entering the viewport never fires again.
pub struct ViewportTrigger<O> {
    policy: VisibilityPolicy,
    observer: Option<O>,
    pending: BTreeSet<ElementId>,
    revealed: BTreeSet<ElementId>,
}

impl<O: VisibilityObserver> ViewportTrigger<O> {
    pub fn new(targets: Targets, policy: VisibilityPolicy, observer: Option<O>) -> Self {
        let ids = match targets {
            Targets::Present(ids) => ids,
            Targets::Absent => Vec::new(),
        };

        let mut trigger = Self {
            policy,
            observer,
            pending: BTreeSet::new(),
            revealed: BTreeSet::new(),
        };

        for id in ids {
            if !trigger.pending.insert(id.clone()) {
                continue;
            }
            if let Some(observer) = trigger.observer.as_mut() {
                observer.observe(&id);
            }
        }

        if trigger.observer.is_none() && !trigger.pending.is_empty() {
            tracing::warn!(
                elements = trigger.pending.len(),
                "visibility observer unavailable; viewport trigger is inert"
            );
        }
        trigger
    }

    pub fn status(&self) -> TriggerStatus {
        if self.pending.is_empty() {
            TriggerStatus::Idle
        } else if self.observer.is_none() {
            TriggerStatus::Inert
        } else {
            TriggerStatus::Watching
        }
    }

    pub fn policy(&self) -> &VisibilityPolicy {
        &self.policy
    }

    pub fn observer(&self) -> Option<&O> {
        self.observer.as_ref()
    }

    pub fn is_revealed(&self, id: &ElementId) -> bool {
        self.revealed.contains(id)
    }

    pub fn pending(&self) -> impl Iterator<Item = &ElementId> {
        self.pending.iter()
    }

    /// Process a batch of intersection changes; returns the elements revealed by this batch, in
    /// batch order.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<ElementId> {
        let mut out = Vec::new();
        let Some(observer) = self.observer.as_mut() else {
            return out;
        };

        for entry in entries {
            if !self.policy.admits(entry) {
                continue;
            }
            if !self.pending.remove(&entry.target) {
                continue;
            }
            observer.unobserve(&entry.target);
            self.revealed.insert(entry.target.clone());
            out.push(entry.target.clone());
        }
        out
    }

    /// Degraded policy for callers that want content visible when observation is impossible:
    /// marks every pending element revealed and returns it.
    pub fn reveal_all(&mut self) -> Vec<ElementId> {
        let pending = std::mem::take(&mut self.pending);
        let mut out = Vec::with_capacity(pending.len());
        for id in pending {
            if let Some(observer) = self.observer.as_mut() {
                observer.unobserve(&id);
            }
            self.revealed.insert(id.clone());
            out.push(id);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/viewport.rs"]
mod tests;
