use crate::foundation::core::Progress;

/// A continuous resource whose position can be scrubbed (a `<video>` element in a browser).
pub trait ScrubResource {
    /// Called once, when the binding becomes live: stop normal playback and disable anything
    /// that reacts to reaching the end (looping, completion events).
    fn prepare_for_scrub(&mut self);
    /// Jump to `position_secs`, already clamped to `[0, duration]`.
    fn seek(&mut self, position_secs: f64);
}

/// Binding state. Moves from `Unbound` to `Bound` at most once and never back.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScrubTarget {
    #[default]
    Unbound,
    Bound { duration: f64 },
}

/// Couples timeline progress to a resource's playback position.
///
/// Progress received before the resource reports its duration is dropped, not buffered: on
/// readiness the position is derived from the progress current at that moment.
#[derive(Debug)]
pub struct ScrubBinding<R> {
    resource: R,
    target: ScrubTarget,
}

impl<R: ScrubResource> ScrubBinding<R> {
    pub fn bind(resource: R) -> Self {
        Self {
            resource,
            target: ScrubTarget::Unbound,
        }
    }

    pub fn target(&self) -> ScrubTarget {
        self.target
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.target, ScrubTarget::Bound { .. })
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn into_resource(self) -> R {
        self.resource
    }

    /// One-time readiness notification. Returns the applied position, or `None` when the call
    /// is a repeat or the duration is unusable (the binding then stays inert).
    pub fn on_ready(&mut self, duration: f64, current: Progress) -> Option<f64> {
        if self.is_bound() {
            tracing::trace!("scrub resource reported readiness twice; ignoring");
            return None;
        }
        if !duration.is_finite() || duration <= 0.0 {
            tracing::warn!(duration, "scrub resource reported unusable duration; staying inert");
            return None;
        }

        self.target = ScrubTarget::Bound { duration };
        self.resource.prepare_for_scrub();
        tracing::debug!(duration, progress = current.get(), "scrub binding live");
        Some(self.seek(duration, current))
    }

    /// Re-apply `progress * duration`. No-op while unbound.
    pub fn on_progress(&mut self, progress: Progress) -> Option<f64> {
        let ScrubTarget::Bound { duration } = self.target else {
            return None;
        };
        Some(self.seek(duration, progress))
    }

    fn seek(&mut self, duration: f64, progress: Progress) -> f64 {
        let position = (progress.get() * duration).clamp(0.0, duration);
        self.resource.seek(position);
        position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/binding.rs"]
mod tests;
