use crate::scrub::binding::ScrubResource;

/// Notifications a playing media element would emit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MediaEvent {
    Seeked { position: f64 },
    Ended,
    Looped,
}

/// In-memory stand-in for a video element, for headless runs and tests.
///
/// Starts out the way a background video is usually embedded: playing and looping. Reaching
/// the end while in that mode emits `Looped` (or `Ended` when not looping).
#[derive(Clone, Debug, serde::Serialize)]
pub struct SimulatedVideo {
    pub position: f64,
    pub duration: Option<f64>,
    pub paused: bool,
    pub looping: bool,
    pub events: Vec<MediaEvent>,
}

impl Default for SimulatedVideo {
    fn default() -> Self {
        Self {
            position: 0.0,
            duration: None,
            paused: false,
            looping: true,
            events: Vec::new(),
        }
    }
}

impl SimulatedVideo {
    pub fn new() -> Self {
        Self::default()
    }

    /// A video whose file has a known length; readiness is still signalled separately.
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Metadata arrived; returns the duration to forward as the readiness notification.
    pub fn load_metadata(&mut self, duration: f64) -> f64 {
        self.duration = Some(duration);
        duration
    }

    pub fn has_completion_events(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, MediaEvent::Ended | MediaEvent::Looped))
    }
}

impl ScrubResource for SimulatedVideo {
    fn prepare_for_scrub(&mut self) {
        self.paused = true;
        self.looping = false;
    }

    fn seek(&mut self, position_secs: f64) {
        self.position = position_secs;
        self.events.push(MediaEvent::Seeked {
            position: position_secs,
        });

        let Some(duration) = self.duration else {
            return;
        };
        if self.paused || position_secs < duration {
            return;
        }
        if self.looping {
            self.position = 0.0;
            self.events.push(MediaEvent::Looped);
        } else {
            self.events.push(MediaEvent::Ended);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/video.rs"]
mod tests;
