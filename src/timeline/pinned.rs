use crate::{
    animation::segment::{AppliedValue, Segment},
    animation::value::Property,
    foundation::core::{ElementId, Progress, ScrollOffset},
    foundation::error::{ScrollError, ScrollResult},
    timeline::region::TriggerRegion,
};

/// Where a pinned region sits relative to the viewport for a given scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PinState {
    /// Region has not been reached; it scrolls normally.
    Before,
    /// Region is frozen in the viewport. `shift` is the translation that cancels the scroll
    /// distance travelled since pinning started.
    Pinned { shift: f64 },
    /// Region has been released and scrolls normally again, displaced by the full pin length.
    After { shift: f64 },
}

impl PinState {
    pub fn is_pinned(self) -> bool {
        matches!(self, Self::Pinned { .. })
    }
}

/// Everything a pinned timeline derives from one scroll offset.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineSample {
    pub progress: Progress,
    pub pin: PinState,
    pub values: Vec<AppliedValue>,
}

// All segments driving the same (target, property), ordered by range start.
#[derive(Clone, Debug)]
struct Channel {
    target: ElementId,
    property: Property,
    segments: Vec<usize>,
}

/// Sequencing core: maps scroll offset to progress through a [`TriggerRegion`] and progress to
/// segment values.
///
/// Every output is a pure function of the scroll offset, so scrolling backward exactly reverses
/// forward progress.
#[derive(Clone, Debug)]
pub struct PinnedTimeline {
    region: TriggerRegion,
    segments: Vec<Segment>,
    channels: Vec<Channel>,
}

impl PinnedTimeline {
    pub fn new(region: TriggerRegion, segments: Vec<Segment>) -> ScrollResult<Self> {
        for (i, seg) in segments.iter().enumerate() {
            let checked = seg.range().validate().and_then(|()| {
                if seg.from_value().is_finite() && seg.to_value().is_finite() {
                    Ok(())
                } else {
                    Err(ScrollError::configuration("values must be finite"))
                }
            });
            match checked {
                Ok(()) => {}
                Err(ScrollError::Configuration(msg)) => {
                    return Err(ScrollError::configuration(format!(
                        "segment #{i} on '{}.{}': {msg}",
                        seg.target(),
                        seg.property().name()
                    )));
                }
                Err(err) => return Err(err),
            }
        }

        let mut channels: Vec<Channel> = Vec::new();
        for (i, seg) in segments.iter().enumerate() {
            match channels
                .iter_mut()
                .find(|c| &c.target == seg.target() && c.property == seg.property())
            {
                Some(ch) => ch.segments.push(i),
                None => channels.push(Channel {
                    target: seg.target().clone(),
                    property: seg.property(),
                    segments: vec![i],
                }),
            }
        }
        for ch in &mut channels {
            ch.segments
                .sort_by(|&a, &b| segments[a].range().start.total_cmp(&segments[b].range().start));
        }

        Ok(Self {
            region,
            segments,
            channels,
        })
    }

    pub fn region(&self) -> &TriggerRegion {
        &self.region
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn progress_for(&self, offset: ScrollOffset) -> Progress {
        self.region.progress_for(offset)
    }

    /// Pinned while `offset` is within `[start, end)`.
    pub fn pin_state(&self, offset: ScrollOffset) -> PinState {
        let o = offset.0;
        if o.is_nan() || o < self.region.start() {
            PinState::Before
        } else if o < self.region.end() {
            PinState::Pinned {
                shift: o - self.region.start(),
            }
        } else {
            PinState::After {
                shift: self.region.length(),
            }
        }
    }

    /// Values of every segment whose range contains `progress`, in segment order.
    ///
    /// At a shared boundary both neighbours are reported: the outgoing one at its own end value
    /// and the incoming one at its own start value.
    pub fn apply_segments(&self, progress: Progress) -> Vec<AppliedValue> {
        self.segments
            .iter()
            .filter(|s| s.range().contains(progress))
            .map(|s| s.applied(s.value_at(progress)))
            .collect()
    }

    /// Held values for channels with no active segment at `progress`: the end value of the
    /// latest finished segment, or the start value of the first one if none has started.
    pub fn settled_values(&self, progress: Progress) -> Vec<AppliedValue> {
        self.channels
            .iter()
            .filter(|ch| !self.channel_active(ch, progress))
            .filter_map(|ch| self.settled(ch, progress))
            .collect()
    }

    /// Complete state at `progress`: active values where a segment runs, held values elsewhere.
    /// Ordered by channel (first appearance in the segment list).
    pub fn values_at(&self, progress: Progress) -> Vec<AppliedValue> {
        let mut out = Vec::with_capacity(self.channels.len());
        for ch in &self.channels {
            if self.channel_active(ch, progress) {
                for &i in &ch.segments {
                    let s = &self.segments[i];
                    if s.range().contains(progress) {
                        out.push(s.applied(s.value_at(progress)));
                    }
                }
            } else if let Some(v) = self.settled(ch, progress) {
                out.push(v);
            }
        }
        out
    }

    pub fn sample(&self, offset: ScrollOffset) -> TimelineSample {
        let progress = self.progress_for(offset);
        TimelineSample {
            progress,
            pin: self.pin_state(offset),
            values: self.values_at(progress),
        }
    }

    fn channel_active(&self, ch: &Channel, progress: Progress) -> bool {
        ch.segments
            .iter()
            .any(|&i| self.segments[i].range().contains(progress))
    }

    fn settled(&self, ch: &Channel, progress: Progress) -> Option<AppliedValue> {
        let p = progress.get();
        let finished = ch
            .segments
            .iter()
            .map(|&i| &self.segments[i])
            .filter(|s| s.range().end < p)
            .max_by(|a, b| a.range().end.total_cmp(&b.range().end));
        if let Some(s) = finished {
            return Some(s.applied(s.to_value()));
        }
        let first = &self.segments[*ch.segments.first()?];
        Some(first.applied(first.from_value()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/pinned.rs"]
mod tests;
