use crate::{
    foundation::core::{Progress, ScrollOffset},
    foundation::error::{ScrollError, ScrollResult},
};

fn default_viewport_fraction() -> f64 {
    1.0
}

/// How far the page scrolls while a region stays pinned.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PinSpan {
    /// A fixed number of pixels.
    Fixed { px: f64 },
    /// `count × viewport_fraction × viewport height` (e.g. one full screen per narrative line).
    PerSegment {
        count: usize,
        #[serde(default = "default_viewport_fraction")]
        viewport_fraction: f64,
    },
}

impl PinSpan {
    pub fn length(&self, viewport_height: f64) -> ScrollResult<f64> {
        let len = match *self {
            Self::Fixed { px } => px,
            Self::PerSegment {
                count,
                viewport_fraction,
            } => {
                if count == 0 {
                    return Err(ScrollError::configuration(
                        "PerSegment pin span needs count > 0",
                    ));
                }
                if !viewport_height.is_finite() || viewport_height <= 0.0 {
                    return Err(ScrollError::configuration("viewport height must be > 0"));
                }
                count as f64 * viewport_fraction * viewport_height
            }
        };
        if !len.is_finite() || len <= 0.0 {
            return Err(ScrollError::configuration(format!(
                "pin span must be a positive length (got {len})"
            )));
        }
        Ok(len)
    }
}

/// Scroll range `[start, end]` over which a pinned timeline plays. `end > start` always.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TriggerRegion {
    start: f64,
    end: f64,
}

impl TriggerRegion {
    pub fn new(start: f64, end: f64) -> ScrollResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ScrollError::configuration("TriggerRegion bounds must be finite"));
        }
        if end <= start {
            return Err(ScrollError::configuration(format!(
                "TriggerRegion end must be > start (got {start}..{end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Region that starts when the element's top reaches the top of the viewport and lasts for
    /// `span`.
    pub fn from_element(element_top: f64, span: &PinSpan, viewport_height: f64) -> ScrollResult<Self> {
        let len = span.length(viewport_height)?;
        Self::new(element_top, element_top + len)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// `(clamp(offset, start, end) - start) / (end - start)`.
    pub fn progress_for(&self, offset: ScrollOffset) -> Progress {
        let clamped = offset.0.clamp(self.start, self.end);
        Progress::new((clamped - self.start) / self.length())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/region.rs"]
mod tests;
