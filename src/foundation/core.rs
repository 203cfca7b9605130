use crate::foundation::error::{ScrollError, ScrollResult};

pub use kurbo::Vec2;

/// Vertical distance scrolled from the top of the page, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ScrollOffset(pub f64);

impl From<f64> for ScrollOffset {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// Normalized playback position in `[0, 1]`.
///
/// Construction always clamps, and NaN collapses to `0`, so a `Progress` can never leave the
/// unit interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Start of the timeline.
    pub const START: Self = Self(0.0);
    /// End of the timeline.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::START;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Raw value in `[0, 1]`.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl<'de> serde::Deserialize<'de> for Progress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

/// Identifier of a page element or resource handed to the engine by the embedder.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for ElementId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An already-resolved element collection, or the explicit absence of one.
///
/// Components never query the page themselves; the embedder resolves elements up front and
/// hands over either the collection or `Absent`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Targets {
    /// Elements found in the page (possibly none).
    Present(Vec<ElementId>),
    /// The collection does not exist in this page.
    #[default]
    Absent,
}

impl Targets {
    /// True when there is nothing to act on.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Present(ids) => ids.is_empty(),
            Self::Absent => true,
        }
    }
}

impl From<Vec<ElementId>> for Targets {
    fn from(ids: Vec<ElementId>) -> Self {
        Self::Present(ids)
    }
}

/// Vertical extent of an element in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> ScrollResult<Self> {
        if !top.is_finite() || !height.is_finite() {
            return Err(ScrollError::configuration("Span values must be finite"));
        }
        if height < 0.0 {
            return Err(ScrollError::configuration("Span height must be >= 0"));
        }
        Ok(Self { top, height })
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Length of the overlap between two spans (`0` when disjoint).
    pub fn overlap(self, other: Span) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
