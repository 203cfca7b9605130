use crate::{
    animation::ease::Ease,
    animation::value::{Lerp, Property, PropertyValue, ValueKind},
    foundation::core::{ElementId, Progress, Vec2},
    foundation::error::{ScrollError, ScrollResult},
};

/// Window `[start, end]` of timeline-normalized time during which a segment is active.
///
/// Serialized as a two-element array. Validity (`0 <= start < end <= 1`) is checked when the
/// owning timeline is built, not here.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ActiveRange {
    pub start: f64,
    pub end: f64,
}

impl ActiveRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn validate(self) -> ScrollResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ScrollError::configuration("ActiveRange bounds must be finite"));
        }
        if self.end <= self.start {
            return Err(ScrollError::configuration(format!(
                "ActiveRange end must be > start (got [{}, {}])",
                self.start, self.end
            )));
        }
        if self.start < 0.0 || self.end > 1.0 {
            return Err(ScrollError::configuration(format!(
                "ActiveRange must lie within [0, 1] (got [{}, {}])",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Inclusive at both ends, so a shared boundary activates both neighbours.
    pub fn contains(self, p: Progress) -> bool {
        self.start <= p.get() && p.get() <= self.end
    }

    /// Local interpolation fraction of `p` inside this range, clamped to `[0, 1]`.
    pub fn local_fraction(self, p: Progress) -> f64 {
        ((p.get() - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

impl From<[f64; 2]> for ActiveRange {
    fn from([start, end]: [f64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<ActiveRange> for [f64; 2] {
    fn from(r: ActiveRange) -> Self {
        [r.start, r.end]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tween {
    Scalar { from: f64, to: f64 },
    Vec2 { from: Vec2, to: Vec2 },
}

impl Tween {
    fn at(self, t: f64) -> PropertyValue {
        match self {
            Self::Scalar { from, to } => PropertyValue::Scalar(<f64 as Lerp>::lerp(&from, &to, t)),
            Self::Vec2 { from, to } => PropertyValue::Vec2(<Vec2 as Lerp>::lerp(&from, &to, t)),
        }
    }
}

/// One bounded animation step: drives `property` on `target` from `from` to `to` while the
/// timeline is inside `range`.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    target: ElementId,
    property: Property,
    tween: Tween,
    range: ActiveRange,
    ease: Ease,
}

impl Segment {
    /// Build a segment from loosely typed values; the value kind must match the property.
    pub fn new(
        target: impl Into<ElementId>,
        property: Property,
        from: PropertyValue,
        to: PropertyValue,
        range: ActiveRange,
    ) -> ScrollResult<Self> {
        let target = target.into();
        if !from.is_finite() || !to.is_finite() {
            return Err(ScrollError::configuration(format!(
                "segment '{target}.{}' has non-finite values",
                property.name()
            )));
        }
        let tween = match (property.kind(), from, to) {
            (ValueKind::Scalar, PropertyValue::Scalar(from), PropertyValue::Scalar(to)) => {
                Tween::Scalar { from, to }
            }
            (ValueKind::Vec2, PropertyValue::Vec2(from), PropertyValue::Vec2(to)) => {
                Tween::Vec2 { from, to }
            }
            _ => {
                return Err(ScrollError::configuration(format!(
                    "segment '{target}.{}' values do not match the property kind",
                    property.name()
                )));
            }
        };
        Ok(Self {
            target,
            property,
            tween,
            range,
            ease: Ease::Linear,
        })
    }

    /// Segment from plain numbers. On a vector property (`translate`) both axes move together
    /// from `(from, from)` to `(to, to)`; use [`Segment::new`] for independent axes.
    pub fn scalar(
        target: impl Into<ElementId>,
        property: Property,
        from: f64,
        to: f64,
        range: ActiveRange,
    ) -> Self {
        let tween = match property.kind() {
            ValueKind::Scalar => Tween::Scalar { from, to },
            ValueKind::Vec2 => Tween::Vec2 {
                from: Vec2::new(from, from),
                to: Vec2::new(to, to),
            },
        };
        Self {
            target: target.into(),
            property,
            tween,
            range,
            ease: Ease::Linear,
        }
    }

    pub fn opacity(target: impl Into<ElementId>, from: f64, to: f64, range: ActiveRange) -> Self {
        Self::scalar(target, Property::Opacity, from, to, range)
    }

    pub fn translate_y(
        target: impl Into<ElementId>,
        from: f64,
        to: f64,
        range: ActiveRange,
    ) -> Self {
        Self::scalar(target, Property::TranslateY, from, to, range)
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn target(&self) -> &ElementId {
        &self.target
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn range(&self) -> ActiveRange {
        self.range
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn from_value(&self) -> PropertyValue {
        self.tween.at(0.0)
    }

    pub fn to_value(&self) -> PropertyValue {
        self.tween.at(1.0)
    }

    /// Value at timeline progress `p`, after easing the local fraction. Outside the range the
    /// nearest boundary value is returned; there is no extrapolation.
    pub fn value_at(&self, p: Progress) -> PropertyValue {
        let t = self.range.local_fraction(p);
        self.tween.at(self.ease.apply(t))
    }

    pub(crate) fn applied(&self, value: PropertyValue) -> AppliedValue {
        AppliedValue {
            target: self.target.clone(),
            property: self.property,
            value,
        }
    }
}

/// A `(target, property, value)` triple for the embedder to apply.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AppliedValue {
    pub target: ElementId,
    pub property: Property,
    pub value: PropertyValue,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/segment.rs"]
mod tests;
