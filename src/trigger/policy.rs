use crate::{
    foundation::core::{ElementId, Span},
    foundation::error::{ScrollError, ScrollResult},
};

/// CSS `rootMargin`-style insets, in pixels. Positive values grow the root box.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Parse one to four whitespace-separated pixel lengths with CSS shorthand expansion.
    pub fn parse(s: &str) -> ScrollResult<Self> {
        let vals = s
            .split_whitespace()
            .map(parse_px)
            .collect::<ScrollResult<Vec<f64>>>()?;
        match vals.as_slice() {
            [all] => Ok(Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            }),
            [v, h] => Ok(Self {
                top: *v,
                right: *h,
                bottom: *v,
                left: *h,
            }),
            [t, h, b] => Ok(Self {
                top: *t,
                right: *h,
                bottom: *b,
                left: *h,
            }),
            [t, r, b, l] => Ok(Self {
                top: *t,
                right: *r,
                bottom: *b,
                left: *l,
            }),
            _ => Err(ScrollError::configuration(format!(
                "root margin must have 1 to 4 lengths (got '{s}')"
            ))),
        }
    }
}

fn parse_px(tok: &str) -> ScrollResult<f64> {
    let num = tok.strip_suffix("px").unwrap_or(tok);
    let v: f64 = num
        .parse()
        .map_err(|_| ScrollError::configuration(format!("invalid root margin length '{tok}'")))?;
    if !v.is_finite() {
        return Err(ScrollError::configuration(format!(
            "invalid root margin length '{tok}'"
        )));
    }
    Ok(v)
}

impl std::str::FromStr for RootMargin {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Tuning for when an element counts as "in view".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VisibilityPolicy {
    pub root_margin: RootMargin,
    /// Minimum visible fraction of the element, in `[0, 1]`.
    pub visibility_fraction: f64,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            root_margin: RootMargin {
                top: 0.0,
                right: 0.0,
                bottom: -100.0,
                left: 0.0,
            },
            visibility_fraction: 0.1,
        }
    }
}

impl VisibilityPolicy {
    pub fn new(root_margin: RootMargin, visibility_fraction: f64) -> ScrollResult<Self> {
        if !(0.0..=1.0).contains(&visibility_fraction) {
            return Err(ScrollError::configuration(
                "visibility fraction must be within [0, 1]",
            ));
        }
        Ok(Self {
            root_margin,
            visibility_fraction,
        })
    }

    /// Margin-adjusted root box for a viewport.
    pub fn root(&self, viewport: Span) -> Span {
        let top = viewport.top - self.root_margin.top;
        let bottom = viewport.bottom() + self.root_margin.bottom;
        Span {
            top,
            height: (bottom - top).max(0.0),
        }
    }

    /// Intersection record for `element` against `viewport`, the way a platform observer would
    /// report it.
    pub fn intersection(&self, target: ElementId, element: Span, viewport: Span) -> IntersectionEntry {
        let root = self.root(viewport);
        let (is_intersecting, ratio) = if element.height == 0.0 {
            let inside = root.top <= element.top && element.top <= root.bottom();
            (inside, if inside { 1.0 } else { 0.0 })
        } else {
            let ratio = (root.overlap(element) / element.height).clamp(0.0, 1.0);
            (ratio > 0.0, ratio)
        };
        IntersectionEntry {
            target,
            is_intersecting,
            ratio,
        }
    }

    /// Whether an entry satisfies this policy.
    pub fn admits(&self, entry: &IntersectionEntry) -> bool {
        entry.is_intersecting && entry.ratio >= self.visibility_fraction
    }
}

/// One intersection-change notification from the visibility observer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/policy.rs"]
mod tests;
