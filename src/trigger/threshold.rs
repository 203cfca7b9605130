use crate::foundation::core::ScrollOffset;

/// Side of the threshold the scroll offset was last seen on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdState {
    #[default]
    Below,
    Above,
}

/// A verified threshold crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Offset moved strictly past the threshold.
    Enter,
    /// Offset moved back to or below the threshold.
    Leave,
}

/// Two-state switch over a continuous scroll signal (e.g. the header "scrolled" marker).
///
/// The state only changes on a crossing, so repeated updates on the same side never produce a
/// transition.
#[derive(Clone, Debug)]
pub struct ThresholdSwitch {
    threshold: f64,
    state: ThresholdState,
}

impl ThresholdSwitch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: ThresholdState::Below,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn state(&self) -> ThresholdState {
        self.state
    }

    pub fn update(&mut self, offset: ScrollOffset) -> Option<Transition> {
        let above = offset.0 > self.threshold;
        match (self.state, above) {
            (ThresholdState::Below, true) => {
                self.state = ThresholdState::Above;
                tracing::debug!(offset = offset.0, "threshold enter");
                Some(Transition::Enter)
            }
            (ThresholdState::Above, false) => {
                self.state = ThresholdState::Below;
                tracing::debug!(offset = offset.0, "threshold leave");
                Some(Transition::Leave)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/threshold.rs"]
mod tests;
