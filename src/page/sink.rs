use crate::{
    animation::segment::AppliedValue,
    foundation::core::ElementId,
    timeline::pinned::PinState,
};

/// Where computed visual state goes (the DOM in a browser).
///
/// A sink gets no handle back into the scene, so applying values cannot feed a scroll event
/// back into the engine.
pub trait ElementSink {
    fn apply(&mut self, value: &AppliedValue);
    fn add_marker(&mut self, target: &ElementId, marker: &str);
    fn remove_marker(&mut self, target: &ElementId, marker: &str);
    fn set_pin(&mut self, target: &ElementId, pin: PinState);
}

/// One call made on a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SinkOp {
    Apply(AppliedValue),
    AddMarker { target: ElementId, marker: String },
    RemoveMarker { target: ElementId, marker: String },
    SetPin { target: ElementId, pin: PinState },
}

/// Sink that records every call in order.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct RecordingSink {
    pub ops: Vec<SinkOp>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<SinkOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn markers_added(&self, marker: &str) -> Vec<&ElementId> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SinkOp::AddMarker { target, marker: m } if m == marker => Some(target),
                _ => None,
            })
            .collect()
    }
}

impl ElementSink for RecordingSink {
    fn apply(&mut self, value: &AppliedValue) {
        self.ops.push(SinkOp::Apply(value.clone()));
    }

    fn add_marker(&mut self, target: &ElementId, marker: &str) {
        self.ops.push(SinkOp::AddMarker {
            target: target.clone(),
            marker: marker.to_owned(),
        });
    }

    fn remove_marker(&mut self, target: &ElementId, marker: &str) {
        self.ops.push(SinkOp::RemoveMarker {
            target: target.clone(),
            marker: marker.to_owned(),
        });
    }

    fn set_pin(&mut self, target: &ElementId, pin: PinState) {
        self.ops.push(SinkOp::SetPin {
            target: target.clone(),
            pin,
        });
    }
}
