use super::*;
use crate::animation::segment::ActiveRange;
use crate::animation::value::PropertyValue;

fn region() -> TriggerRegion {
    TriggerRegion::new(1000.0, 3000.0).unwrap()
}

fn two_halves() -> PinnedTimeline {
    PinnedTimeline::new(
        region(),
        vec![
            Segment::opacity("a", 0.0, 1.0, ActiveRange::new(0.0, 0.5)),
            Segment::opacity("b", 0.0, 1.0, ActiveRange::new(0.5, 1.0)),
        ],
    )
    .unwrap()
}

fn scalar(v: &AppliedValue) -> f64 {
    v.value.as_scalar().unwrap()
}

#[test]
fn shared_boundary_applies_both_settled_values() {
    let tl = two_halves();
    let values = tl.apply_segments(Progress::new(0.5));
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].target, ElementId::from("a"));
    assert_eq!(values[0].value, PropertyValue::Scalar(1.0));
    assert_eq!(values[1].target, ElementId::from("b"));
    assert_eq!(values[1].value, PropertyValue::Scalar(0.0));
}

#[test]
fn progress_endpoints_select_boundary_values() {
    let tl = two_halves();
    let start = tl.apply_segments(Progress::START);
    assert_eq!(start.len(), 1);
    assert_eq!(scalar(&start[0]), 0.0);

    let end = tl.apply_segments(Progress::END);
    assert_eq!(end.len(), 1);
    assert_eq!(end[0].target, ElementId::from("b"));
    assert_eq!(scalar(&end[0]), 1.0);
}

#[test]
fn overlapping_segments_are_both_active() {
    let tl = PinnedTimeline::new(
        region(),
        vec![
            Segment::opacity("line-1", 1.0, 0.0, ActiveRange::new(0.4, 0.6)),
            Segment::opacity("line-2", 0.0, 1.0, ActiveRange::new(0.5, 0.7)),
        ],
    )
    .unwrap();
    let values = tl.apply_segments(Progress::new(0.55));
    assert_eq!(values.len(), 2);
    assert!((scalar(&values[0]) - 0.25).abs() < 1e-9);
    assert!((scalar(&values[1]) - 0.25).abs() < 1e-9);
}

#[test]
fn invalid_segment_range_fails_construction() {
    let err = PinnedTimeline::new(
        region(),
        vec![
            Segment::opacity("ok", 0.0, 1.0, ActiveRange::new(0.0, 0.5)),
            Segment::opacity("bad", 0.0, 1.0, ActiveRange::new(0.5, 0.5)),
        ],
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("configuration error:"));
    assert!(msg.contains("segment #1 on 'bad.opacity'"));
}

#[test]
fn non_finite_segment_values_fail_construction() {
    for (from, to) in [(f64::NAN, 1.0), (0.0, f64::INFINITY)] {
        let err = PinnedTimeline::new(
            region(),
            vec![Segment::opacity("a", from, to, ActiveRange::new(0.0, 1.0))],
        )
        .unwrap_err();
        assert!(matches!(err, ScrollError::Configuration(_)));
        assert!(err.to_string().contains("segment #0 on 'a.opacity'"));
    }
}

#[test]
fn empty_segment_list_is_allowed() {
    let tl = PinnedTimeline::new(region(), vec![]).unwrap();
    assert!(tl.values_at(Progress::new(0.3)).is_empty());
}

#[test]
fn pin_state_tracks_region() {
    let tl = two_halves();
    assert_eq!(tl.pin_state(ScrollOffset(999.0)), PinState::Before);
    assert_eq!(
        tl.pin_state(ScrollOffset(1000.0)),
        PinState::Pinned { shift: 0.0 }
    );
    assert_eq!(
        tl.pin_state(ScrollOffset(2500.0)),
        PinState::Pinned { shift: 1500.0 }
    );
    assert_eq!(
        tl.pin_state(ScrollOffset(3000.0)),
        PinState::After { shift: 2000.0 }
    );
    assert_eq!(tl.pin_state(ScrollOffset(f64::NAN)), PinState::Before);
}

#[test]
fn settled_values_hold_last_finished_or_first_pending() {
    let tl = PinnedTimeline::new(
        region(),
        vec![
            Segment::opacity("line", 0.0, 1.0, ActiveRange::new(0.1, 0.2)),
            Segment::opacity("line", 1.0, 0.0, ActiveRange::new(0.6, 0.7)),
            Segment::opacity("other", 0.0, 1.0, ActiveRange::new(0.3, 0.4)),
        ],
    )
    .unwrap();

    // Before anything started: the first segment's start value per channel.
    let v = tl.settled_values(Progress::new(0.05));
    assert_eq!(v.len(), 2);
    assert_eq!(scalar(&v[0]), 0.0);
    assert_eq!(scalar(&v[1]), 0.0);

    // Between the fade-in and fade-out of `line`: held at fully visible.
    let v = tl.settled_values(Progress::new(0.5));
    assert_eq!(v[0].target, ElementId::from("line"));
    assert_eq!(scalar(&v[0]), 1.0);
    assert_eq!(scalar(&v[1]), 1.0);

    // Active channels are not part of the settled set.
    let v = tl.settled_values(Progress::new(0.15));
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].target, ElementId::from("other"));

    // After everything finished.
    let v = tl.settled_values(Progress::END);
    assert_eq!(scalar(&v[0]), 0.0);
}

#[test]
fn values_at_reverses_exactly_when_scrolling_back() {
    let tl = two_halves();
    let offsets = [1000.0, 1400.0, 2000.0, 2600.0, 3000.0];
    let forward: Vec<_> = offsets.iter().map(|&o| tl.sample(ScrollOffset(o))).collect();
    let backward: Vec<_> = offsets
        .iter()
        .rev()
        .map(|&o| tl.sample(ScrollOffset(o)))
        .collect();
    for (f, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(f, b);
    }
}

#[test]
fn values_at_covers_every_channel() {
    let tl = two_halves();
    let v = tl.values_at(Progress::new(0.25));
    assert_eq!(v.len(), 2);
    assert_eq!(scalar(&v[0]), 0.5);
    assert_eq!(scalar(&v[1]), 0.0);
}
