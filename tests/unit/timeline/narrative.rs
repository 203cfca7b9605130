use super::*;
use crate::animation::value::Property;
use crate::foundation::core::Progress;
use crate::timeline::pinned::PinnedTimeline;
use crate::timeline::region::TriggerRegion;

fn lines(n: usize) -> Vec<ElementId> {
    (0..n).map(|i| ElementId::from(format!("line-{i}"))).collect()
}

fn timeline(n: usize, opts: &NarrativeOptions) -> PinnedTimeline {
    let region = TriggerRegion::new(0.0, 3000.0).unwrap();
    PinnedTimeline::new(region, narrative_segments(&lines(n), opts).unwrap()).unwrap()
}

fn opacity_of(values: &[crate::animation::segment::AppliedValue], line: &str) -> Vec<f64> {
    values
        .iter()
        .filter(|v| v.target == ElementId::from(line) && v.property == Property::Opacity)
        .filter_map(|v| v.value.as_scalar())
        .collect()
}

#[test]
fn builds_fade_in_and_out_per_line() {
    let segs = narrative_segments(&lines(3), &NarrativeOptions::default()).unwrap();
    // 3 fade-ins + 2 fade-outs, each driving opacity and translate.
    assert_eq!(segs.len(), 10);
    for s in &segs {
        s.range().validate().unwrap();
    }
}

#[test]
fn zero_overlap_boundary_is_settled_on_both_sides() {
    let tl = timeline(3, &NarrativeOptions::default());
    let boundary = Progress::new(1.0 / 3.0);
    let values = tl.apply_segments(boundary);

    assert_eq!(opacity_of(&values, "line-0"), vec![0.0]);
    assert_eq!(opacity_of(&values, "line-1"), vec![0.0]);
    for v in &values {
        if v.property == Property::TranslateY {
            let y = v.value.as_scalar().unwrap();
            assert!(y == -40.0 || y == 40.0, "unexpected partial value {y}");
        }
    }
}

#[test]
fn overlap_runs_fades_concurrently() {
    let opts = NarrativeOptions {
        overlap: 0.1,
        ..NarrativeOptions::default()
    };
    let tl = timeline(2, &opts);
    // Slot width 0.5: line-0 fades out over [0.425, 0.55], line-1 fades in over [0.5, 0.625].
    let values = tl.apply_segments(Progress::new(0.52));
    assert_eq!(opacity_of(&values, "line-0").len(), 1);
    assert_eq!(opacity_of(&values, "line-1").len(), 1);
}

#[test]
fn endpoints_never_extrapolate() {
    let tl = timeline(3, &NarrativeOptions::default());
    let start = tl.values_at(Progress::START);
    assert_eq!(opacity_of(&start, "line-0"), vec![0.0]);
    assert_eq!(opacity_of(&start, "line-2"), vec![0.0]);

    let end = tl.values_at(Progress::END);
    assert_eq!(opacity_of(&end, "line-0"), vec![0.0]);
    assert_eq!(opacity_of(&end, "line-1"), vec![0.0]);
    assert_eq!(opacity_of(&end, "line-2"), vec![1.0]);
}

#[test]
fn middle_of_slot_holds_line_fully_visible() {
    let tl = timeline(3, &NarrativeOptions::default());
    let values = tl.values_at(Progress::new(0.5));
    assert_eq!(opacity_of(&values, "line-1"), vec![1.0]);
    assert_eq!(opacity_of(&values, "line-0"), vec![0.0]);
    assert_eq!(opacity_of(&values, "line-2"), vec![0.0]);
}

#[test]
fn rejects_bad_options_and_empty_lines() {
    assert!(narrative_segments(&[], &NarrativeOptions::default()).is_err());
    let bad_fade = NarrativeOptions {
        fade: 0.6,
        ..NarrativeOptions::default()
    };
    assert!(narrative_segments(&lines(2), &bad_fade).is_err());
    let bad_overlap = NarrativeOptions {
        overlap: 0.3,
        ..NarrativeOptions::default()
    };
    assert!(narrative_segments(&lines(2), &bad_overlap).is_err());
    let full_overlap = NarrativeOptions {
        overlap: 0.25,
        ..NarrativeOptions::default()
    };
    assert!(narrative_segments(&lines(2), &full_overlap).is_ok());
}
