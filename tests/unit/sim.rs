use super::*;

const INPUT: &str = r#"{
    "scene": {
        "viewport_height": 800,
        "header": { "target": "header" },
        "reveal": { "targets": ["card"] },
        "pins": [
            {
                "id": "story",
                "element_top": 1000,
                "span": { "kind": "per_segment", "count": 2, "viewport_fraction": 1.25 },
                "content": { "kind": "narrative", "lines": ["l0", "l1"] },
                "scrub": { "resource": "video" }
            }
        ]
    },
    "layout": {
        "header": { "top": 0, "height": 80 },
        "card": { "top": 900, "height": 200 },
        "story": { "top": 1000, "height": 800 },
        "l0": { "top": 1200, "height": 40 },
        "l1": { "top": 1200, "height": 40 }
    },
    "videos": { "video": { "duration": 12, "ready_after": 2 } }
}"#;

#[test]
fn extent_covers_pin_region() {
    let input = SimulationInput::from_json_str(INPUT).unwrap();
    assert_eq!(input.extent(), 3000.0);
}

#[test]
fn sweep_includes_both_ends() {
    assert_eq!(sweep(250.0, 100.0).unwrap(), vec![0.0, 100.0, 200.0, 250.0]);
    assert_eq!(sweep(200.0, 100.0).unwrap(), vec![0.0, 100.0, 200.0]);
    assert!(sweep(100.0, 0.0).is_err());
    assert!(sweep(-1.0, 10.0).is_err());
}

#[test]
fn sweep_rejects_excessive_step_counts() {
    let err = sweep(1e6, 1e-15).unwrap_err();
    assert!(matches!(err, ScrollError::Configuration(_)));
    assert!(sweep(1e6, 1e6 / (MAX_SWEEP_STEPS as f64)).is_err());
    assert_eq!(sweep(1e6, 100.0).unwrap().len(), 10_001);
}

#[test]
fn run_steps_through_scene() {
    let input = SimulationInput::from_json_str(INPUT).unwrap();
    let out = run(&input, &[0.0, 500.0, 2000.0, 3000.0, 3000.0]);

    assert_eq!(out.steps.len(), 5);
    assert_eq!(out.steps[0].frame.header, None);
    assert_eq!(out.steps[1].frame.header, Some(crate::Transition::Enter));

    // The card enters the shrunken root once the page scrolls.
    let revealed: Vec<_> = out.steps.iter().flat_map(|s| s.revealed.clone()).collect();
    assert_eq!(revealed, vec![ElementId::from("card")]);

    // Readiness at step 2 derives the position from progress 0.5.
    assert!(out.steps[1].ready.is_empty());
    assert_eq!(
        out.steps[2].ready,
        vec![ReadyEvent {
            resource: ElementId::from("video"),
            position: Some(6.0),
        }]
    );
    assert_eq!(out.steps[3].frame.pins[0].scrub_position, Some(12.0));
    assert!(out.steps[4].ops.is_empty());

    let video = &out.videos[&ElementId::from("video")];
    assert_eq!(video.position, 12.0);
    assert!(!video.has_completion_events());
}

#[test]
fn missing_observer_never_reveals() {
    let mut input = SimulationInput::from_json_str(INPUT).unwrap();
    input.observer_available = false;
    let out = run(&input, &[0.0, 1000.0]);
    assert!(out.steps.iter().all(|s| s.revealed.is_empty()));
    assert!(matches!(
        out.report.reveal,
        crate::PartStatus::Degraded(_)
    ));
}
