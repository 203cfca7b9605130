use super::*;

const MINIMAL: &str = r#"{ "viewport_height": 800 }"#;

#[test]
fn minimal_config_has_no_components() {
    let cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    assert!(cfg.header.is_none());
    assert!(cfg.reveal.is_none());
    assert!(cfg.pins.is_empty());
}

#[test]
fn defaults_match_production_values() {
    let cfg = SceneConfig::from_json_str(
        r#"{
            "viewport_height": 800,
            "header": { "target": "main-header" },
            "reveal": { "targets": ["a", "b"] }
        }"#,
    )
    .unwrap();

    let header = cfg.header.unwrap();
    assert_eq!(header.threshold, 50.0);
    assert_eq!(header.marker, "scrolled");

    let reveal = cfg.reveal.unwrap();
    assert_eq!(reveal.marker, "is-visible");
    assert_eq!(reveal.fallback, RevealFallback::None);
    assert_eq!(reveal.policy().unwrap(), VisibilityPolicy::default());
}

#[test]
fn pin_content_variants_parse() {
    let cfg = SceneConfig::from_json_str(
        r#"{
            "viewport_height": 800,
            "pins": [
                {
                    "id": "story",
                    "element_top": 1200,
                    "span": { "kind": "per_segment", "count": 3 },
                    "content": { "kind": "narrative", "lines": ["l0", "l1", "l2"] },
                    "scrub": { "resource": "bg-video" }
                },
                {
                    "id": "hero",
                    "element_top": 0,
                    "span": { "kind": "fixed", "px": 2000 },
                    "content": {
                        "kind": "segments",
                        "segments": [
                            { "target": "title", "property": "opacity", "from": 1, "to": 0, "range": [0, 0.5] },
                            { "target": "title", "property": "translate", "from": {"x": 0, "y": 0}, "to": {"x": 0, "y": -80}, "range": [0, 1], "ease": "out_cubic" }
                        ]
                    }
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.pins.len(), 2);
    let narrative = cfg.pins[0].content.build_segments(|_| true).unwrap();
    assert_eq!(narrative.len(), 10);

    let hero = cfg.pins[1].content.build_segments(|_| true).unwrap();
    assert_eq!(hero.len(), 2);
    assert_eq!(hero[1].ease(), Ease::OutCubic);
}

#[test]
fn build_segments_skips_absent_targets() {
    let content = PinContent::Narrative {
        lines: vec!["l0".into(), "missing".into(), "l2".into()],
        options: NarrativeOptions::default(),
    };
    let segs = content
        .build_segments(|id| id.as_str() != "missing")
        .unwrap();
    assert!(segs.iter().all(|s| s.target().as_str() != "missing"));
}

#[test]
fn mismatched_segment_value_is_configuration_error() {
    let def = SegmentDef {
        target: "t".into(),
        property: Property::Opacity,
        from: PropertyValue::Vec2(kurbo::Vec2::ZERO),
        to: PropertyValue::Scalar(1.0),
        range: ActiveRange::new(0.0, 1.0),
        ease: Ease::Linear,
    };
    assert!(matches!(def.build(), Err(ScrollError::Configuration(_))));
}

#[test]
fn page_level_validation() {
    assert!(matches!(
        SceneConfig::from_json_str(r#"{ "viewport_height": 0 }"#),
        Err(ScrollError::Configuration(_))
    ));
    let dup = r#"{
        "viewport_height": 800,
        "pins": [
            { "id": "p", "element_top": 0, "span": { "kind": "fixed", "px": 10 } },
            { "id": "p", "element_top": 50, "span": { "kind": "fixed", "px": 10 } }
        ]
    }"#;
    assert!(SceneConfig::from_json_str(dup).is_err());
}

#[test]
fn malformed_json_is_serde_error() {
    assert!(matches!(
        SceneConfig::from_json_str("{ nope"),
        Err(ScrollError::Serde(_))
    ));
    assert!(matches!(
        SceneConfig::from_json_str(r#"{ "viewport_height": 800, "extra": 1 }"#),
        Err(ScrollError::Serde(_))
    ));
}

#[test]
fn missing_file_is_wrapped() {
    let err = SceneConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("read scene config"));
}
