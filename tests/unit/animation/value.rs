use super::*;

#[test]
fn scalar_lerp_hits_exact_endpoints() {
    let a = 0.1;
    let b = 0.7;
    assert_eq!(<f64 as Lerp>::lerp(&a, &b, 0.0), a);
    assert_eq!(<f64 as Lerp>::lerp(&a, &b, 1.0), b);
    assert!((<f64 as Lerp>::lerp(&a, &b, 0.5) - 0.4).abs() < 1e-12);
}

#[test]
fn vec2_lerp_is_componentwise() {
    let v = <Vec2 as Lerp>::lerp(&Vec2::new(0.0, 10.0), &Vec2::new(10.0, 30.0), 0.5);
    assert_eq!(v, Vec2::new(5.0, 20.0));
}

#[test]
fn property_kinds() {
    assert_eq!(Property::Opacity.kind(), ValueKind::Scalar);
    assert_eq!(Property::Translate.kind(), ValueKind::Vec2);
    assert_eq!(PropertyValue::from(1.0).kind(), ValueKind::Scalar);
    assert_eq!(PropertyValue::from(Vec2::ZERO).kind(), ValueKind::Vec2);
}

#[test]
fn property_value_parses_untagged() {
    let s: PropertyValue = serde_json::from_str("0.5").unwrap();
    assert_eq!(s, PropertyValue::Scalar(0.5));

    let v: PropertyValue = serde_json::from_str(r#"{"x": 1.0, "y": -2.0}"#).unwrap();
    assert_eq!(v, PropertyValue::Vec2(Vec2::new(1.0, -2.0)));
}
