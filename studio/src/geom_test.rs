#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn point_from_tuple() {
    let p: Point = (3.0, 4.5).into();
    assert_eq!(p, Point::new(3.0, 4.5));
}

#[test]
fn point_nan_is_not_finite() {
    assert!(Point::new(1.0, 2.0).is_finite());
    assert!(!Point::new(f64::NAN, 2.0).is_finite());
    assert!(!Point::new(0.0, f64::INFINITY).is_finite());
}

#[test]
fn scale_default_is_identity() {
    assert_eq!(Scale::default(), Scale::ONE);
    assert_eq!(Scale::uniform(0.5), Scale::new(0.5, 0.5));
}

#[test]
fn scale_validity() {
    assert!(Scale::new(0.0, 2.0).is_valid());
    assert!(!Scale::new(-1.0, 1.0).is_valid());
    assert!(!Scale::new(1.0, f64::NAN).is_valid());
}

#[test]
fn size_float_accessors() {
    let s = Size::new(600, 315);
    assert_eq!(s.w(), 600.0);
    assert_eq!(s.h(), 315.0);
}
