#![allow(clippy::float_cmp)]

use image::{Rgba, RgbaImage};

use super::*;
use crate::style::LinearGradient;

fn background() -> DrawableObject {
    DrawableObject::new(
        Point::new(0.0, 0.0),
        ObjectKind::Background { fill: Fill::Linear(LinearGradient::two_stop(135.0, Color::BLACK, Color::WHITE)) },
    )
}

fn rect(fill: Color) -> DrawableObject {
    DrawableObject::new(
        Point::new(10.0, 20.0),
        ObjectKind::Rect { width: 30.0, height: 40.0, fill, stroke: None, stroke_width: 0.0, corner_radius: None },
    )
}

fn text(content: &str) -> DrawableObject {
    DrawableObject::new(Point::new(0.0, 0.0), ObjectKind::Text(TextStyle::new(content, 12.0, Color::BLACK)))
}

fn image_object() -> DrawableObject {
    let bitmap = Bitmap::from_rgba(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))).unwrap();
    DrawableObject::new(Point::new(50.0, 50.0), ObjectKind::Image { bitmap })
}

fn scene_with_background() -> Scene {
    let mut scene = Scene::new(Size::new(600, 600));
    assert!(scene.push(background()));
    scene
}

// =============================================================
// DrawableObject
// =============================================================

#[test]
fn new_objects_get_unique_ids() {
    assert_ne!(rect(Color::BLACK).id, rect(Color::BLACK).id);
}

#[test]
fn new_objects_have_identity_scale() {
    let r = rect(Color::BLACK);
    assert_eq!(r.scale, Scale::ONE);
    assert_eq!(r.with_scale(Scale::uniform(0.5)).scale, Scale::new(0.5, 0.5));
}

#[test]
fn kind_names() {
    assert_eq!(background().kind.name(), "background");
    assert_eq!(image_object().kind.name(), "image");
    assert_eq!(text("a").kind.name(), "text");
    assert_eq!(rect(Color::BLACK).kind.name(), "rect");
}

#[test]
fn background_is_not_selectable() {
    assert!(!background().is_selectable());
    assert!(rect(Color::BLACK).is_selectable());
    assert!(image_object().is_selectable());
}

#[test]
fn set_fill_on_text_and_shapes() {
    let red = Color::rgb(255, 0, 0);
    let mut t = text("hi");
    assert!(t.set_fill(red));
    assert_eq!(t.fill(), Some(red));

    let mut c = DrawableObject::new(
        Point::new(0.0, 0.0),
        ObjectKind::Circle { radius: 5.0, fill: Color::BLACK, stroke: None, stroke_width: 0.0 },
    );
    assert!(c.set_fill(red));
    assert_eq!(c.fill(), Some(red));
}

#[test]
fn set_fill_on_image_is_inapplicable() {
    let mut img = image_object();
    let before = img.clone();
    assert!(!img.set_fill(Color::WHITE));
    assert_eq!(img, before);
    assert_eq!(img.fill(), None);
}

// =============================================================
// Scene: ordering
// =============================================================

#[test]
fn empty_scene() {
    let scene = Scene::new(Size::new(600, 315));
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
    assert_eq!(scene.canvas_size(), Size::new(600, 315));
    assert!(scene.background().is_none());
}

#[test]
fn push_appends_in_paint_order() {
    let mut scene = scene_with_background();
    let a = rect(Color::BLACK);
    let b = text("b");
    let (a_id, b_id) = (a.id, b.id);
    scene.push(a);
    scene.push(b);
    assert_eq!(scene.index_of(&a_id), Some(1));
    assert_eq!(scene.index_of(&b_id), Some(2));
    assert_eq!(scene.objects().last().unwrap().id, b_id);
}

#[test]
fn background_stays_at_index_zero() {
    let mut scene = scene_with_background();
    scene.push(rect(Color::BLACK));
    assert!(scene.objects()[0].is_background());
    assert!(scene.background().is_some());
}

#[test]
fn second_background_is_refused() {
    let mut scene = scene_with_background();
    assert!(!scene.push(background()));
    assert_eq!(scene.len(), 1);
}

#[test]
fn background_refused_into_non_empty_scene() {
    let mut scene = Scene::new(Size::new(10, 10));
    scene.push(rect(Color::BLACK));
    assert!(!scene.push(background()));
    assert!(scene.background().is_none());
}

// =============================================================
// Scene: removal and lookup
// =============================================================

#[test]
fn remove_returns_object_and_preserves_order() {
    let mut scene = scene_with_background();
    let a = rect(Color::BLACK);
    let b = text("b");
    let c = text("c");
    let (a_id, b_id, c_id) = (a.id, b.id, c.id);
    scene.push(a);
    scene.push(b);
    scene.push(c);

    let removed = scene.remove(&b_id).unwrap();
    assert_eq!(removed.id, b_id);
    let ids: Vec<ObjectId> = scene.objects().iter().map(|o| o.id).collect();
    assert_eq!(ids[1..], [a_id, c_id]);
}

#[test]
fn remove_background_is_refused() {
    let mut scene = scene_with_background();
    let bg_id = scene.objects()[0].id;
    assert!(scene.remove(&bg_id).is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn remove_unknown_is_none() {
    let mut scene = scene_with_background();
    assert!(scene.remove(&Uuid::new_v4()).is_none());
}

#[test]
fn get_mut_edits_only_target() {
    let mut scene = scene_with_background();
    let a = rect(Color::BLACK);
    let b = rect(Color::BLACK);
    let (a_id, b_id) = (a.id, b.id);
    scene.push(a);
    scene.push(b);

    scene.get_mut(&a_id).unwrap().position = Point::new(1.0, 2.0);
    assert_eq!(scene.get(&a_id).unwrap().position, Point::new(1.0, 2.0));
    assert_eq!(scene.get(&b_id).unwrap().position, Point::new(10.0, 20.0));
}
