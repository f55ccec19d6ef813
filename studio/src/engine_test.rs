#![allow(clippy::float_cmp)]

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use uuid::Uuid;

use super::*;
use crate::campaign::{CampaignKind, catalog};
use crate::geom::Size;
use crate::platform::Platform;

// =============================================================
// Helpers
// =============================================================

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn organic_campaign() -> CampaignSpec {
    CampaignSpec {
        kind: CampaignKind::Organic,
        platform: Platform::Instagram,
        description: "Fresh coffee every morning".into(),
        ..Default::default()
    }
}

fn open_core() -> EngineCore {
    let campaign = organic_campaign();
    let template = catalog(campaign.platform).remove(0);
    EngineCore::open(&campaign, &template)
}

fn background_id(core: &EngineCore) -> ObjectId {
    core.scene.objects()[0].id
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_scene_changed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::SceneChanged))
}

fn has_rejection(actions: &[Action], rejection: &Rejection) -> bool {
    has_action(actions, |a| matches!(a, Action::Rejected(r) if r == rejection))
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn open_starts_with_select_tool_and_no_selection() {
    let core = open_core();
    assert_eq!(core.tool(), Tool::Select);
    assert!(core.selection().is_none());
    assert!(!core.can_edit_selection());
    assert!(!core.image_pending());
}

#[test]
fn open_runs_initializer() {
    let core = open_core();
    assert_eq!(core.scene().len(), 2);
    assert!(core.scene().objects()[0].is_background());
    assert_eq!(core.scene().canvas_size(), Size::new(600, 600));
}

#[test]
fn new_wraps_empty_scene() {
    let core = EngineCore::new(Scene::new(Size::new(10, 10)));
    assert!(core.scene().is_empty());
    assert_eq!(core.tool(), Tool::Select);
}

// =============================================================
// Tools
// =============================================================

#[test]
fn select_tool_mutates_nothing() {
    let mut core = open_core();
    let before = core.scene().clone();
    let actions = core.set_tool(Tool::Select);
    assert!(actions.is_empty());
    assert_eq!(core.scene(), &before);
}

#[test]
fn text_tool_adds_default_text_and_selects_it() {
    let mut core = open_core();
    let actions = core.set_tool(Tool::Text);
    assert!(has_scene_changed(&actions));

    let obj = core.scene().objects().last().unwrap();
    assert_eq!(core.selection(), Some(obj.id));
    assert!(actions.contains(&Action::SelectionChanged(Some(obj.id))));
    assert_eq!(obj.position, Point::new(100.0, 100.0));
    let ObjectKind::Text(style) = &obj.kind else {
        panic!("expected text");
    };
    assert_eq!(style.content, "Double click to edit");
    assert_eq!(style.font_size, 24.0);
    assert_eq!(style.fill, Color::rgb(0x33, 0x33, 0x33));
}

#[test]
fn rect_tool_adds_default_rect() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let obj = core.selected_object().unwrap();
    let ObjectKind::Rect { width, height, fill, stroke, stroke_width, corner_radius } = &obj.kind else {
        panic!("expected rect");
    };
    assert_eq!((*width, *height), (150.0, 100.0));
    assert_eq!(*fill, Color::rgb(0x3b, 0x82, 0xf6));
    assert_eq!(*stroke, Some(Color::rgb(0x1d, 0x4e, 0xd8)));
    assert_eq!(*stroke_width, 2.0);
    assert!(corner_radius.is_none());
}

#[test]
fn circle_tool_adds_default_circle() {
    let mut core = open_core();
    core.set_tool(Tool::Circle);
    let obj = core.selected_object().unwrap();
    let ObjectKind::Circle { radius, fill, stroke, .. } = &obj.kind else {
        panic!("expected circle");
    };
    assert_eq!(*radius, 50.0);
    assert_eq!(*fill, Color::rgb(0xef, 0x44, 0x44));
    assert_eq!(*stroke, Some(Color::rgb(0xdc, 0x26, 0x26)));
}

#[test]
fn rect_tool_twice_appends_two_and_selects_second() {
    let mut core = open_core();
    let start = core.scene().len();
    core.set_tool(Tool::Rect);
    let first = core.selection().unwrap();
    core.set_tool(Tool::Rect);
    let second = core.selection().unwrap();

    assert_eq!(core.scene().len(), start + 2);
    assert_ne!(first, second);
    assert_eq!(core.scene().index_of(&first), Some(start));
    assert_eq!(core.scene().index_of(&second), Some(start + 1));
    assert_eq!(core.scene().objects().last().unwrap().id, second);
}

#[test]
fn new_objects_are_painted_on_top() {
    let mut core = open_core();
    core.set_tool(Tool::Circle);
    core.set_tool(Tool::Text);
    let names: Vec<&str> = core.scene().objects().iter().map(|o| o.kind.name()).collect();
    assert_eq!(names, ["background", "text", "circle", "text"]);
}

// =============================================================
// Image acquisition
// =============================================================

#[test]
fn image_tool_requests_file_without_mutating() {
    let mut core = open_core();
    let len = core.scene().len();
    let actions = core.set_tool(Tool::Image);
    assert_eq!(actions, vec![Action::ImageRequested]);
    assert!(core.image_pending());
    assert_eq!(core.scene().len(), len);
}

#[test]
fn complete_image_appends_and_selects() {
    let mut core = open_core();
    core.set_tool(Tool::Image);
    let actions = core.complete_image(&png_bytes(64, 32));
    assert!(has_scene_changed(&actions));
    assert!(!core.image_pending());

    let obj = core.selected_object().unwrap();
    assert_eq!(obj.position, Point::new(50.0, 50.0));
    assert_eq!(obj.scale, Scale::uniform(0.5));
    assert!(matches!(obj.kind, ObjectKind::Image { .. }));
}

#[test]
fn cancel_image_leaves_scene_and_selection() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let selected = core.selection();
    let before = core.scene().clone();

    core.set_tool(Tool::Image);
    assert!(core.image_pending());
    let actions = core.cancel_image();
    assert!(actions.is_empty());
    assert!(!core.image_pending());
    assert_eq!(core.scene(), &before);
    assert_eq!(core.selection(), selected);
}

#[test]
fn undecodable_image_is_rejected() {
    let mut core = open_core();
    core.set_tool(Tool::Image);
    let before = core.scene().clone();
    let actions = core.complete_image(b"not an image");
    assert!(has_action(&actions, |a| matches!(a, Action::Rejected(Rejection::Decode(_)))));
    assert!(!core.image_pending());
    assert_eq!(core.scene(), &before);
    assert!(core.selection().is_none());
}

#[test]
fn direct_upload_without_request_is_accepted() {
    let mut core = open_core();
    let actions = core.complete_image(&png_bytes(4, 4));
    assert!(has_scene_changed(&actions));
    assert_eq!(core.scene().len(), 3);
}

// =============================================================
// Surface-reported selection
// =============================================================

#[test]
fn selection_report_selects_object() {
    let mut core = open_core();
    let desc_id = core.scene().objects()[1].id;
    let actions = core.on_selection_reported(Some(desc_id));
    assert_eq!(actions, vec![Action::SelectionChanged(Some(desc_id))]);
    assert_eq!(core.selection(), Some(desc_id));
}

#[test]
fn selection_report_none_clears() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let actions = core.on_selection_reported(None);
    assert_eq!(actions, vec![Action::SelectionChanged(None)]);
    assert!(core.selection().is_none());
}

#[test]
fn repeated_selection_report_is_silent() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let id = core.selection();
    assert!(core.on_selection_reported(id).is_empty());
}

#[test]
fn background_is_never_selected() {
    let mut core = open_core();
    let bg = background_id(&core);
    let actions = core.on_selection_reported(Some(bg));
    assert!(has_rejection(&actions, &Rejection::NotSelectable(bg)));
    assert!(core.selection().is_none());
}

#[test]
fn unknown_selection_keeps_current() {
    let mut core = open_core();
    core.set_tool(Tool::Circle);
    let current = core.selection();
    let ghost = Uuid::new_v4();
    let actions = core.on_selection_reported(Some(ghost));
    assert!(has_rejection(&actions, &Rejection::NotSelectable(ghost)));
    assert_eq!(core.selection(), current);
}

#[test]
fn transform_report_updates_geometry() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let id = core.selection().unwrap();
    let actions = core.on_transform_reported(id, Point::new(10.0, 20.0), Scale::new(2.0, 1.5));
    assert!(has_scene_changed(&actions));
    let obj = core.object(&id).unwrap();
    assert_eq!(obj.position, Point::new(10.0, 20.0));
    assert_eq!(obj.scale, Scale::new(2.0, 1.5));
}

#[test]
fn transform_report_unchanged_is_silent() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let id = core.selection().unwrap();
    assert!(core.on_transform_reported(id, Point::new(100.0, 100.0), Scale::ONE).is_empty());
}

#[test]
fn transform_report_on_background_rejected() {
    let mut core = open_core();
    let bg = background_id(&core);
    let actions = core.on_transform_reported(bg, Point::new(5.0, 5.0), Scale::ONE);
    assert!(has_rejection(&actions, &Rejection::NotSelectable(bg)));
    assert_eq!(core.scene().objects()[0].position, Point::new(0.0, 0.0));
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_without_selection_is_rejected_noop() {
    let mut core = open_core();
    let before = core.scene().clone();
    let actions = core.delete();
    assert_eq!(actions, vec![Action::Rejected(Rejection::NoSelection)]);
    assert_eq!(core.scene(), &before);
    assert_eq!(core.scene().len(), before.len());
}

#[test]
fn delete_removes_selected_and_clears_selection() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let id = core.selection().unwrap();
    let len = core.scene().len();

    let actions = core.delete();
    assert!(has_scene_changed(&actions));
    assert!(actions.contains(&Action::SelectionChanged(None)));
    assert_eq!(core.scene().len(), len - 1);
    assert!(core.object(&id).is_none());
    assert!(core.selection().is_none());
}

#[test]
fn delete_keeps_remaining_order() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let rect = core.selection().unwrap();
    core.set_tool(Tool::Circle);
    let circle = core.selection().unwrap();
    core.on_selection_reported(Some(rect));
    core.delete();
    assert_eq!(core.scene().objects().last().unwrap().id, circle);
    assert!(core.scene().objects()[0].is_background());
}

#[test]
fn delete_twice_second_is_rejected() {
    let mut core = open_core();
    core.set_tool(Tool::Text);
    core.delete();
    assert!(has_rejection(&core.delete(), &Rejection::NoSelection));
}

// =============================================================
// Color
// =============================================================

#[test]
fn set_color_changes_only_selected_text() {
    let mut core = open_core();
    core.set_tool(Tool::Text);
    let first = core.selection().unwrap();
    core.set_tool(Tool::Text);
    let second = core.selection().unwrap();
    let before = core.scene().clone();

    let actions = core.set_color("#00ff00");
    assert_eq!(actions, vec![Action::SceneChanged]);
    assert_eq!(core.object(&second).unwrap().fill(), Some(Color::rgb(0, 255, 0)));

    for (old, new) in before.objects().iter().zip(core.scene().objects()) {
        if new.id != second {
            assert_eq!(old, new);
        }
    }
    assert_eq!(core.object(&first).unwrap().fill(), Some(Color::rgb(0x33, 0x33, 0x33)));
}

#[test]
fn set_color_on_shapes() {
    let mut core = open_core();
    core.set_tool(Tool::Circle);
    core.set_color("rgb(1, 2, 3)");
    assert_eq!(core.selected_object().unwrap().fill(), Some(Color::rgb(1, 2, 3)));
}

#[test]
fn set_color_without_selection_is_rejected() {
    let mut core = open_core();
    let before = core.scene().clone();
    let actions = core.set_color("#ffffff");
    assert!(has_rejection(&actions, &Rejection::NoSelection));
    assert_eq!(core.scene(), &before);
}

#[test]
fn set_color_with_bad_value_is_rejected() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    let before = core.scene().clone();
    let actions = core.set_color("not-a-color");
    assert!(has_rejection(&actions, &Rejection::InvalidColor("not-a-color".into())));
    assert_eq!(core.scene(), &before);
}

#[test]
fn set_color_on_image_is_silently_accepted() {
    let mut core = open_core();
    core.complete_image(&png_bytes(8, 8));
    let before = core.scene().clone();
    let actions = core.set_color("#ff0000");
    assert!(actions.is_empty());
    assert_eq!(core.scene(), &before);
    assert!(core.selection().is_some());
}

#[test]
fn set_same_color_is_silent() {
    let mut core = open_core();
    core.set_tool(Tool::Rect);
    assert!(core.set_color("#3b82f6").is_empty());
}
