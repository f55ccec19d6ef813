//! Tool & selection controller.
//!
//! DESIGN
//! ======
//! `EngineCore` owns the scene and the UI state for one editing session. The
//! host drives it with discrete events (tool chosen, selection reported by the
//! rendering surface, delete, color change, image acquisition finished) and
//! receives a list of [`Action`]s describing what changed. Nothing here
//! inspects pointer coordinates: the surface decides what was clicked and
//! reports it through [`EngineCore::on_selection_reported`].
//!
//! Precondition failures are never errors. They come back as
//! [`Action::Rejected`] and leave the scene untouched.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};

use crate::bitmap;
use crate::campaign::{CampaignSpec, TemplateRef};
use crate::consts::*;
use crate::doc::{DrawableObject, ObjectId, ObjectKind, Scene, TextStyle};
use crate::geom::{Point, Scale};
use crate::input::{Tool, UiState};
use crate::style::Color;
use crate::template;

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The action needs a selected object and there is none.
    NoSelection,
    /// The id is unknown or names the background.
    NotSelectable(ObjectId),
    /// The color string did not parse.
    InvalidColor(String),
    /// The uploaded bytes are not a decodable image.
    Decode(String),
}

/// Events returned from controller operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The object list or an object's attributes changed; repaint.
    SceneChanged,
    /// The selection moved to a new object, or was cleared.
    SelectionChanged(Option<ObjectId>),
    /// The host should open its file picker and later call
    /// [`EngineCore::complete_image`] or [`EngineCore::cancel_image`].
    ImageRequested,
    /// The action was a no-op because a precondition failed.
    Rejected(Rejection),
}

/// Controller state for one editing session.
pub struct EngineCore {
    pub scene: Scene,
    pub ui: UiState,
}

impl EngineCore {
    /// Wrap an existing scene. Tool is `Select`, nothing selected.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self { scene, ui: UiState::default() }
    }

    /// Start a session: run the template initializer for the chosen preset.
    #[must_use]
    pub fn open(campaign: &CampaignSpec, template: &TemplateRef) -> Self {
        debug!(template_id = %template.id, template = %template.name, "opening editor session");
        Self::new(template::initialize(campaign))
    }

    // --- Tools ---

    /// Activate a tool. Text, rectangle and circle drop a default object and
    /// select it; image asks the host for a file.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        debug!(?tool, "tool selected");
        match tool {
            Tool::Select => Vec::new(),
            Tool::Image => {
                self.ui.image_pending = true;
                vec![Action::ImageRequested]
            }
            Tool::Text => self.add_object(default_text()),
            Tool::Rect => self.add_object(default_rect()),
            Tool::Circle => self.add_object(default_circle()),
        }
    }

    /// Deliver the bytes picked after [`Action::ImageRequested`], or from a
    /// direct upload. On success the image is appended and selected.
    pub fn complete_image(&mut self, bytes: &[u8]) -> Vec<Action> {
        self.ui.image_pending = false;
        match bitmap::decode(bytes) {
            Ok(bmp) => self.add_object(template::image_object(bmp)),
            Err(e) => {
                warn!(error = %e, "uploaded image rejected");
                vec![Action::Rejected(Rejection::Decode(e.to_string()))]
            }
        }
    }

    /// The file picker was dismissed or failed. Scene and selection are untouched.
    pub fn cancel_image(&mut self) -> Vec<Action> {
        self.ui.image_pending = false;
        Vec::new()
    }

    // --- Surface reports ---

    /// The rendering surface reports which object the pointer selected.
    /// `None` means an empty area was clicked.
    pub fn on_selection_reported(&mut self, id: Option<ObjectId>) -> Vec<Action> {
        match id {
            None => self.select(None),
            Some(id) if self.is_selectable(&id) => self.select(Some(id)),
            Some(id) => {
                warn!(%id, "selection report names an unselectable object");
                vec![Action::Rejected(Rejection::NotSelectable(id))]
            }
        }
    }

    /// The rendering surface finished a drag or resize of an object.
    pub fn on_transform_reported(&mut self, id: ObjectId, position: Point, scale: Scale) -> Vec<Action> {
        let Some(obj) = self.scene.get_mut(&id).filter(|o| o.is_selectable()) else {
            return vec![Action::Rejected(Rejection::NotSelectable(id))];
        };
        if obj.position == position && obj.scale == scale {
            return Vec::new();
        }
        obj.position = position;
        obj.scale = scale;
        vec![Action::SceneChanged]
    }

    // --- Selection edits ---

    /// Remove the selected object and clear the selection.
    pub fn delete(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return vec![Action::Rejected(Rejection::NoSelection)];
        };
        self.ui.selected_id = None;
        if self.scene.remove(&id).is_none() {
            return vec![Action::SelectionChanged(None)];
        }
        debug!(%id, remaining = self.scene.len(), "object deleted");
        vec![Action::SceneChanged, Action::SelectionChanged(None)]
    }

    /// Set the fill color of the selected object.
    ///
    /// Images have no fill; the call is accepted and changes nothing.
    pub fn set_color(&mut self, raw: &str) -> Vec<Action> {
        let color = match raw.parse::<Color>() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "color rejected");
                return vec![Action::Rejected(Rejection::InvalidColor(raw.to_string()))];
            }
        };
        let Some(obj) = self.ui.selected_id.and_then(|id| self.scene.get_mut(&id)) else {
            return vec![Action::Rejected(Rejection::NoSelection)];
        };
        if obj.fill() == Some(color) || !obj.set_fill(color) {
            return Vec::new();
        }
        debug!(id = %obj.id, %color, "fill changed");
        vec![Action::SceneChanged]
    }

    // --- Queries ---

    /// The currently selected object id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selected_id
    }

    /// The currently selected object, if any.
    #[must_use]
    pub fn selected_object(&self) -> Option<&DrawableObject> {
        self.ui.selected_id.and_then(|id| self.scene.get(&id))
    }

    /// Whether color and delete controls should be enabled.
    #[must_use]
    pub fn can_edit_selection(&self) -> bool {
        self.selected_object().is_some()
    }

    /// Whether an image was requested and neither completed nor cancelled.
    #[must_use]
    pub fn image_pending(&self) -> bool {
        self.ui.image_pending
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&DrawableObject> {
        self.scene.get(id)
    }

    // --- Internals ---

    fn is_selectable(&self, id: &ObjectId) -> bool {
        self.scene.get(id).is_some_and(DrawableObject::is_selectable)
    }

    fn select(&mut self, id: Option<ObjectId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        debug!(?id, "selection changed");
        vec![Action::SelectionChanged(id)]
    }

    fn add_object(&mut self, obj: DrawableObject) -> Vec<Action> {
        let id = obj.id;
        debug!(%id, kind = obj.kind.name(), "object added");
        self.scene.push(obj);
        let mut actions = vec![Action::SceneChanged];
        actions.extend(self.select(Some(id)));
        actions
    }
}

fn default_text() -> DrawableObject {
    DrawableObject::new(
        TOOL_ANCHOR.into(),
        ObjectKind::Text(TextStyle::new(TOOL_TEXT_CONTENT, TOOL_TEXT_FONT_SIZE, TOOL_TEXT_FILL)),
    )
}

fn default_rect() -> DrawableObject {
    DrawableObject::new(
        TOOL_ANCHOR.into(),
        ObjectKind::Rect {
            width: TOOL_RECT_WIDTH,
            height: TOOL_RECT_HEIGHT,
            fill: TOOL_RECT_FILL,
            stroke: Some(TOOL_RECT_STROKE),
            stroke_width: TOOL_STROKE_WIDTH,
            corner_radius: None,
        },
    )
}

fn default_circle() -> DrawableObject {
    DrawableObject::new(
        TOOL_ANCHOR.into(),
        ObjectKind::Circle {
            radius: TOOL_CIRCLE_RADIUS,
            fill: TOOL_CIRCLE_FILL,
            stroke: Some(TOOL_CIRCLE_STROKE),
            stroke_width: TOOL_STROKE_WIDTH,
        },
    )
}
