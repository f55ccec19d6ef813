//! Document model: drawable objects and the ordered scene that owns them.
//!
//! This module defines what is on the canvas (`DrawableObject`, `ObjectKind`)
//! and the runtime store that owns all live objects (`Scene`). Unlike a keyed
//! store, the scene is a plain sequence: index is paint order, so the last
//! object is drawn on top. Objects are only ever appended or removed, never
//! reordered.
//!
//! The background is special: at most one exists, it always sits at index 0,
//! and the scene refuses to append a second one or to remove it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use uuid::Uuid;

use crate::bitmap::Bitmap;
use crate::geom::{Point, Scale, Size};
use crate::style::{Color, Fill, FontWeight, Shadow, TextAnchor};

/// Stable identifier for a drawable object.
pub type ObjectId = Uuid;

/// Attributes of a text object.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub content: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub fill: Color,
    /// Lines wrap at this width when set.
    pub wrap_width: Option<f64>,
    pub shadow: Option<Shadow>,
    pub anchor: TextAnchor,
}

impl TextStyle {
    /// Plain, unwrapped, shadowless text anchored at its top-left corner.
    #[must_use]
    pub fn new(content: impl Into<String>, font_size: f64, fill: Color) -> Self {
        Self {
            content: content.into(),
            font_size,
            font_weight: FontWeight::Normal,
            fill,
            wrap_width: None,
            shadow: None,
            anchor: TextAnchor::TopLeft,
        }
    }
}

/// The variant-specific part of a drawable object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Full-canvas paint. Not selectable, not deletable.
    Background { fill: Fill },
    /// Decoded bitmap drawn at its intrinsic size times the object scale.
    Image { bitmap: Bitmap },
    Text(TextStyle),
    /// Axis-aligned rectangle with an optional corner radius.
    Rect {
        width: f64,
        height: f64,
        fill: Color,
        stroke: Option<Color>,
        stroke_width: f64,
        corner_radius: Option<f64>,
    },
    /// Circle whose bounding box starts at the object position.
    Circle { radius: f64, fill: Color, stroke: Option<Color>, stroke_width: f64 },
}

impl ObjectKind {
    /// Short lowercase name for logs and property panels.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background { .. } => "background",
            Self::Image { .. } => "image",
            Self::Text(_) => "text",
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
        }
    }
}

/// One visual element of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableObject {
    pub id: ObjectId,
    /// Top-left corner of the unscaled bounding box.
    pub position: Point,
    pub scale: Scale,
    pub kind: ObjectKind,
}

impl DrawableObject {
    /// New object with a fresh id and identity scale.
    #[must_use]
    pub fn new(position: Point, kind: ObjectKind) -> Self {
        Self { id: Uuid::new_v4(), position, scale: Scale::ONE, kind }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn is_background(&self) -> bool {
        matches!(self.kind, ObjectKind::Background { .. })
    }

    /// Whether tools may select, move or delete this object.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_background()
    }

    /// Fill color, for variants that have one.
    #[must_use]
    pub fn fill(&self) -> Option<Color> {
        match &self.kind {
            ObjectKind::Text(style) => Some(style.fill),
            ObjectKind::Rect { fill, .. } | ObjectKind::Circle { fill, .. } => Some(*fill),
            ObjectKind::Background { .. } | ObjectKind::Image { .. } => None,
        }
    }

    /// Set the fill color. Returns `false` when the variant has no fill
    /// (images, backgrounds); the object is left untouched in that case.
    pub fn set_fill(&mut self, color: Color) -> bool {
        match &mut self.kind {
            ObjectKind::Text(style) => style.fill = color,
            ObjectKind::Rect { fill, .. } | ObjectKind::Circle { fill, .. } => *fill = color,
            ObjectKind::Background { .. } | ObjectKind::Image { .. } => return false,
        }
        true
    }
}

/// The live document: canvas size plus objects in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    canvas_size: Size,
    objects: Vec<DrawableObject>,
}

impl Scene {
    /// Create an empty scene. The canvas size is fixed for its lifetime.
    #[must_use]
    pub fn new(canvas_size: Size) -> Self {
        Self { canvas_size, objects: Vec::new() }
    }

    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Append an object on top of everything else.
    ///
    /// A background is only accepted into an empty scene, which keeps it at
    /// index 0. Returns `false` when the object was refused.
    pub fn push(&mut self, obj: DrawableObject) -> bool {
        if obj.is_background() && !self.objects.is_empty() {
            return false;
        }
        self.objects.push(obj);
        true
    }

    /// Remove a non-background object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<DrawableObject> {
        let index = self.index_of(id)?;
        if self.objects[index].is_background() {
            return None;
        }
        Some(self.objects.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&DrawableObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut DrawableObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    /// Paint-order position of an object.
    #[must_use]
    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == *id)
    }

    /// All objects, bottom first.
    #[must_use]
    pub fn objects(&self) -> &[DrawableObject] {
        &self.objects
    }

    /// The background object, if the scene has one.
    #[must_use]
    pub fn background(&self) -> Option<&DrawableObject> {
        self.objects.first().filter(|o| o.is_background())
    }

    /// Number of objects currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
