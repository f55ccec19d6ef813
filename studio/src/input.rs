//! Input model: tools and the UI state the controller tracks.
//!
//! `Tool` is the interaction mode chosen on the toolbar. `UiState` holds the
//! active tool and the single selection; the selection always refers to an
//! object id still present in the scene, never the background.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ObjectId;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Add a text object.
    Text,
    /// Add a rectangle.
    Rect,
    /// Add a circle.
    Circle,
    /// Acquire an image from the host's file picker.
    Image,
}

impl Tool {
    /// Whether choosing this tool immediately creates an object.
    #[must_use]
    pub fn creates_object(self) -> bool {
        matches!(self, Self::Text | Self::Rect | Self::Circle)
    }

    /// Resolve a toolbar identifier (`select`, `text`, `rectangle`, `circle`, `image`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Self::Select),
            "text" => Some(Self::Text),
            "rectangle" | "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            "image" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected object, if any.
    pub selected_id: Option<ObjectId>,
    /// An image acquisition was requested and has not completed or been cancelled.
    pub image_pending: bool,
}
