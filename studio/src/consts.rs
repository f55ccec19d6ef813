//! Shared constants for the studio crate.

use crate::style::{Color, Shadow};

// ── Background ──────────────────────────────────────────────────

/// Angle of the default background gradient, CSS convention (0° points up).
pub const BACKGROUND_GRADIENT_ANGLE_DEG: f64 = 135.0;

/// First stop of the default background gradient.
pub const BACKGROUND_GRADIENT_START: Color = Color::rgb(0x66, 0x7e, 0xea);

/// Last stop of the default background gradient.
pub const BACKGROUND_GRADIENT_END: Color = Color::rgb(0x76, 0x4b, 0xa2);

// ── Images ──────────────────────────────────────────────────────

/// Anchor for uploaded and campaign images.
pub const IMAGE_ANCHOR: (f64, f64) = (50.0, 50.0);

/// Uniform scale applied to freshly inserted images.
pub const IMAGE_SCALE: f64 = 0.5;

// ── Campaign text ───────────────────────────────────────────────

/// Left margin shared by campaign text and the CTA button.
pub const CONTENT_LEFT: f64 = 50.0;

pub const HEADLINE_TOP_WITH_IMAGE: f64 = 300.0;
pub const HEADLINE_TOP: f64 = 150.0;
pub const HEADLINE_FONT_SIZE: f64 = 32.0;
/// `2px 2px 4px rgba(0,0,0,0.3)`.
pub const HEADLINE_SHADOW: Shadow = Shadow { color: Color::rgba(0, 0, 0, 77), offset_x: 2.0, offset_y: 2.0, blur: 4.0 };

pub const DESCRIPTION_TOP_WITH_IMAGE: f64 = 400.0;
pub const DESCRIPTION_TOP: f64 = 250.0;
pub const DESCRIPTION_FONT_SIZE: f64 = 16.0;

/// Horizontal space reserved around wrapped description text.
pub const DESCRIPTION_WRAP_INSET: f64 = 100.0;

pub const CAMPAIGN_TEXT_FILL: Color = Color::rgb(0xff, 0xff, 0xff);

// ── Call to action ──────────────────────────────────────────────

pub const CTA_WIDTH: f64 = 200.0;
pub const CTA_HEIGHT: f64 = 50.0;
pub const CTA_CORNER_RADIUS: f64 = 25.0;

/// Distance from the bottom canvas edge to the top of the CTA button.
pub const CTA_BOTTOM_OFFSET: f64 = 120.0;

pub const CTA_FILL: Color = Color::rgb(0xff, 0x6b, 0x6b);
pub const CTA_FONT_SIZE: f64 = 16.0;

// ── Tool defaults ───────────────────────────────────────────────

/// Where the text, rectangle and circle tools drop new objects.
pub const TOOL_ANCHOR: (f64, f64) = (100.0, 100.0);

pub const TOOL_TEXT_CONTENT: &str = "Double click to edit";
pub const TOOL_TEXT_FONT_SIZE: f64 = 24.0;
pub const TOOL_TEXT_FILL: Color = Color::rgb(0x33, 0x33, 0x33);

pub const TOOL_RECT_WIDTH: f64 = 150.0;
pub const TOOL_RECT_HEIGHT: f64 = 100.0;
pub const TOOL_RECT_FILL: Color = Color::rgb(0x3b, 0x82, 0xf6);
pub const TOOL_RECT_STROKE: Color = Color::rgb(0x1d, 0x4e, 0xd8);

pub const TOOL_CIRCLE_RADIUS: f64 = 50.0;
pub const TOOL_CIRCLE_FILL: Color = Color::rgb(0xef, 0x44, 0x44);
pub const TOOL_CIRCLE_STROKE: Color = Color::rgb(0xdc, 0x26, 0x26);

pub const TOOL_STROKE_WIDTH: f64 = 2.0;

// ── Text layout ─────────────────────────────────────────────────

/// Average glyph advance as a fraction of the font size, used for wrapping.
pub const GLYPH_ADVANCE_RATIO: f64 = 0.55;

/// Baseline offset below the top of a text box, as a fraction of font size.
pub const ASCENT_RATIO: f64 = 0.9;

/// Distance between consecutive baselines, as a fraction of font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.16;

// ── Export ──────────────────────────────────────────────────────

pub const DEFAULT_EXPORT_MULTIPLIER: f32 = 2.0;
pub const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Largest raster edge the exporter will allocate, in device pixels.
pub const MAX_EXPORT_EDGE_PX: u32 = 16_384;
