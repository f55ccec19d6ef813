//! Rendering: translates a scene into a standalone SVG document.
//!
//! This module receives a read-only view of the scene and produces markup; it
//! never mutates application state. Each object becomes one group translated
//! to its position and scaled by its scale factors, emitted in paint order.
//! Gradients and drop shadows are collected into `<defs>` and referenced by
//! per-object ids.
//!
//! Geometry is validated here: non-finite positions, negative sizes and
//! degenerate font sizes fail the whole render with
//! [`ExportError::InvalidGeometry`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use crate::consts::{ASCENT_RATIO, GLYPH_ADVANCE_RATIO, LINE_HEIGHT_RATIO};
use crate::doc::{DrawableObject, ObjectKind, Scene, TextStyle};
use crate::export::ExportError;
use crate::geom::Size;
use crate::style::{Color, Fill, LinearGradient, Shadow, TextAnchor};

/// Render the scene as an SVG document sized to the canvas.
///
/// # Errors
///
/// Returns `InvalidGeometry` for an object that cannot be drawn, and
/// `Bitmap` if an embedded image fails to encode.
pub fn to_svg(scene: &Scene, font_family: &str) -> Result<String, ExportError> {
    let size = scene.canvas_size();
    let mut defs = String::new();
    let mut body = String::new();

    for (index, obj) in scene.objects().iter().enumerate() {
        validate(obj)?;
        draw_object(&mut defs, &mut body, index, obj, size, font_family)?;
    }

    let mut svg = String::with_capacity(defs.len() + body.len() + 256);
    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width,
        h = size.height,
    )?;
    if !defs.is_empty() {
        write!(svg, "<defs>{defs}</defs>")?;
    }
    svg.push_str(&body);
    svg.push_str("</svg>");
    Ok(svg)
}

// =============================================================
// Validation
// =============================================================

fn validate(obj: &DrawableObject) -> Result<(), ExportError> {
    let ok = obj.position.is_finite()
        && obj.scale.is_valid()
        && match &obj.kind {
            ObjectKind::Background { .. } | ObjectKind::Image { .. } => true,
            ObjectKind::Rect { width, height, stroke_width, corner_radius, .. } => {
                non_negative(*width)
                    && non_negative(*height)
                    && non_negative(*stroke_width)
                    && corner_radius.is_none_or(non_negative)
            }
            ObjectKind::Circle { radius, stroke_width, .. } => non_negative(*radius) && non_negative(*stroke_width),
            ObjectKind::Text(style) => {
                style.font_size.is_finite()
                    && style.font_size > 0.0
                    && style.wrap_width.is_none_or(|w| w.is_finite() && w > 0.0)
            }
        };
    if ok { Ok(()) } else { Err(ExportError::InvalidGeometry { id: obj.id }) }
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

// =============================================================
// Object dispatch
// =============================================================

fn draw_object(
    defs: &mut String,
    out: &mut String,
    index: usize,
    obj: &DrawableObject,
    size: Size,
    font_family: &str,
) -> Result<(), ExportError> {
    if let ObjectKind::Background { fill } = &obj.kind {
        return draw_background(defs, out, index, fill, size);
    }

    write!(
        out,
        r#"<g transform="translate({} {}) scale({} {})">"#,
        obj.position.x, obj.position.y, obj.scale.sx, obj.scale.sy
    )?;
    match &obj.kind {
        ObjectKind::Background { .. } => {}
        ObjectKind::Image { bitmap } => {
            write!(
                out,
                r#"<image width="{}" height="{}" preserveAspectRatio="none" xlink:href="{}"/>"#,
                bitmap.width(),
                bitmap.height(),
                bitmap.to_data_uri()?
            )?;
        }
        ObjectKind::Text(style) => draw_text(defs, out, index, style, font_family)?,
        ObjectKind::Rect { width, height, fill, stroke, stroke_width, corner_radius } => {
            write!(out, r#"<rect width="{width}" height="{height}""#)?;
            if let Some(r) = corner_radius {
                write!(out, r#" rx="{r}" ry="{r}""#)?;
            }
            paint_attrs(out, *fill, *stroke, *stroke_width)?;
            out.push_str("/>");
        }
        ObjectKind::Circle { radius, fill, stroke, stroke_width } => {
            write!(out, r#"<circle cx="{radius}" cy="{radius}" r="{radius}""#)?;
            paint_attrs(out, *fill, *stroke, *stroke_width)?;
            out.push_str("/>");
        }
    }
    out.push_str("</g>");
    Ok(())
}

fn draw_background(
    defs: &mut String,
    out: &mut String,
    index: usize,
    fill: &Fill,
    size: Size,
) -> Result<(), ExportError> {
    write!(out, r#"<rect x="0" y="0" width="{}" height="{}""#, size.width, size.height)?;
    match fill {
        Fill::Solid(color) => color_attr(out, "fill", *color)?,
        Fill::Linear(gradient) => {
            let id = format!("fill-{index}");
            gradient_def(defs, &id, gradient)?;
            write!(out, r#" fill="url(#{id})""#)?;
        }
    }
    out.push_str("/>");
    Ok(())
}

fn draw_text(
    defs: &mut String,
    out: &mut String,
    index: usize,
    style: &TextStyle,
    font_family: &str,
) -> Result<(), ExportError> {
    let lines = wrap_lines(&style.content, style.font_size, style.wrap_width);
    if lines.is_empty() {
        return Ok(());
    }

    write!(
        out,
        r#"<text font-family="{}" font-size="{}" font-weight="{}""#,
        escape(font_family),
        style.font_size,
        style.font_weight.as_css()
    )?;
    color_attr(out, "fill", style.fill)?;
    if let Some(shadow) = style.shadow {
        let id = format!("shadow-{index}");
        shadow_def(defs, &id, shadow)?;
        write!(out, r#" filter="url(#{id})""#)?;
    }
    if style.anchor == TextAnchor::Center {
        out.push_str(r#" text-anchor="middle""#);
    }
    out.push('>');

    let line_height = style.font_size * LINE_HEIGHT_RATIO;
    #[allow(clippy::cast_precision_loss)]
    let first_baseline = match style.anchor {
        TextAnchor::TopLeft => style.font_size * ASCENT_RATIO,
        TextAnchor::Center => {
            let block = line_height * lines.len() as f64;
            -block / 2.0 + (line_height - style.font_size) / 2.0 + style.font_size * ASCENT_RATIO
        }
    };
    for (i, line) in lines.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let y = first_baseline + line_height * i as f64;
        write!(out, r#"<tspan x="0" y="{y}">{}</tspan>"#, escape(line))?;
    }
    out.push_str("</text>");
    Ok(())
}

// =============================================================
// Paint helpers
// =============================================================

fn paint_attrs(out: &mut String, fill: Color, stroke: Option<Color>, stroke_width: f64) -> Result<(), ExportError> {
    color_attr(out, "fill", fill)?;
    if let Some(stroke) = stroke.filter(|_| stroke_width > 0.0) {
        color_attr(out, "stroke", stroke)?;
        write!(out, r#" stroke-width="{stroke_width}""#)?;
    }
    Ok(())
}

/// `fill="#rrggbb"` plus `fill-opacity` when the color is translucent.
fn color_attr(out: &mut String, name: &str, color: Color) -> Result<(), ExportError> {
    write!(out, r#" {name}="{}""#, color.to_hex())?;
    if !color.is_opaque() {
        write!(out, r#" {name}-opacity="{}""#, color.opacity())?;
    }
    Ok(())
}

fn gradient_def(defs: &mut String, id: &str, gradient: &LinearGradient) -> Result<(), ExportError> {
    let (x1, y1, x2, y2) = gradient.vector();
    write!(defs, r#"<linearGradient id="{id}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}">"#)?;
    for stop in &gradient.stops {
        write!(defs, r#"<stop offset="{}" stop-color="{}""#, stop.offset.clamp(0.0, 1.0), stop.color.to_hex())?;
        if !stop.color.is_opaque() {
            write!(defs, r#" stop-opacity="{}""#, stop.color.opacity())?;
        }
        defs.push_str("/>");
    }
    defs.push_str("</linearGradient>");
    Ok(())
}

fn shadow_def(defs: &mut String, id: &str, shadow: Shadow) -> Result<(), ExportError> {
    write!(
        defs,
        r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
        shadow.offset_x,
        shadow.offset_y,
        shadow.blur / 2.0,
        shadow.color.to_hex(),
        shadow.color.opacity()
    )?;
    Ok(())
}

// =============================================================
// Text layout
// =============================================================

/// Split text into rendered lines.
///
/// Explicit newlines always break. With a wrap width, words are packed
/// greedily using an average glyph advance; a single word wider than the
/// limit gets a line of its own. Blank content yields no lines.
#[must_use]
pub fn wrap_lines(content: &str, font_size: f64, wrap_width: Option<f64>) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    let Some(limit) = wrap_width else {
        return content.lines().map(str::to_string).collect();
    };

    let advance = font_size * GLYPH_ADVANCE_RATIO;
    #[allow(clippy::cast_precision_loss)]
    let width_of = |s: &str| s.chars().count() as f64 * advance;

    let mut lines = Vec::new();
    for paragraph in content.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if width_of(&current) + advance + width_of(word) <= limit {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

/// Escape text for use in XML character data and attribute values.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
