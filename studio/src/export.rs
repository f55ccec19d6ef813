//! Export: rasterizes a scene to PNG bytes.
//!
//! The scene is first rendered to SVG ([`crate::render`]), parsed with
//! `usvg`, drawn by `resvg` onto a `tiny-skia` pixmap scaled by the resolution
//! multiplier, and finally PNG-encoded. Export reads the scene and never
//! mutates it; a failure leaves the session fully editable.
//!
//! Text needs a font face. The exporter resolves one when it is built: the
//! first configured family present in the font database, else any loaded
//! face. The generic families are pointed at it so the SVG's trailing
//! `sans-serif` always lands on a real face. With no face at all, exporting a
//! scene that contains text fails with [`ExportError::MissingFont`].

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::env::VarError;
use std::path::PathBuf;

use resvg::usvg::fontdb::{self, Family, Query, Stretch, Style, Weight};
use resvg::{tiny_skia, usvg};
use tracing::{info, warn};

use crate::bitmap::BitmapError;
use crate::consts::{DEFAULT_EXPORT_MULTIPLIER, DEFAULT_FONT_FAMILY, MAX_EXPORT_EDGE_PX};
use crate::doc::{ObjectId, ObjectKind, Scene};
use crate::platform::Platform;
use crate::render;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid resolution multiplier: {0}")]
    InvalidMultiplier(f32),
    #[error("object {id} has invalid geometry")]
    InvalidGeometry { id: ObjectId },
    #[error("embedded image: {0}")]
    Bitmap(#[from] BitmapError),
    #[error("svg document rejected: {0}")]
    Svg(#[from] usvg::Error),
    #[error("cannot allocate {width}x{height} surface")]
    Surface { width: u32, height: u32 },
    #[error("png encode failed: {0}")]
    Encode(String),
    #[error("svg serialization failed")]
    Format(#[from] std::fmt::Error),
    #[error("no font face available for `{families}`")]
    MissingFont { families: String },
}

/// Export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Resolution multiplier used by [`Exporter::export_default`].
    pub multiplier: f32,
    /// CSS font-family list applied to every text object.
    pub font_family: String,
    /// Load the host's installed fonts for text rendering.
    pub load_system_fonts: bool,
    /// Extra directory of font files, loaded after the system fonts.
    pub font_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_EXPORT_MULTIPLIER,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            load_system_fonts: true,
            font_dir: None,
        }
    }
}

impl ExportConfig {
    /// Build export config from environment variables.
    ///
    /// Optional:
    /// - `STUDIO_EXPORT_MULTIPLIER`: default 2
    /// - `STUDIO_FONT_FAMILY`: default `Arial, Helvetica, sans-serif`
    /// - `STUDIO_SYSTEM_FONTS`: `0`/`false` disables system font loading
    /// - `STUDIO_FONT_DIR`: extra font directory, unset by default
    ///
    /// Unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Same as [`Self::from_env`] with an explicit variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let multiplier = lookup("STUDIO_EXPORT_MULTIPLIER")
            .map(|v| v.trim().parse::<f32>().unwrap_or(f32::NAN))
            .filter(|m| valid_multiplier(*m))
            .unwrap_or(defaults.multiplier);
        let font_family = lookup("STUDIO_FONT_FAMILY")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.font_family);
        let load_system_fonts = lookup("STUDIO_SYSTEM_FONTS").map_or(defaults.load_system_fonts, |v| {
            !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
        });
        let font_dir = lookup("STUDIO_FONT_DIR").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Self { multiplier, font_family, load_system_fonts, font_dir }
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) => Some(v),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            warn!(key, value = ?raw, "ignoring non-unicode environment value");
            None
        }
    }
}

fn valid_multiplier(m: f32) -> bool {
    m.is_finite() && m > 0.0
}

/// File name the download collaborator saves an export under.
#[must_use]
pub fn export_filename(platform: Platform) -> String {
    format!("{platform}-campaign.png")
}

// =============================================================================
// EXPORTER
// =============================================================================

/// Rasterizer holding the parsed font database between exports.
pub struct Exporter {
    config: ExportConfig,
    options: usvg::Options<'static>,
    /// Family list written into the SVG; always ends in a generic family.
    svg_font_family: String,
    /// Face family text resolves to, if the database has any face.
    text_family: Option<String>,
}

impl Exporter {
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let mut options = usvg::Options::default();
        if config.load_system_fonts {
            options.fontdb_mut().load_system_fonts();
        }
        if let Some(dir) = &config.font_dir {
            options.fontdb_mut().load_fonts_dir(dir);
        }

        let text_family = resolve_family(&options.fontdb, &config.font_family);
        match &text_family {
            Some(name) => {
                options.font_family.clone_from(name);
                let db = options.fontdb_mut();
                db.set_sans_serif_family(name.clone());
                db.set_serif_family(name.clone());
            }
            None => warn!(
                families = %config.font_family,
                "no font face available; scenes with text will not export"
            ),
        }

        info!(
            fonts = options.fontdb.len(),
            family = text_family.as_deref().unwrap_or("-"),
            multiplier = config.multiplier,
            "exporter ready"
        );
        let svg_font_family = svg_font_family(&config.font_family);
        Self { config, options, svg_font_family, text_family }
    }

    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The font family text is drawn with, or `None` when no face is loaded.
    #[must_use]
    pub fn text_family(&self) -> Option<&str> {
        self.text_family.as_deref()
    }

    /// Export at the configured multiplier.
    ///
    /// # Errors
    ///
    /// See [`Self::export`].
    pub fn export_default(&self, scene: &Scene) -> Result<Vec<u8>, ExportError> {
        self.export(scene, self.config.multiplier)
    }

    /// Rasterize the scene at `canvas size × multiplier` and encode it as PNG.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMultiplier` for non-positive or non-finite multipliers,
    /// `InvalidGeometry` for undrawable objects, `Surface` when the raster
    /// would be empty or exceed the size limit, `MissingFont` when the scene
    /// has visible text and no face is loaded, and `Svg`, `Bitmap` or
    /// `Encode` when a pipeline stage fails.
    pub fn export(&self, scene: &Scene, multiplier: f32) -> Result<Vec<u8>, ExportError> {
        if !valid_multiplier(multiplier) {
            return Err(ExportError::InvalidMultiplier(multiplier));
        }
        let size = scene.canvas_size();
        let width = scaled_edge(size.width, multiplier);
        let height = scaled_edge(size.height, multiplier);
        if width == 0 || height == 0 || width > MAX_EXPORT_EDGE_PX || height > MAX_EXPORT_EDGE_PX {
            return Err(ExportError::Surface { width, height });
        }

        if self.text_family.is_none() && has_visible_text(scene) {
            return Err(ExportError::MissingFont { families: self.config.font_family.clone() });
        }

        let svg = render::to_svg(scene, &self.svg_font_family)?;
        let tree = usvg::Tree::from_str(&svg, &self.options)?;
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;
        resvg::render(&tree, tiny_skia::Transform::from_scale(multiplier, multiplier), &mut pixmap.as_mut());

        let png = pixmap.encode_png().map_err(|e| ExportError::Encode(e.to_string()))?;
        info!(width, height, objects = scene.len(), bytes = png.len(), "exported scene");
        Ok(png)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

/// Device pixels for one canvas edge; saturates instead of wrapping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_edge(edge: u32, multiplier: f32) -> u32 {
    (f64::from(edge) * f64::from(multiplier)).round().min(f64::from(u32::MAX)) as u32
}

// =============================================================================
// FONTS
// =============================================================================

const GENERIC_FAMILIES: [&str; 5] = ["serif", "sans-serif", "monospace", "cursive", "fantasy"];

fn family_names(families: &str) -> impl Iterator<Item = &str> {
    families.split(',').map(|f| f.trim().trim_matches(['"', '\''])).filter(|f| !f.is_empty())
}

fn is_generic(name: &str) -> bool {
    GENERIC_FAMILIES.iter().any(|g| g.eq_ignore_ascii_case(name))
}

/// First named family present in the database, else the first loaded face.
fn resolve_family(db: &fontdb::Database, families: &str) -> Option<String> {
    for name in family_names(families).filter(|n| !is_generic(n)) {
        let wanted = [Family::Name(name)];
        let query = Query { families: &wanted, weight: Weight::NORMAL, stretch: Stretch::Normal, style: Style::Normal };
        if db.query(&query).is_some() {
            return Some(name.to_string());
        }
    }
    db.faces().find_map(|face| face.families.first().map(|(name, _)| name.clone()))
}

/// The configured list with `sans-serif` appended unless it already ends in
/// a generic family.
fn svg_font_family(families: &str) -> String {
    match family_names(families).last() {
        Some(last) if is_generic(last) => families.trim().to_string(),
        Some(_) => format!("{}, sans-serif", families.trim()),
        None => "sans-serif".to_string(),
    }
}

fn has_visible_text(scene: &Scene) -> bool {
    scene.objects().iter().any(|o| matches!(&o.kind, ObjectKind::Text(style) if !style.content.trim().is_empty()))
}
