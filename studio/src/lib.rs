//! Scene composition and editing engine for the campaign studio.
//!
//! This crate owns the full lifecycle of a marketing-graphic scene: building
//! the initial object list from campaign data, mediating tool and selection
//! driven edits, and rasterizing the result to PNG. The host layer (a UI, the
//! CLI) is responsible only for collecting campaign input, wiring surface
//! events to the engine, and saving the exported bytes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Tool & selection controller ([`engine::EngineCore`]) and its [`engine::Action`] events |
//! | [`doc`] | Drawable object model and the ordered [`doc::Scene`] |
//! | [`template`] | Builds the starting scene from a [`campaign::CampaignSpec`] |
//! | [`campaign`] | Campaign input types and the template catalog |
//! | [`platform`] | Platform identifiers and canvas dimensions |
//! | [`input`] | Tools and UI state |
//! | [`bitmap`] | Decoding raw image bytes into shared RGBA bitmaps |
//! | [`geom`] / [`style`] | Shared value types: points, sizes, colors, fills, shadows |
//! | [`render`] | Scene to SVG document translation |
//! | [`export`] | Rasterization and PNG encoding |
//! | [`consts`] | Default sizes, positions and colors |

pub mod bitmap;
pub mod campaign;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod export;
pub mod geom;
pub mod input;
pub mod platform;
pub mod render;
pub mod style;
pub mod template;
