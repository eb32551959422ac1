//! User interface components for the image stack viewer
//!
//! Paints a retained [`sv_render::Scene`] with egui and feeds pointer input
//! back into it.

pub mod scene_painter;
pub mod theme;

pub use scene_painter::ScenePainter;
pub use theme::{apply_theme, Theme};
