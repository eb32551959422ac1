//! Rendering abstraction layer
//!
//! Widgets never talk to a GUI toolkit directly. They draw into a
//! [`RenderSurface`], which is passed to them explicitly at construction.
//! [`Scene`] is the retained implementation used both headless (tests) and
//! by the egui front end, which paints a scene once per frame.
//!
//! Coordinates are normalized figure coordinates: `(0, 0)` is the top-left
//! corner of the drawing area and `(1, 1)` the bottom-right one.

pub mod colormap;
mod scene;
mod surface;

pub use egui::{pos2, vec2, Align2, Color32, Pos2, Rect, Vec2};
pub use sv_core::ColormapKind;

pub use colormap::{colormap_color, colorize, legend_ticks, normalize};
pub use scene::{FilledRect, ImageLayer, Scene, TextItem};
pub use surface::{
    dispatch_pointer, HitTarget, PointerEvent, PointerHandler, PointerKind, PointerSense,
    RenderSurface, SharedSurface,
};
