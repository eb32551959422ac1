//! The render surface contract and pointer dispatch

use std::sync::Arc;

use egui::{Align2, Color32, Pos2, Rect, Vec2};
use ndarray::ArrayView2;
use parking_lot::Mutex;
use sv_core::ColormapKind;
use tracing::trace;

/// Kind of pointer event delivered to a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Primary button pressed and released in place
    Press,
    /// Pointer moved with the primary button held
    Drag,
}

/// Which pointer events a handler region wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSense {
    Click,
    ClickAndDrag,
}

impl PointerSense {
    pub fn accepts(self, kind: PointerKind) -> bool {
        match self {
            PointerSense::Click => kind == PointerKind::Press,
            PointerSense::ClickAndDrag => true,
        }
    }
}

/// Pointer event as seen by a handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Position in figure coordinates
    pub position: Pos2,
    /// Position relative to the handler region, `(0, 0)` to `(1, 1)`
    pub local: Vec2,
}

pub type PointerHandler = Arc<dyn Fn(PointerEvent) + Send + Sync>;

/// A registered handler together with the region it listens on
#[derive(Clone)]
pub struct HitTarget {
    pub region: Rect,
    pub handler: PointerHandler,
}

/// Drawing operations the widgets need from a backend.
///
/// Implementations are retained: a rectangle drawn over exactly the same
/// region replaces the earlier one, and text drawn at the same anchor
/// replaces the earlier text. Nothing reaches the screen until
/// [`request_redraw`](Self::request_redraw).
pub trait RenderSurface: Send {
    /// Fill a rectangular region
    fn draw_rect(&mut self, region: Rect, fill: Color32);

    /// Fill used while the pointer hovers `region`
    fn set_hover_fill(&mut self, region: Rect, fill: Color32);

    /// Place text relative to `anchor`
    fn draw_text(&mut self, anchor: Pos2, text: &str, align: Align2, size: f32);

    /// Where the image and its color bar go, and how values map to colors
    fn configure_image(&mut self, image: Rect, legend: Option<Rect>, colormap: ColormapKind);

    /// Replace the displayed raster
    fn set_image_data(&mut self, raster: ArrayView2<'_, f64>);

    /// Value range mapped onto the colormap for the image
    fn set_color_range(&mut self, min: f64, max: f64);

    /// Value range printed on the color bar
    fn set_legend_range(&mut self, min: f64, max: f64);

    fn request_redraw(&mut self);

    /// Call `handler` for pointer events inside `region` that `sense` accepts
    fn register_click_handler(&mut self, region: Rect, sense: PointerSense, handler: PointerHandler);

    /// Topmost handler under `point` accepting `kind`
    fn handler_at(&self, point: Pos2, kind: PointerKind) -> Option<HitTarget>;
}

/// Surface shared between the widgets drawing into it and the front end
pub type SharedSurface = Arc<Mutex<dyn RenderSurface>>;

/// Route a pointer event to the handler under it.
///
/// The surface lock is released before the handler runs, so handlers are
/// free to draw.
pub fn dispatch_pointer(surface: &SharedSurface, point: Pos2, kind: PointerKind) -> bool {
    let target = surface.lock().handler_at(point, kind);
    let Some(target) = target else {
        return false;
    };

    let size = target.region.size();
    let offset = point - target.region.min;
    let local = Vec2::new(
        if size.x > 0.0 { offset.x / size.x } else { 0.0 },
        if size.y > 0.0 { offset.y / size.y } else { 0.0 },
    );
    trace!("pointer {:?} at {:?} -> local {:?}", kind, point, local);

    (target.handler)(PointerEvent {
        kind,
        position: point,
        local,
    });
    true
}
