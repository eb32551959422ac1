//! Retained scene: the in-memory render surface

use egui::{Align2, Color32, Pos2, Rect};
use ndarray::{Array2, ArrayView2};
use sv_core::ColormapKind;

use crate::surface::{HitTarget, PointerHandler, PointerKind, PointerSense, RenderSurface};

/// A filled rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRect {
    pub region: Rect,
    pub fill: Color32,
    pub hover_fill: Option<Color32>,
}

/// A piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub anchor: Pos2,
    pub text: String,
    pub align: Align2,
    pub size: f32,
}

/// The raster layer and its color bar
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayer {
    pub region: Rect,
    pub legend: Option<Rect>,
    pub colormap: ColormapKind,
    pub raster: Option<Array2<f64>>,
    pub color_range: (f64, f64),
    pub legend_range: (f64, f64),
    /// Bumped whenever the raster or its color range changes
    pub generation: u64,
}

impl Default for ImageLayer {
    fn default() -> Self {
        Self {
            region: Rect::NOTHING,
            legend: None,
            colormap: ColormapKind::default(),
            raster: None,
            color_range: (0.0, 1.0),
            legend_range: (0.0, 1.0),
            generation: 0,
        }
    }
}

struct Hotspot {
    region: Rect,
    sense: PointerSense,
    handler: PointerHandler,
}

/// Retained render surface.
///
/// Holds whatever the widgets drew last. A front end paints it; tests inspect
/// it directly.
#[derive(Default)]
pub struct Scene {
    rects: Vec<FilledRect>,
    texts: Vec<TextItem>,
    image: ImageLayer,
    hotspots: Vec<Hotspot>,
    redraw_pending: bool,
    redraw_count: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> &[FilledRect] {
        &self.rects
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn image(&self) -> &ImageLayer {
        &self.image
    }

    /// Fill of the rectangle drawn exactly over `region`
    pub fn fill_at(&self, region: Rect) -> Option<Color32> {
        self.rects.iter().find(|r| r.region == region).map(|r| r.fill)
    }

    /// Text drawn at exactly `anchor`
    pub fn text_at(&self, anchor: Pos2) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.anchor == anchor)
            .map(|t| t.text.as_str())
    }

    /// Number of regions listening for pointer events
    pub fn hotspot_count(&self) -> usize {
        self.hotspots.len()
    }

    /// Total redraw requests received so far
    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }

    /// Consume the pending redraw flag
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }
}

impl RenderSurface for Scene {
    fn draw_rect(&mut self, region: Rect, fill: Color32) {
        match self.rects.iter_mut().find(|r| r.region == region) {
            Some(existing) => existing.fill = fill,
            None => self.rects.push(FilledRect {
                region,
                fill,
                hover_fill: None,
            }),
        }
    }

    fn set_hover_fill(&mut self, region: Rect, fill: Color32) {
        if let Some(existing) = self.rects.iter_mut().find(|r| r.region == region) {
            existing.hover_fill = Some(fill);
        }
    }

    fn draw_text(&mut self, anchor: Pos2, text: &str, align: Align2, size: f32) {
        let item = TextItem {
            anchor,
            text: text.to_string(),
            align,
            size,
        };
        match self.texts.iter_mut().find(|t| t.anchor == anchor) {
            Some(existing) => *existing = item,
            None => self.texts.push(item),
        }
    }

    fn configure_image(&mut self, image: Rect, legend: Option<Rect>, colormap: ColormapKind) {
        self.image.region = image;
        self.image.legend = legend;
        self.image.colormap = colormap;
        self.image.generation += 1;
    }

    fn set_image_data(&mut self, raster: ArrayView2<'_, f64>) {
        self.image.raster = Some(raster.to_owned());
        self.image.generation += 1;
    }

    fn set_color_range(&mut self, min: f64, max: f64) {
        if self.image.color_range != (min, max) {
            self.image.color_range = (min, max);
            self.image.generation += 1;
        }
    }

    fn set_legend_range(&mut self, min: f64, max: f64) {
        self.image.legend_range = (min, max);
    }

    fn request_redraw(&mut self) {
        self.redraw_pending = true;
        self.redraw_count += 1;
    }

    fn register_click_handler(&mut self, region: Rect, sense: PointerSense, handler: PointerHandler) {
        self.hotspots.push(Hotspot {
            region,
            sense,
            handler,
        });
    }

    fn handler_at(&self, point: Pos2, kind: PointerKind) -> Option<HitTarget> {
        self.hotspots
            .iter()
            .rev()
            .find(|h| h.sense.accepts(kind) && h.region.contains(point))
            .map(|h| HitTarget {
                region: h.region,
                handler: h.handler.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{dispatch_pointer, SharedSurface};
    use egui::pos2;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unit(x: f32) -> Rect {
        Rect::from_min_max(pos2(x, 0.0), pos2(x + 0.1, 0.1))
    }

    #[test]
    fn test_redrawing_a_region_replaces_its_fill() {
        let mut scene = Scene::new();
        scene.draw_rect(unit(0.0), Color32::WHITE);
        scene.draw_rect(unit(0.1), Color32::WHITE);
        scene.draw_rect(unit(0.0), Color32::BLUE);

        assert_eq!(scene.rects().len(), 2);
        assert_eq!(scene.fill_at(unit(0.0)), Some(Color32::BLUE));
        assert_eq!(scene.fill_at(unit(0.1)), Some(Color32::WHITE));
    }

    #[test]
    fn test_text_at_same_anchor_is_replaced() {
        let mut scene = Scene::new();
        let anchor = pos2(0.5, 0.05);
        scene.draw_text(anchor, "image 1", Align2::CENTER_CENTER, 12.0);
        scene.draw_text(anchor, "image 2", Align2::CENTER_CENTER, 12.0);

        assert_eq!(scene.texts().len(), 1);
        assert_eq!(scene.text_at(anchor), Some("image 2"));
    }

    #[test]
    fn test_redraw_flag_is_consumed() {
        let mut scene = Scene::new();
        scene.request_redraw();
        scene.request_redraw();

        assert_eq!(scene.redraw_count(), 2);
        assert!(scene.take_redraw_request());
        assert!(!scene.take_redraw_request());
    }

    #[test]
    fn test_color_range_bumps_generation_only_on_change() {
        let mut scene = Scene::new();
        scene.set_color_range(0.0, 2.0);
        let generation = scene.image().generation;

        scene.set_color_range(0.0, 2.0);
        assert_eq!(scene.image().generation, generation);

        scene.set_legend_range(5.0, 6.0);
        assert_eq!(scene.image().generation, generation);
        assert_eq!(scene.image().legend_range, (5.0, 6.0));
    }

    #[test]
    fn test_dispatch_respects_sense() {
        let presses = Arc::new(AtomicUsize::new(0));
        let counter = presses.clone();

        let scene: SharedSurface = Arc::new(Mutex::new(Scene::new()));
        scene.lock().register_click_handler(
            unit(0.0),
            PointerSense::Click,
            Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(dispatch_pointer(&scene, pos2(0.05, 0.05), PointerKind::Press));
        assert!(!dispatch_pointer(&scene, pos2(0.05, 0.05), PointerKind::Drag));
        assert!(!dispatch_pointer(&scene, pos2(0.5, 0.5), PointerKind::Press));
        assert_eq!(presses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_reports_local_position() {
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();

        let scene: SharedSurface = Arc::new(Mutex::new(Scene::new()));
        let track = Rect::from_min_max(pos2(0.2, 0.9), pos2(0.6, 1.0));
        scene.lock().register_click_handler(
            track,
            PointerSense::ClickAndDrag,
            Arc::new(move |event: crate::surface::PointerEvent| {
                *sink.lock() = Some(event.local.x);
            }),
        );

        dispatch_pointer(&scene, pos2(0.3, 0.95), PointerKind::Drag);
        let local_x = seen.lock().clone().unwrap();
        assert!((local_x - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_handler_can_draw_during_dispatch() {
        let scene = Arc::new(Mutex::new(Scene::new()));
        let shared: SharedSurface = scene.clone();
        let target = shared.clone();

        shared.lock().register_click_handler(
            unit(0.0),
            PointerSense::Click,
            Arc::new(move |_| target.lock().draw_rect(unit(0.5), Color32::RED)),
        );

        dispatch_pointer(&shared, pos2(0.01, 0.01), PointerKind::Press);
        assert_eq!(scene.lock().fill_at(unit(0.5)), Some(Color32::RED));
    }
}
