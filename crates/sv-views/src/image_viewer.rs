//! Image stack viewer: one slice of a stack, its color bar, title and page slider

use std::fmt;
use std::sync::Arc;

use ndarray::Array2;
use parking_lot::RwLock;
use sv_core::{
    ImageStack, PageChange, PageSelector, PageSubscriber, Result, ScaleMode, ViewerConfig,
};
use sv_render::{Align2, SharedSurface};
use tracing::{debug, info, warn};

use crate::layout::FigureLayout;
use crate::page_slider::PageSlider;
use crate::stats;

const TITLE_SIZE: f32 = 14.0;
const AXIS_LABEL_SIZE: f32 = 12.0;

/// Color range policy after `StackRange` has been measured
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scale {
    PerSlice,
    Fixed(f64, f64),
}

/// What the viewer last put on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
struct Displayed {
    index: usize,
    color_range: (f64, f64),
    legend_range: (f64, f64),
}

/// Viewer keeping the shown slice in step with a page slider.
///
/// Built through [`ImageStackViewer::new`] or [`ImageStackViewer::from_stack`],
/// which return it inside an `Arc` because the selector holds it as a weak
/// subscriber.
pub struct ImageStackViewer {
    stack: ImageStack,
    scale: Scale,
    rescale_legend: bool,
    layout: FigureLayout,
    surface: SharedSurface,
    slider: Arc<PageSlider>,
    displayed: RwLock<Displayed>,
}

impl ImageStackViewer {
    /// Build a viewer from individual slices.
    ///
    /// Fails with a shape error if `images` is empty or the slices differ in
    /// size.
    pub fn new(
        surface: SharedSurface,
        images: Vec<Array2<f64>>,
        config: ViewerConfig,
    ) -> Result<Arc<Self>> {
        let stack = ImageStack::from_slices(images)?;
        Self::from_stack(surface, stack, config)
    }

    /// Build a viewer over an already validated stack
    pub fn from_stack(
        surface: SharedSurface,
        stack: ImageStack,
        config: ViewerConfig,
    ) -> Result<Arc<Self>> {
        Self::with_layout(surface, stack, config, FigureLayout::default())
    }

    pub fn with_layout(
        surface: SharedSurface,
        stack: ImageStack,
        config: ViewerConfig,
        layout: FigureLayout,
    ) -> Result<Arc<Self>> {
        config.validate()?;
        let selector = PageSelector::new(stack.len(), config.initial_index)?;
        let start = selector.current_index();

        let scale = match config.scale_mode {
            ScaleMode::PerSliceAutoscale => Scale::PerSlice,
            ScaleMode::Fixed { min, max } => Scale::Fixed(min, max),
            ScaleMode::StackRange => {
                let (min, max) = stats::stack_range(&stack);
                Scale::Fixed(min, max)
            }
        };

        // The color bar starts out at the range of the first slice shown and,
        // under per-slice autoscale, stays there unless asked to follow.
        let initial_legend = match scale {
            Scale::Fixed(min, max) => (min, max),
            Scale::PerSlice => stack
                .slice(start)
                .map(stats::slice_range)
                .unwrap_or(stats::FALLBACK_RANGE),
        };

        {
            let mut surface = surface.lock();
            surface.configure_image(layout.image, Some(layout.legend), config.colormap);
            surface.set_legend_range(initial_legend.0, initial_legend.1);
            surface.draw_text(
                layout.x_label_anchor,
                "x (pixels)",
                Align2::CENTER_TOP,
                AXIS_LABEL_SIZE,
            );
            surface.draw_text(
                layout.y_label_anchor,
                "y (pixels)",
                Align2::LEFT_CENTER,
                AXIS_LABEL_SIZE,
            );
        }

        let slider = PageSlider::new(surface.clone(), selector, config.slider, layout.slider);

        let (rows, cols) = stack.slice_shape();
        info!(
            "image stack viewer: {} slices of {}x{}, scale {:?}",
            stack.len(),
            rows,
            cols,
            scale
        );

        let viewer = Arc::new(Self {
            stack,
            scale,
            rescale_legend: config.rescale_legend,
            layout,
            surface,
            slider,
            displayed: RwLock::new(Displayed {
                index: start,
                color_range: initial_legend,
                legend_range: initial_legend,
            }),
        });

        viewer.on_index_changed(start);
        viewer.selector().add_subscriber(viewer.clone());
        Ok(viewer)
    }

    /// Show slice `new_index`: raster, color range, title, then a redraw.
    ///
    /// Normally driven by the selector. An index outside the stack is logged
    /// and ignored.
    pub fn on_index_changed(&self, new_index: usize) {
        let Some(slice) = self.stack.slice(new_index) else {
            warn!(
                "ignoring slice {} outside stack of {}",
                new_index,
                self.stack.len()
            );
            return;
        };

        let color_range = match self.scale {
            Scale::Fixed(min, max) => (min, max),
            Scale::PerSlice => stats::slice_range(slice),
        };
        let follow_legend = matches!(self.scale, Scale::Fixed(..)) || self.rescale_legend;

        let mut displayed = self.displayed.write();
        {
            let mut surface = self.surface.lock();
            surface.set_image_data(slice);
            surface.set_color_range(color_range.0, color_range.1);
            if follow_legend {
                surface.set_legend_range(color_range.0, color_range.1);
                displayed.legend_range = color_range;
            }
            surface.draw_text(
                self.layout.title_anchor,
                &title_text(new_index),
                Align2::CENTER_BOTTOM,
                TITLE_SIZE,
            );
            surface.request_redraw();
        }

        displayed.index = new_index;
        displayed.color_range = color_range;
        debug!("showing slice {} with range {:?}", new_index, color_range);
    }

    /// Index of the slice on screen
    pub fn current_index(&self) -> usize {
        self.displayed.read().index
    }

    /// Color range applied to the image on screen
    pub fn color_range(&self) -> (f64, f64) {
        self.displayed.read().color_range
    }

    /// Range printed on the color bar
    pub fn legend_range(&self) -> (f64, f64) {
        self.displayed.read().legend_range
    }

    pub fn selector(&self) -> &PageSelector {
        self.slider.selector()
    }

    pub fn slider(&self) -> &Arc<PageSlider> {
        &self.slider
    }

    pub fn stack(&self) -> &ImageStack {
        &self.stack
    }

    pub fn layout(&self) -> &FigureLayout {
        &self.layout
    }
}

impl fmt::Debug for ImageStackViewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let displayed = self.displayed.read();
        f.debug_struct("ImageStackViewer")
            .field("slices", &self.stack.len())
            .field("scale", &self.scale)
            .field("index", &displayed.index)
            .field("color_range", &displayed.color_range)
            .finish()
    }
}

impl PageSubscriber for ImageStackViewer {
    fn on_page_change(&self, change: &PageChange) {
        self.on_index_changed(change.current);
    }
}

/// Title shown above the image, with a 1-based slice number
pub fn title_text(index: usize) -> String {
    format!("use slider to switch image\ndisplaying image {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use parking_lot::Mutex;
    use sv_core::ViewerError;
    use sv_render::{dispatch_pointer, PointerKind, Scene};

    fn scene_and_surface() -> (Arc<Mutex<Scene>>, SharedSurface) {
        let scene = Arc::new(Mutex::new(Scene::new()));
        let surface: SharedSurface = scene.clone();
        (scene, surface)
    }

    /// Slice `i` is filled with `i * 10 .. i * 10 + 1`
    fn ramp_slices(count: usize) -> Vec<Array2<f64>> {
        (0..count)
            .map(|i| {
                Array2::from_shape_fn((10, 10), |(r, c)| {
                    i as f64 * 10.0 + (r * 10 + c) as f64 / 99.0
                })
            })
            .collect()
    }

    fn fixed(min: f64, max: f64) -> ViewerConfig {
        ViewerConfig {
            scale_mode: ScaleMode::fixed(min, max),
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn test_fixed_scale_ignores_slice_data() {
        let (scene, surface) = scene_and_surface();
        let viewer = ImageStackViewer::new(surface, ramp_slices(3), fixed(0.0, 1.0)).unwrap();

        viewer.selector().set_from_continuous_input(2.0);
        viewer.on_index_changed(2);

        assert_eq!(viewer.current_index(), 2);
        assert_eq!(viewer.color_range(), (0.0, 1.0));
        assert_eq!(viewer.legend_range(), (0.0, 1.0));

        let scene = scene.lock();
        assert_eq!(scene.image().color_range, (0.0, 1.0));
        assert_eq!(scene.image().legend_range, (0.0, 1.0));
        assert_eq!(scene.image().raster.as_ref().unwrap()[[0, 0]], 20.0);
    }

    #[test]
    fn test_mismatched_shapes_fail() {
        let (_, surface) = scene_and_surface();
        let images = vec![Array2::zeros((10, 10)), Array2::zeros((5, 5))];
        let err = ImageStackViewer::new(surface, images, ViewerConfig::default()).unwrap_err();
        assert!(matches!(err, ViewerError::Shape(_)));
    }

    #[test]
    fn test_empty_stack_fails() {
        let (_, surface) = scene_and_surface();
        let err = ImageStackViewer::new(surface, Vec::new(), ViewerConfig::default()).unwrap_err();
        assert!(matches!(err, ViewerError::Shape(_)));
    }

    #[test]
    fn test_autoscale_rescales_image_but_not_legend() {
        let (scene, surface) = scene_and_surface();
        let viewer =
            ImageStackViewer::new(surface, ramp_slices(3), ViewerConfig::default()).unwrap();
        assert_eq!(viewer.color_range(), (0.0, 1.0));

        viewer.selector().step_forward();

        assert_eq!(viewer.current_index(), 1);
        assert_eq!(viewer.color_range(), (10.0, 11.0));
        assert_eq!(viewer.legend_range(), (0.0, 1.0));
        assert_eq!(scene.lock().image().legend_range, (0.0, 1.0));
    }

    #[test]
    fn test_rescale_legend_follows_slice() {
        let (scene, surface) = scene_and_surface();
        let config = ViewerConfig {
            rescale_legend: true,
            ..ViewerConfig::default()
        };
        let viewer = ImageStackViewer::new(surface, ramp_slices(3), config).unwrap();

        viewer.selector().step_forward();
        assert_eq!(scene.lock().image().legend_range, (10.0, 11.0));
    }

    #[test]
    fn test_stack_range_is_fixed_across_slices() {
        let (_, surface) = scene_and_surface();
        let config = ViewerConfig {
            scale_mode: ScaleMode::StackRange,
            ..ViewerConfig::default()
        };
        let viewer = ImageStackViewer::new(surface, ramp_slices(3), config).unwrap();
        assert_eq!(viewer.color_range(), (0.0, 21.0));

        viewer.selector().step_forward();
        assert_eq!(viewer.color_range(), (0.0, 21.0));
    }

    #[test]
    fn test_title_is_one_based() {
        let (scene, surface) = scene_and_surface();
        let config = ViewerConfig {
            initial_index: 1,
            ..ViewerConfig::default()
        };
        let viewer = ImageStackViewer::new(surface, ramp_slices(3), config).unwrap();
        let anchor = viewer.layout().title_anchor;

        assert_eq!(scene.lock().text_at(anchor), Some(title_text(1).as_str()));
        assert!(title_text(1).ends_with("displaying image 2"));

        viewer.selector().step_forward();
        assert!(scene.lock().text_at(anchor).unwrap().ends_with("image 3"));
    }

    #[test]
    fn test_viewer_follows_every_input_surface() {
        let (scene, surface) = scene_and_surface();
        let viewer =
            ImageStackViewer::new(surface.clone(), ramp_slices(4), ViewerConfig::default())
                .unwrap();
        let layout = *viewer.layout();

        dispatch_pointer(&surface, layout.slider.forward_button.center(), PointerKind::Press);
        assert_eq!(viewer.current_index(), 1);

        let tile = viewer.slider().tile_region(3);
        dispatch_pointer(&surface, tile.center(), PointerKind::Drag);
        assert_eq!(viewer.current_index(), 3);

        dispatch_pointer(&surface, layout.slider.back_button.center(), PointerKind::Press);
        assert_eq!(viewer.current_index(), 2);
        assert_eq!(viewer.selector().current_index(), 2);

        let raster = scene.lock().image().raster.clone().unwrap();
        assert_eq!(raster[[0, 0]], 20.0);
    }

    #[test]
    fn test_rejected_navigation_does_not_redraw() {
        let (scene, surface) = scene_and_surface();
        let viewer =
            ImageStackViewer::new(surface, ramp_slices(2), ViewerConfig::default()).unwrap();
        let redraws = scene.lock().redraw_count();

        assert!(!viewer.selector().step_backward());
        assert!(!viewer.selector().set_from_continuous_input(2.0));
        assert_eq!(scene.lock().redraw_count(), redraws);

        assert!(viewer.selector().step_forward());
        assert!(scene.lock().redraw_count() > redraws);
    }

    #[test]
    fn test_drag_within_current_tile_redraws() {
        let (scene, surface) = scene_and_surface();
        let viewer =
            ImageStackViewer::new(surface.clone(), ramp_slices(3), ViewerConfig::default())
                .unwrap();
        let redraws = scene.lock().redraw_count();

        let tile = viewer.slider().tile_region(0);
        assert!(dispatch_pointer(&surface, tile.center(), PointerKind::Drag));

        assert_eq!(viewer.current_index(), 0);
        assert!(scene.lock().redraw_count() > redraws);
        assert_eq!(
            scene.lock().text_at(viewer.layout().title_anchor),
            Some(title_text(0).as_str())
        );
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let (_, surface) = scene_and_surface();
        let viewer =
            ImageStackViewer::new(surface, ramp_slices(2), ViewerConfig::default()).unwrap();

        viewer.on_index_changed(7);
        assert_eq!(viewer.current_index(), 0);
    }

    #[test]
    fn test_axis_labels_are_drawn() {
        let (scene, surface) = scene_and_surface();
        let viewer =
            ImageStackViewer::new(surface, ramp_slices(1), ViewerConfig::default()).unwrap();
        let layout = viewer.layout();

        let scene = scene.lock();
        assert_eq!(scene.text_at(layout.x_label_anchor), Some("x (pixels)"));
        assert_eq!(scene.text_at(layout.y_label_anchor), Some("y (pixels)"));
        assert_eq!(scene.image().region, layout.image);
    }
}
