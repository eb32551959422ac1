//! Paged slider widget
//!
//! Draws one tile per page plus "<" and ">" buttons, and feeds pointer input
//! into a [`PageSelector`]. The tile of the selected page is filled with the
//! active color, every other tile with the inactive one.

use std::sync::Arc;

use sv_core::{PageChange, PageSelector, PageSubscriber, SliderStyle};
use sv_render::{Align2, Color32, PointerEvent, PointerSense, Rect, SharedSurface};
use tracing::debug;

use crate::layout::SliderLayout;

pub struct PageSlider {
    selector: PageSelector,
    surface: SharedSurface,
    style: SliderStyle,
    layout: SliderLayout,
}

impl PageSlider {
    /// Create the slider, draw it and wire its inputs.
    ///
    /// The slider subscribes itself to `selector`, so the tile highlight is
    /// repainted before any subscriber registered later is notified.
    pub fn new(
        surface: SharedSurface,
        selector: PageSelector,
        style: SliderStyle,
        layout: SliderLayout,
    ) -> Arc<Self> {
        let slider = Arc::new(Self {
            selector,
            surface,
            style,
            layout,
        });

        slider.draw();
        slider.wire_inputs();
        slider.selector.add_subscriber(slider.clone());
        slider
    }

    pub fn selector(&self) -> &PageSelector {
        &self.selector
    }

    pub fn layout(&self) -> &SliderLayout {
        &self.layout
    }

    pub fn active_color(&self) -> Color32 {
        rgb(self.style.active_color)
    }

    pub fn inactive_color(&self) -> Color32 {
        rgb(self.style.inactive_color)
    }

    /// Region of the tile for `page`
    pub fn tile_region(&self, page: usize) -> Rect {
        self.layout.tile(page, self.selector.num_pages())
    }

    /// Paint the tiles so that only `active` uses the active color
    fn colorize(&self, active: usize) {
        let (on, off) = (self.active_color(), self.inactive_color());
        let mut surface = self.surface.lock();
        for page in 0..self.selector.num_pages() {
            let fill = if page == active { on } else { off };
            surface.draw_rect(self.tile_region(page), fill);
        }
    }

    fn draw(&self) {
        let num_pages = self.selector.num_pages();
        let size = self.style.font_size;

        self.colorize(self.selector.highlighted_page());

        let mut surface = self.surface.lock();
        for page in 0..num_pages {
            let center = self.tile_region(page).center();
            surface.draw_text(center, &(page + 1).to_string(), Align2::CENTER_CENTER, size);
        }

        surface.draw_text(
            self.layout.label_anchor,
            &self.style.label,
            Align2::RIGHT_CENTER,
            size,
        );

        for (region, label) in [
            (self.layout.back_button, "<"),
            (self.layout.forward_button, ">"),
        ] {
            surface.draw_rect(region, self.inactive_color());
            surface.set_hover_fill(region, self.active_color());
            surface.draw_text(region.center(), label, Align2::CENTER_CENTER, size);
        }
    }

    fn wire_inputs(&self) {
        let num_pages = self.selector.num_pages() as f64;
        let mut surface = self.surface.lock();

        let selector = self.selector.clone();
        surface.register_click_handler(
            self.layout.back_button,
            PointerSense::Click,
            Arc::new(move |_| {
                selector.step_backward();
            }),
        );

        let selector = self.selector.clone();
        surface.register_click_handler(
            self.layout.forward_button,
            PointerSense::Click,
            Arc::new(move |_| {
                selector.step_forward();
            }),
        );

        // The track spans [0, num_pages]; its right edge is the ignored top tick
        let selector = self.selector.clone();
        surface.register_click_handler(
            self.layout.track,
            PointerSense::ClickAndDrag,
            Arc::new(move |event: PointerEvent| {
                selector.set_from_continuous_input(event.local.x as f64 * num_pages);
            }),
        );
    }
}

impl PageSubscriber for PageSlider {
    fn on_page_change(&self, change: &PageChange) {
        debug!("highlighting page {}", change.current);
        self.colorize(change.current);
        self.surface.lock().request_redraw();
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FigureLayout;
    use parking_lot::Mutex;
    use sv_render::{dispatch_pointer, pos2, PointerKind, Scene};

    fn setup(num_pages: usize, initial: i64) -> (Arc<Mutex<Scene>>, Arc<PageSlider>) {
        let scene = Arc::new(Mutex::new(Scene::new()));
        let surface: SharedSurface = scene.clone();
        let selector = PageSelector::new(num_pages, initial).unwrap();
        let slider = PageSlider::new(
            surface,
            selector,
            SliderStyle::default(),
            FigureLayout::default().slider,
        );
        (scene, slider)
    }

    fn active_tiles(scene: &Mutex<Scene>, slider: &PageSlider) -> Vec<usize> {
        let scene = scene.lock();
        (0..slider.selector().num_pages())
            .filter(|&page| scene.fill_at(slider.tile_region(page)) == Some(slider.active_color()))
            .collect()
    }

    fn surface_of(scene: &Arc<Mutex<Scene>>) -> SharedSurface {
        scene.clone()
    }

    #[test]
    fn test_initial_draw() {
        let (scene, slider) = setup(4, 2);

        assert_eq!(active_tiles(&scene, &slider), vec![2]);

        let scene = scene.lock();
        assert_eq!(scene.text_at(slider.tile_region(0).center()), Some("1"));
        assert_eq!(scene.text_at(slider.tile_region(3).center()), Some("4"));
        assert_eq!(scene.text_at(slider.layout().back_button.center()), Some("<"));
        assert_eq!(scene.text_at(slider.layout().forward_button.center()), Some(">"));
        assert_eq!(scene.text_at(slider.layout().label_anchor), Some("Image"));
        assert_eq!(scene.hotspot_count(), 3);
    }

    #[test]
    fn test_buttons_step_and_highlight_follows() {
        let (scene, slider) = setup(3, 0);
        let surface = surface_of(&scene);
        let forward = slider.layout().forward_button.center();
        let back = slider.layout().back_button.center();

        dispatch_pointer(&surface, forward, PointerKind::Press);
        assert_eq!(slider.selector().current_index(), 1);
        assert_eq!(active_tiles(&scene, &slider), vec![1]);

        dispatch_pointer(&surface, forward, PointerKind::Press);
        dispatch_pointer(&surface, forward, PointerKind::Press);
        assert_eq!(slider.selector().current_index(), 2);
        assert_eq!(active_tiles(&scene, &slider), vec![2]);

        dispatch_pointer(&surface, back, PointerKind::Press);
        assert_eq!(active_tiles(&scene, &slider), vec![1]);
    }

    #[test]
    fn test_dragging_over_buttons_does_nothing() {
        let (scene, slider) = setup(3, 0);
        let surface = surface_of(&scene);

        let handled = dispatch_pointer(
            &surface,
            slider.layout().forward_button.center(),
            PointerKind::Drag,
        );
        assert!(!handled);
        assert_eq!(slider.selector().current_index(), 0);
    }

    #[test]
    fn test_drag_along_track_selects_tile_under_pointer() {
        let (scene, slider) = setup(5, 0);
        let surface = surface_of(&scene);

        let tile = slider.tile_region(3);
        dispatch_pointer(&surface, tile.center(), PointerKind::Drag);
        assert_eq!(slider.selector().current_index(), 3);
        assert_eq!(active_tiles(&scene, &slider), vec![3]);

        // Right edge of the track is the top of the range and is ignored
        let track = slider.layout().track;
        dispatch_pointer(
            &surface,
            pos2(track.right(), track.center().y),
            PointerKind::Press,
        );
        assert_eq!(slider.selector().current_index(), 3);
    }

    #[test]
    fn test_rejected_input_leaves_tiles_and_redraws_alone() {
        let (scene, slider) = setup(2, 1);
        let before = scene.lock().rects().to_vec();
        let redraws = scene.lock().redraw_count();

        assert!(!slider.selector().step_forward());

        assert_eq!(scene.lock().rects(), before.as_slice());
        assert_eq!(scene.lock().redraw_count(), redraws);
    }

    #[test]
    fn test_buttons_hover_with_active_color() {
        let (scene, slider) = setup(2, 0);
        let scene = scene.lock();
        let button = scene
            .rects()
            .iter()
            .find(|r| r.region == slider.layout().back_button)
            .unwrap();
        assert_eq!(button.fill, slider.inactive_color());
        assert_eq!(button.hover_fill, Some(slider.active_color()));
    }
}
