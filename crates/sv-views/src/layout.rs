//! Figure layout in normalized coordinates

use sv_render::{pos2, Pos2, Rect};

/// Regions of the page slider: the tile strip and its two buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderLayout {
    /// Strip holding one tile per page
    pub track: Rect,
    pub back_button: Rect,
    pub forward_button: Rect,
    /// Right edge of the slider label
    pub label_anchor: Pos2,
}

impl SliderLayout {
    /// Region of tile `page` out of `num_pages`
    pub fn tile(&self, page: usize, num_pages: usize) -> Rect {
        let width = self.track.width() / num_pages.max(1) as f32;
        let left = self.track.left() + page as f32 * width;
        Rect::from_min_max(
            pos2(left, self.track.top()),
            pos2(left + width, self.track.bottom()),
        )
    }
}

/// Placement of everything the image viewer draws.
///
/// The defaults follow the lab's usual figure proportions: image
/// axes in the upper left, a slim color bar to their right and the page
/// slider along the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    pub image: Rect,
    pub legend: Rect,
    pub title_anchor: Pos2,
    pub x_label_anchor: Pos2,
    pub y_label_anchor: Pos2,
    pub slider: SliderLayout,
}

impl Default for FigureLayout {
    fn default() -> Self {
        let image = Rect::from_min_max(pos2(0.10, 0.15), pos2(0.75, 0.75));
        let legend = Rect::from_min_max(pos2(0.80, 0.15), pos2(0.84, 0.75));

        // Slider strip with two buttons carved off its right end
        let (top, bottom) = (0.91, 0.95);
        let (button_width, pad) = (0.04, 0.005);
        let right = 0.95;
        let forward_button =
            Rect::from_min_max(pos2(right - button_width, top), pos2(right, bottom));
        let back_left = forward_button.left() - pad - button_width;
        let back_button =
            Rect::from_min_max(pos2(back_left, top), pos2(back_left + button_width, bottom));
        let track = Rect::from_min_max(pos2(0.15, top), pos2(back_left - pad, bottom));

        Self {
            image,
            legend,
            title_anchor: pos2(image.center().x, image.top() - 0.01),
            x_label_anchor: pos2(image.center().x, image.bottom() + 0.04),
            y_label_anchor: pos2(0.005, image.center().y),
            slider: SliderLayout {
                track,
                back_button,
                forward_button,
                label_anchor: pos2(track.left() - 0.01, track.center().y),
            },
        }
    }
}
