//! Widgets for the image stack viewer
//!
//! [`PageSlider`] turns pointer input into page changes, [`ImageStackViewer`]
//! shows the selected slice with its title and color bar.

mod image_viewer;
pub mod layout;
mod page_slider;
pub mod stats;

pub use image_viewer::{title_text, ImageStackViewer};
pub use layout::{FigureLayout, SliderLayout};
pub use page_slider::PageSlider;
