//! Core functionality for the image stack viewer
//!
//! This crate owns the page selection state machine, the validated image
//! stack and the viewer configuration. Nothing in here draws; rendering lives
//! in `sv-render` and the widgets in `sv-views`.

pub mod config;
pub mod navigation;
pub mod stack;

use thiserror::Error;

// Re-export commonly used types
pub use config::{ColormapKind, ScaleMode, SliderStyle, ViewerConfig};
pub use navigation::{
    InputSource, PageChange, PageSelector, PageSubscriber, RangeInput, subscriber_from_fn,
};
pub use stack::ImageStack;

/// Errors raised while constructing selectors, stacks or configuration
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("invalid page range: need at least one page, got {0}")]
    InvalidRange(usize),

    #[error("image stack shape error: {0}")]
    Shape(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ViewerError {
    fn from(error: serde_json::Error) -> Self {
        ViewerError::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
