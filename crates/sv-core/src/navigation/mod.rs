//! Page navigation: the selector state machine and its observers

mod range;
mod selector;
mod subscriber;

pub use range::RangeInput;
pub use selector::PageSelector;
pub use subscriber::{subscriber_from_fn, FnSubscriber, PageSubscriber};

/// Which input surface produced a page change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// The "next page" button
    Forward,
    /// The "previous page" button
    Backward,
    /// Dragging or clicking along the page strip
    Continuous,
}

/// Context passed to subscribers after an accepted page change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub previous: usize,
    pub current: usize,
    pub num_pages: usize,
    pub source: InputSource,
}
