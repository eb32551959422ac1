//! Page selector implementation

use super::{InputSource, PageChange, PageSubscriber, RangeInput};
use crate::{Result, ViewerError};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// Selector state stored internally
#[derive(Debug, Clone)]
struct SelectorState {
    current: usize,
    highlighted: usize,
    slider: RangeInput,
}

/// Single source of truth for which page of a stack is selected.
///
/// Three input surfaces feed it: [`step_forward`](Self::step_forward),
/// [`step_backward`](Self::step_backward) and
/// [`set_from_continuous_input`](Self::set_from_continuous_input). Requests
/// that would leave `[0, num_pages)` are ignored rather than reported, and
/// every accepted change is pushed to the subscribers in registration order
/// before the call returns.
///
/// Cloning yields another handle onto the same state.
#[derive(Clone)]
pub struct PageSelector {
    num_pages: usize,
    state: Arc<RwLock<SelectorState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn PageSubscriber>>>>,
}

impl PageSelector {
    /// Create a selector over `num_pages` pages.
    ///
    /// `initial_index` is clamped into range without complaint.
    pub fn new(num_pages: usize, initial_index: i64) -> Result<Self> {
        if num_pages == 0 {
            return Err(ViewerError::InvalidRange(num_pages));
        }

        let last = i64::try_from(num_pages - 1).unwrap_or(i64::MAX);
        let current = initial_index.clamp(0, last) as usize;

        let state = SelectorState {
            current,
            highlighted: current,
            slider: RangeInput::new(0.0, num_pages as f64, current as f64),
        };

        Ok(Self {
            num_pages,
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        })
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn current_index(&self) -> usize {
        self.state.read().current
    }

    /// The page drawn as active. Always equals the current index.
    pub fn highlighted_page(&self) -> usize {
        self.state.read().highlighted
    }

    pub fn is_highlighted(&self, page: usize) -> bool {
        self.highlighted_page() == page
    }

    /// Raw value of the continuous input, in `[0, num_pages]`
    pub fn slider_value(&self) -> f64 {
        self.state.read().slider.value()
    }

    /// Advance one page. Does nothing on the last page.
    pub fn step_forward(&self) -> bool {
        self.transition(InputSource::Forward, |state| {
            let candidate = state.current + 1;
            if candidate >= self.num_pages {
                trace!("step forward ignored at last page {}", state.current);
                return None;
            }
            Some((candidate, candidate as f64))
        })
    }

    /// Go back one page. Does nothing on the first page.
    pub fn step_backward(&self) -> bool {
        self.transition(InputSource::Backward, |state| {
            let Some(candidate) = state.current.checked_sub(1) else {
                trace!("step backward ignored at first page");
                return None;
            };
            Some((candidate, candidate as f64))
        })
    }

    /// Apply a raw value from the continuous input.
    ///
    /// The value is clamped to `[0, num_pages]` and truncated to a page. The
    /// top of the range (`num_pages` itself) has no page and is ignored, as is
    /// NaN. Any other value is accepted and notified, even when it lands on
    /// the current page.
    pub fn set_from_continuous_input(&self, raw: f64) -> bool {
        self.transition(InputSource::Continuous, |state| {
            let value = state.slider.clamp(raw)?;
            let page = value.floor() as usize;
            if page >= self.num_pages {
                trace!("continuous input {} ignored at upper bound", raw);
                return None;
            }
            Some((page, value))
        })
    }

    /// Add a subscriber. Only a weak reference is kept.
    pub fn add_subscriber(&self, subscriber: Arc<dyn PageSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Number of subscribers that are still alive
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Decide, mutate, then notify. `decide` returns the target page and the
    /// slider value to store, or `None` to reject the request untouched.
    fn transition<F>(&self, source: InputSource, decide: F) -> bool
    where
        F: FnOnce(&SelectorState) -> Option<(usize, f64)>,
    {
        let change = {
            let mut state = self.state.write();
            let Some((target, slider_value)) = decide(&state) else {
                return false;
            };

            state.slider.set(slider_value);

            let previous = state.current;
            state.current = target;
            state.highlighted = target;

            PageChange {
                previous,
                current: target,
                num_pages: self.num_pages,
                source,
            }
        };

        debug!(
            "page {} -> {} of {} ({:?})",
            change.previous, change.current, change.num_pages, change.source
        );
        self.notify_subscribers(&change);
        true
    }

    /// Notify all subscribers of a page change
    fn notify_subscribers(&self, change: &PageChange) {
        let live: Vec<Arc<dyn PageSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in live {
            subscriber.on_page_change(change);
        }
    }
}

impl fmt::Debug for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("PageSelector")
            .field("num_pages", &self.num_pages)
            .field("current", &state.current)
            .field("slider", &state.slider.value())
            .finish()
    }
}
