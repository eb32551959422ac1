//! Page subscriber trait

use super::PageChange;
use std::sync::Arc;

/// Trait for components that need to respond to page changes
pub trait PageSubscriber: Send + Sync {
    /// Called after the selector accepted an input.
    ///
    /// Implementations must not call back into the selector's stepping
    /// methods from here.
    fn on_page_change(&self, change: &PageChange);
}

/// Subscriber backed by a closure
pub struct FnSubscriber<F> {
    handler: F,
}

impl<F> PageSubscriber for FnSubscriber<F>
where
    F: Fn(&PageChange) + Send + Sync,
{
    fn on_page_change(&self, change: &PageChange) {
        (self.handler)(change);
    }
}

/// Create a subscriber from a closure.
///
/// The selector only keeps a weak reference, so the caller owns the returned
/// `Arc` for as long as notifications are wanted.
pub fn subscriber_from_fn<F>(f: F) -> Arc<dyn PageSubscriber>
where
    F: Fn(&PageChange) + Send + Sync + 'static,
{
    Arc::new(FnSubscriber { handler: f })
}
