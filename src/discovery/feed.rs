//! A live discovery view that follows its inputs.

use super::{annotate_and_filter, Discoverable, DiscoveryOptions, DiscoveryView};
use crate::geo::Coordinate;
use std::sync::Arc;
use tokio::sync::watch;

/// Keeps the latest candidates and observer and republishes the full view after
/// every change. Subscribers only ever see the view for the most recent inputs.
pub struct DiscoveryFeed<T> {
    candidates: Vec<T>,
    observer: Option<Coordinate>,
    options: DiscoveryOptions,
    view: watch::Sender<Arc<DiscoveryView<T>>>,
}

impl<T> DiscoveryFeed<T>
where
    T: Discoverable + Clone,
{
    pub fn new(options: DiscoveryOptions) -> Self {
        let (view, _) = watch::channel(Arc::new(DiscoveryView::default()));
        Self {
            candidates: Vec::new(),
            observer: None,
            options,
            view,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DiscoveryView<T>>> {
        self.view.subscribe()
    }

    pub fn current(&self) -> Arc<DiscoveryView<T>> {
        self.view.borrow().clone()
    }

    pub fn set_candidates(&mut self, candidates: Vec<T>) {
        self.candidates = candidates;
        self.recompute();
    }

    pub fn set_observer(&mut self, observer: Option<Coordinate>) {
        self.observer = observer;
        self.recompute();
    }

    pub fn set_options(&mut self, options: DiscoveryOptions) {
        self.options = options;
        self.recompute();
    }

    fn recompute(&self) {
        let view = annotate_and_filter(
            self.observer,
            self.candidates.iter().cloned(),
            &self.options,
        );
        self.view.send_replace(Arc::new(view));
    }
}
