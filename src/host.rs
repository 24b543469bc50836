//! Capabilities the launcher hands to the bookmark plugin.
//!
//! The plugin never talks to a UI toolkit directly. Everything it needs from
//! the launcher arrives through these traits, bundled in [`HostContext`].

use crate::results::SearchResult;
use std::sync::Arc;

/// Non-blocking user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Opens a URL outside the launcher, usually in the default browser.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> anyhow::Result<()>;
}

/// The launcher's list of results for the query currently being shown.
pub trait ResultSink: Send + Sync {
    /// Append a batch, replacing rows that share an id.
    fn add_or_replace(&self, results: Vec<SearchResult>);
    /// Drop the row with `id`, if shown.
    fn remove(&self, id: &str);

    /// Swap a shown row for an updated copy. Removal happens first so hosts
    /// that only check id presence never show the row twice.
    fn replace(&self, updated: SearchResult) {
        self.remove(&updated.id);
        self.add_or_replace(vec![updated]);
    }
}

/// The launcher window itself.
pub trait Window: Send + Sync {
    /// Dismiss the search surface.
    fn close(&self);
}

/// Opens URLs with the platform handler via the `open` crate.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        open::that(url).map_err(|e| e.into())
    }
}

#[derive(Clone)]
pub struct HostContext {
    pub notifier: Arc<dyn Notifier>,
    pub opener: Arc<dyn UrlOpener>,
    pub sink: Arc<dyn ResultSink>,
    pub window: Arc<dyn Window>,
}
