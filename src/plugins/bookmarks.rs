use crate::bookmarks::{load_bookmarks_file, NOT_FOUND_MESSAGE};
use crate::favicon::{FaviconResolver, HttpFetcher, IconFetcher};
use crate::host::HostContext;
use crate::index::{BookmarkIndex, SearchOptions};
use crate::plugin::Plugin;
use crate::results::SearchResult;
use crate::settings::Settings;
use std::sync::Arc;
use tracing::{info, warn};

/// Searches the browser's bookmarks and opens the chosen one.
pub struct BookmarksPlugin {
    index: BookmarkIndex,
    host: HostContext,
}

impl BookmarksPlugin {
    /// Load the bookmark file and build the index, resolving favicons over
    /// HTTP when enabled.
    pub fn startup(settings: &Settings, host: HostContext) -> Self {
        let fetcher: Option<Arc<dyn IconFetcher>> = if settings.enable_favicons {
            match HttpFetcher::new(settings.favicon_timeout()) {
                Ok(f) => Some(Arc::new(f)),
                Err(e) => {
                    warn!("failed to build favicon http client: {e}");
                    None
                }
            }
        } else {
            None
        };
        Self::startup_with(settings, host, fetcher)
    }

    /// Like [`startup`](Self::startup) but with a caller supplied fetcher.
    /// Passing `None` disables favicon lookups.
    pub fn startup_with(
        settings: &Settings,
        host: HostContext,
        fetcher: Option<Arc<dyn IconFetcher>>,
    ) -> Self {
        info!("Opening Chrome Bookmarks file.");
        let entries = match settings.bookmarks_path() {
            Some(path) => match load_bookmarks_file(&path) {
                Ok(entries) => {
                    info!(count = entries.len(), path = %path.display(), "bookmarks loaded");
                    entries
                }
                Err(e) => {
                    warn!("{e}");
                    host.notifier.notify(e.user_message());
                    Vec::new()
                }
            },
            None => {
                warn!("no bookmark file location for this platform");
                host.notifier.notify(NOT_FOUND_MESSAGE);
                Vec::new()
            }
        };

        let mut index = BookmarkIndex::new(entries, SearchOptions::from(settings), host.sink.clone());
        if let Some(fetcher) = fetcher.filter(|_| settings.enable_favicons) {
            index = index.with_resolver(FaviconResolver::new(fetcher));
        }
        Self { index, host }
    }

    pub fn index(&self) -> &BookmarkIndex {
        &self.index
    }
}

impl Plugin for BookmarksPlugin {
    fn search(&self, query: &str) -> Vec<SearchResult> {
        self.index.search(query)
    }

    fn execute(&self, id: &str, payload: &str) {
        info!(id, url = payload, "opening bookmark");
        if let Err(e) = self.host.opener.open(payload) {
            warn!("failed to open {payload}: {e}");
            self.host.notifier.notify(&format!("Failed to open {payload}"));
        }
        self.host.window.close();
    }

    fn name(&self) -> &str {
        "bookmarks"
    }

    fn description(&self) -> &str {
        "Search Chrome bookmarks and open them in the browser"
    }
}
