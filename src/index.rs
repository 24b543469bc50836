use crate::bookmarks::BookmarkEntry;
use crate::favicon::{FaviconCache, FaviconResolver, IconRef};
use crate::host::ResultSink;
use crate::results::{highlight_matches, SearchResult};
use crate::settings::Settings;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use tracing::{debug, warn};

pub const MAX_RESULTS: usize = 20;
pub const MIN_SCORE: i64 = 5;
pub const COMMAND_PREFIX: char = '/';

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_results: usize,
    /// Lowest accepted fuzzy score. Values below 1 are treated as 1.
    pub min_score: i64,
    pub command_prefix: Option<char>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            min_score: MIN_SCORE,
            command_prefix: Some(COMMAND_PREFIX),
        }
    }
}

impl From<&Settings> for SearchOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            max_results: settings.max_results,
            min_score: settings.min_score,
            command_prefix: settings.command_prefix,
        }
    }
}

/// Rows waiting for the favicon of a URL, keyed by bookmark URL. Each row
/// carries the generation of the query that displayed it.
type PendingMap = HashMap<String, Vec<(u64, SearchResult)>>;

/// In-memory bookmark index answering fuzzy queries.
///
/// Results are returned immediately. Rows whose URL has no cached favicon get
/// a background lookup; when it finishes the row is patched through the
/// [`ResultSink`], but only while the query that produced the row is still
/// the latest one; the cache is written either way. Only one lookup per URL
/// is in flight at a time; searches that hit a URL already being resolved
/// join its list of rows to patch.
pub struct BookmarkIndex {
    entries: Vec<BookmarkEntry>,
    matcher: SkimMatcherV2,
    options: SearchOptions,
    favicons: FaviconCache,
    resolver: Option<FaviconResolver>,
    sink: Arc<dyn ResultSink>,
    pending: Arc<Mutex<PendingMap>>,
    /// Bumped by every search. Held while publishing so a patch never lands
    /// in the middle of a newer batch.
    generation: Arc<Mutex<u64>>,
}

fn lock_pending(pending: &Mutex<PendingMap>) -> MutexGuard<'_, PendingMap> {
    pending.lock().unwrap_or_else(|e| e.into_inner())
}

/// Replace `row` in the sink if `generation` is still the displayed query.
fn patch_if_current(
    current: &Mutex<u64>,
    sink: &dyn ResultSink,
    generation: u64,
    row: SearchResult,
) {
    let current = current.lock().unwrap_or_else(|e| e.into_inner());
    if *current == generation {
        sink.replace(row);
    } else {
        debug!(id = %row.id, "dropping icon patch for a replaced query");
    }
}

impl BookmarkIndex {
    pub fn new(
        entries: Vec<BookmarkEntry>,
        options: SearchOptions,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            entries,
            matcher: SkimMatcherV2::default(),
            options,
            favicons: FaviconCache::new(),
            resolver: None,
            sink,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// Enable background favicon lookups.
    pub fn with_resolver(mut self, resolver: FaviconResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn entries(&self) -> &[BookmarkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn favicon(&self, url: &str) -> Option<IconRef> {
        self.favicons.get(url)
    }

    /// Number of URLs with a favicon lookup still running.
    pub fn pending_lookups(&self) -> usize {
        lock_pending(&self.pending).len()
    }

    fn is_command(&self, query: &str) -> bool {
        self.options
            .command_prefix
            .map_or(false, |prefix| query.starts_with(prefix))
    }

    /// Rank bookmarks against `query`.
    ///
    /// Every call starts a new result set, so icon patches for rows of
    /// earlier queries are dropped. The batch is published to the sink with
    /// `add_or_replace` before any favicon lookup is scheduled, then returned.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let mut current = self.generation.lock().unwrap_or_else(|e| e.into_inner());
        *current += 1;
        let generation = *current;

        let query = query.trim();
        if query.is_empty() || self.is_command(query) {
            return Vec::new();
        }

        let floor = self.options.min_score.max(1);
        let mut scored: Vec<(i64, &BookmarkEntry, Vec<usize>)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let (score, indices) = self.matcher.fuzzy_indices(entry.search_text(), query)?;
                (score >= floor).then_some((score, entry, indices))
            })
            .collect();
        // stable: equal scores keep load order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(self.options.max_results);

        let results: Vec<SearchResult> = scored
            .into_iter()
            .map(|(score, entry, indices)| self.to_result(entry, score, &indices))
            .collect();
        debug!(query, matches = results.len(), "bookmark search");

        if !results.is_empty() {
            self.sink.add_or_replace(results.clone());
        }
        drop(current);
        self.schedule_favicons(&results, generation);
        results
    }

    fn to_result(&self, entry: &BookmarkEntry, score: i64, indices: &[usize]) -> SearchResult {
        // search text starts with the name, so name positions are the low indices
        let name_len = entry.name.chars().count();
        let name_hits: Vec<usize> = indices.iter().copied().filter(|&i| i < name_len).collect();
        SearchResult {
            id: entry.id.clone(),
            title: entry.name.clone(),
            highlighted_title: highlight_matches(&entry.name, &name_hits),
            description: entry.url.clone(),
            payload: entry.url.clone(),
            score,
            icon: self.favicons.get(&entry.url),
        }
    }

    fn schedule_favicons(&self, results: &[SearchResult], generation: u64) {
        let Some(resolver) = &self.resolver else {
            return;
        };
        for result in results.iter().filter(|r| r.icon.is_none()) {
            let url = result.payload.clone();
            {
                let mut pending = lock_pending(&self.pending);
                // A lookup may have landed after `to_result` read the cache.
                if let Some(icon) = self.favicons.get(&url) {
                    drop(pending);
                    let row = result.clone().with_icon(icon);
                    patch_if_current(&self.generation, self.sink.as_ref(), generation, row);
                    continue;
                }
                if let Some(waiting) = pending.get_mut(&url) {
                    waiting.retain(|(_, w)| w.id != result.id);
                    waiting.push((generation, result.clone()));
                    continue;
                }
                pending.insert(url.clone(), vec![(generation, result.clone())]);
            }
            self.spawn_lookup(resolver.clone(), url);
        }
    }

    fn spawn_lookup(&self, resolver: FaviconResolver, url: String) {
        let cache = self.favicons.clone();
        let pending = self.pending.clone();
        let sink = self.sink.clone();
        let current = self.generation.clone();
        let thread_url = url.clone();
        let spawned = thread::Builder::new()
            .name("favicon-lookup".into())
            .spawn(move || {
                let url = thread_url;
                let icon = cache.set_if_absent(&url, resolver.resolve(&url));
                debug!(url = %url, icon = ?icon, "favicon resolved");
                let waiting = lock_pending(&pending).remove(&url).unwrap_or_default();
                for (generation, row) in waiting {
                    let row = row.with_icon(icon.clone());
                    patch_if_current(&current, sink.as_ref(), generation, row);
                }
            });
        if let Err(e) = spawned {
            warn!(url = %url, error = %e, "failed to start favicon lookup");
            lock_pending(&self.pending).remove(&url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSink;

    impl ResultSink for NullSink {
        fn add_or_replace(&self, _results: Vec<SearchResult>) {}
        fn remove(&self, _id: &str) {}
    }

    fn index(entries: Vec<BookmarkEntry>) -> BookmarkIndex {
        BookmarkIndex::new(entries, SearchOptions::default(), Arc::new(NullSink))
    }

    #[test]
    fn highlight_covers_only_the_name() {
        let idx = index(vec![BookmarkEntry::new("1", "Rust", "https://rust-lang.org")]);
        let results = idx.search("rust");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].highlighted_title, "<b>Rust</b>");
    }

    #[test]
    fn command_prefix_can_be_disabled() {
        let options = SearchOptions {
            command_prefix: None,
            ..SearchOptions::default()
        };
        let idx = BookmarkIndex::new(
            vec![BookmarkEntry::new("1", "/usr docs", "https://usr.test")],
            options,
            Arc::new(NullSink),
        );
        assert_eq!(idx.search("/usr").len(), 1);
    }

    #[test]
    fn no_resolver_means_no_pending_lookups() {
        let idx = index(vec![BookmarkEntry::new("1", "Example", "http://example.com")]);
        let results = idx.search("exam");
        assert_eq!(results.len(), 1);
        assert!(results[0].icon.is_none());
        assert_eq!(idx.pending_lookups(), 0);
    }
}
