use super::IconRef;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Favicon outcomes keyed by bookmark URL.
///
/// Entries are only ever added. Once a URL has a value, later writes for it
/// are ignored so every reader observes the same outcome.
#[derive(Clone, Default)]
pub struct FaviconCache {
    inner: Arc<Mutex<HashMap<String, IconRef>>>,
}

impl FaviconCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, IconRef>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, url: &str) -> Option<IconRef> {
        self.lock().get(url).cloned()
    }

    /// Store `icon` for `url` unless a value is already present. Returns the
    /// value held by the cache afterwards.
    pub fn set_if_absent(&self, url: &str, icon: IconRef) -> IconRef {
        self.lock().entry(url.to_string()).or_insert(icon).clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let cache = FaviconCache::new();
        let stored = cache.set_if_absent("https://a.test", IconRef::Default);
        assert_eq!(stored, IconRef::Default);
        let stored = cache.set_if_absent(
            "https://a.test",
            IconRef::Url("https://a.test/favicon.ico".into()),
        );
        assert_eq!(stored, IconRef::Default);
        assert_eq!(cache.get("https://a.test"), Some(IconRef::Default));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let cache = FaviconCache::new();
        let other = cache.clone();
        other.set_if_absent("u", IconRef::Default);
        assert_eq!(cache.get("u"), Some(IconRef::Default));
    }
}
