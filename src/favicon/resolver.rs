use super::fetch::IconFetcher;
use super::source::{fallback_icon_url, find_icon_link, is_web_url};
use super::IconRef;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Finds a favicon for a bookmark and checks that it actually downloads.
///
/// Resolution runs in two steps:
/// * discovery – fetch the bookmarked page and read its `<link rel="icon">`,
///   falling back to `/favicon.ico` when the page declares none;
/// * validation – download the candidate and require a 2xx response with a
///   non-empty body.
///
/// Any failure yields [`IconRef::Default`]. Both steps block, so callers run
/// this off the query path.
#[derive(Clone)]
pub struct FaviconResolver {
    fetcher: Arc<dyn IconFetcher>,
}

impl FaviconResolver {
    pub fn new(fetcher: Arc<dyn IconFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn resolve(&self, bookmark_url: &str) -> IconRef {
        let target = match Url::parse(bookmark_url) {
            Ok(u) if is_web_url(&u) => u,
            _ => {
                debug!(url = bookmark_url, "no favicon lookup for non-web bookmark");
                return IconRef::Default;
            }
        };
        let Some(candidate) = self.discover(&target) else {
            return IconRef::Default;
        };
        if self.validate(&candidate) {
            IconRef::Url(candidate.to_string())
        } else {
            IconRef::Default
        }
    }

    fn discover(&self, target: &Url) -> Option<Url> {
        match self.fetcher.fetch_page(target) {
            Ok(page) => find_icon_link(&page.body, &page.url).or_else(|| fallback_icon_url(&page.url)),
            Err(e) => {
                debug!(url = %target, error = %e, "favicon discovery failed");
                None
            }
        }
    }

    fn validate(&self, candidate: &Url) -> bool {
        match self.fetcher.fetch_icon(candidate) {
            Ok(resp) if resp.is_usable() => true,
            Ok(resp) => {
                debug!(
                    icon = %candidate,
                    status = resp.status,
                    length = resp.content_length,
                    "favicon candidate rejected"
                );
                false
            }
            Err(e) => {
                debug!(icon = %candidate, error = %e, "favicon validation failed");
                false
            }
        }
    }
}
