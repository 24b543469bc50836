use serde::{Deserialize, Serialize};

pub mod cache;
pub mod fetch;
pub mod resolver;
pub mod source;

pub use cache::FaviconCache;
pub use fetch::{FetchedPage, HttpFetcher, IconFetcher, IconResponse};
pub use resolver::FaviconResolver;

/// Outcome of a favicon lookup for a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum IconRef {
    /// A favicon URL that answered with a non-empty successful response.
    Url(String),
    /// Lookup failed; the launcher shows its generic glyph.
    Default,
}

impl IconRef {
    pub fn url(&self) -> Option<&str> {
        match self {
            IconRef::Url(u) => Some(u),
            IconRef::Default => None,
        }
    }
}
