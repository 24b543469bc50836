use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single bookmarked page flattened out of the browser's folder tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub id: String,
    pub name: String,
    pub url: String,
    search_text: String,
}

impl BookmarkEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let url = url.into();
        let search_text = format!("{name} {url}");
        Self {
            id: id.into(),
            name,
            url,
            search_text,
        }
    }

    /// Text the fuzzy matcher runs against: the name followed by the URL.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }
}

/// Node of a Chrome style bookmark tree.
#[derive(Debug, Clone)]
pub enum BookmarkNode {
    Url { id: String, name: String, url: String },
    Folder {
        id: String,
        name: String,
        children: Vec<BookmarkNode>,
    },
    /// Separators, untyped nodes and anything else a browser might add later.
    Other,
}

#[derive(Deserialize)]
struct UrlFields {
    #[serde(default, deserialize_with = "de_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Deserialize)]
struct FolderFields {
    #[serde(default, deserialize_with = "de_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    children: Vec<BookmarkNode>,
}

/// Dispatches on the `type` field. A missing or unknown type yields
/// [`BookmarkNode::Other`] instead of failing the whole document.
impl<'de> Deserialize<'de> for BookmarkNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value.get("type").and_then(|t| t.as_str()).map(str::to_owned);
        match kind.as_deref() {
            Some("url") => {
                let f: UrlFields = serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(BookmarkNode::Url {
                    id: f.id,
                    name: f.name,
                    url: f.url,
                })
            }
            Some("folder") => {
                let f: FolderFields = serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(BookmarkNode::Folder {
                    id: f.id,
                    name: f.name,
                    children: f.children,
                })
            }
            _ => Ok(BookmarkNode::Other),
        }
    }
}

/// Chrome writes ids as strings but hand-made files often use numbers.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct BookmarkDocument {
    #[serde(default)]
    pub roots: serde_json::Map<String, serde_json::Value>,
}

impl BookmarkDocument {
    /// Root trees in document order. Non-object entries under `roots`
    /// (such as `sync_transaction_version`) are skipped.
    pub fn root_nodes(&self) -> serde_json::Result<Vec<BookmarkNode>> {
        self.roots
            .values()
            .filter(|v| v.is_object())
            .map(|v| BookmarkNode::deserialize(v))
            .collect()
    }
}

/// Flatten a bookmark forest into its url leaves using a depth-first
/// pre-order walk. The returned order is the tie-break order for search.
pub fn load(roots: &[BookmarkNode]) -> Vec<BookmarkEntry> {
    let mut entries = Vec::new();
    for root in roots {
        collect(root, &mut entries);
    }
    entries
}

fn collect(node: &BookmarkNode, out: &mut Vec<BookmarkEntry>) {
    match node {
        BookmarkNode::Url { id, name, url } => {
            out.push(BookmarkEntry::new(id.clone(), name.clone(), url.clone()))
        }
        BookmarkNode::Folder { children, .. } => {
            for child in children {
                collect(child, out);
            }
        }
        BookmarkNode::Other => {}
    }
}

/// Parse the contents of a bookmark file into a flat entry list.
pub fn parse_bookmarks(content: &str) -> serde_json::Result<Vec<BookmarkEntry>> {
    let doc: BookmarkDocument = serde_json::from_str(content)?;
    let roots = doc.root_nodes()?;
    Ok(load(&roots))
}

#[derive(Debug, Error)]
pub enum BookmarkSourceError {
    #[error("bookmark file not found at {0}")]
    NotFound(PathBuf),
    #[error("failed to read bookmark file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse bookmark file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BookmarkSourceError {
    /// Short text suitable for a toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            BookmarkSourceError::NotFound(_) => NOT_FOUND_MESSAGE,
            BookmarkSourceError::Io { .. } | BookmarkSourceError::Parse { .. } => {
                UNREADABLE_MESSAGE
            }
        }
    }
}

pub const NOT_FOUND_MESSAGE: &str = "Chrome Bookmarks file not found.";
pub const UNREADABLE_MESSAGE: &str = "Chrome Bookmarks file found, but it could not be opened.";

pub fn load_bookmarks_file(path: &Path) -> Result<Vec<BookmarkEntry>, BookmarkSourceError> {
    if !path.exists() {
        return Err(BookmarkSourceError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| BookmarkSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bookmarks(&content).map_err(|source| BookmarkSourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Location of the default Chrome profile's bookmark file on this platform.
pub fn default_bookmarks_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        dirs_next::data_local_dir().map(|d| {
            d.join("Google")
                .join("Chrome")
                .join("User Data")
                .join("Default")
                .join("Bookmarks")
        })
    }
    #[cfg(target_os = "macos")]
    {
        dirs_next::data_dir().map(|d| {
            d.join("Google")
                .join("Chrome")
                .join("Default")
                .join("Bookmarks")
        })
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        dirs_next::config_dir().map(|d| d.join("google-chrome").join("Default").join("Bookmarks"))
    }
}
