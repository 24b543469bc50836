use crate::favicon::IconRef;
use serde::Serialize;

/// One row of a search batch handed to the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Id of the bookmark this row came from. Icon patches address rows by it.
    pub id: String,
    pub title: String,
    /// Title with the matched characters wrapped in `<b>` tags.
    pub highlighted_title: String,
    pub description: String,
    /// URL handed back to `execute` when the row is chosen.
    pub payload: String,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
}

impl SearchResult {
    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Wrap the characters at `indices` (char positions) in `<b>` tags,
/// merging runs of adjacent matches and escaping everything else.
pub fn highlight_matches(text: &str, indices: &[usize]) -> String {
    let mut out = String::with_capacity(text.len() + indices.len() * 7);
    let mut open = false;
    for (i, ch) in text.chars().enumerate() {
        let hit = indices.contains(&i);
        if hit && !open {
            out.push_str("<b>");
            open = true;
        } else if !hit && open {
            out.push_str("</b>");
            open = false;
        }
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    if open {
        out.push_str("</b>");
    }
    out
}
