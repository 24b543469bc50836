use scraper::{Html, Selector};
use url::Url;

fn rel_has(rel: &str, token: &str) -> bool {
    rel.split_ascii_whitespace()
        .any(|t| t.eq_ignore_ascii_case(token))
}

/// Find the favicon a page declares through `<link rel="icon">` (including
/// `shortcut icon`), falling back to `apple-touch-icon`. Only http(s)
/// targets are returned.
pub fn find_icon_link(html: &str, base: &Url) -> Option<Url> {
    let Ok(selector) = Selector::parse("link[rel][href]") else {
        return None;
    };
    let document = Html::parse_document(html);
    let mut touch_icon = None;
    for elem in document.select(&selector) {
        let rel = elem.value().attr("rel").unwrap_or("");
        let is_icon = rel_has(rel, "icon");
        if !is_icon && !rel_has(rel, "apple-touch-icon") {
            continue;
        }
        let href = elem.value().attr("href").unwrap_or("").trim();
        if href.is_empty() {
            continue;
        }
        let Ok(candidate) = base.join(href) else {
            continue;
        };
        if !is_web_url(&candidate) {
            continue;
        }
        if is_icon {
            return Some(candidate);
        }
        if touch_icon.is_none() {
            touch_icon = Some(candidate);
        }
    }
    touch_icon
}

/// `/favicon.ico` at the root of the page's origin.
pub fn fallback_icon_url(page: &Url) -> Option<Url> {
    page.join("/favicon.ico").ok().filter(is_web_url)
}

pub fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/page.html").unwrap()
    }

    #[test]
    fn relative_icon_resolves_against_page() {
        let html = r#"<html><head><link rel="shortcut icon" href="img/fav.png"></head></html>"#;
        assert_eq!(
            find_icon_link(html, &base()).unwrap().as_str(),
            "https://example.com/docs/img/fav.png"
        );
    }

    #[test]
    fn icon_preferred_over_touch_icon() {
        let html = r#"<head>
            <link rel="apple-touch-icon" href="/touch.png">
            <link rel="ICON" href="/icon.svg">
        </head>"#;
        assert_eq!(
            find_icon_link(html, &base()).unwrap().as_str(),
            "https://example.com/icon.svg"
        );
    }

    #[test]
    fn touch_icon_used_when_alone() {
        let html = r#"<link rel="apple-touch-icon" href="/touch.png">"#;
        assert_eq!(
            find_icon_link(html, &base()).unwrap().as_str(),
            "https://example.com/touch.png"
        );
    }

    #[test]
    fn data_uris_and_stylesheets_are_skipped() {
        let html = r#"<link rel="stylesheet" href="/a.css">
            <link rel="icon" href="data:image/png;base64,AAAA">"#;
        assert!(find_icon_link(html, &base()).is_none());
    }

    #[test]
    fn fallback_points_at_origin_root() {
        assert_eq!(
            fallback_icon_url(&base()).unwrap().as_str(),
            "https://example.com/favicon.ico"
        );
    }
}
