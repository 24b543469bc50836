use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use url::Url;

/// HTML of a bookmarked page together with the URL it was finally served
/// from, so relative `href`s resolve against the post-redirect location.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

/// Largest favicon body accepted during validation.
pub const MAX_ICON_BYTES: u64 = 1024 * 1024;

/// Result of downloading a favicon candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconResponse {
    pub status: u16,
    pub content_length: u64,
}

impl IconResponse {
    pub fn is_usable(&self) -> bool {
        (200..300).contains(&self.status) && self.content_length > 0
    }
}

/// Network access used by the favicon resolver.
pub trait IconFetcher: Send + Sync {
    fn fetch_page(&self, url: &Url) -> Result<FetchedPage>;
    fn fetch_icon(&self, url: &Url) -> Result<IconResponse>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("bookmark-search favicon resolver")
            .build()?;
        Ok(Self { client })
    }
}

impl IconFetcher for HttpFetcher {
    fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        let resp = self.client.get(url.clone()).send().context("fetch page")?;
        let url = resp.url().clone();
        let body = resp.text().context("read page")?;
        Ok(FetchedPage { url, body })
    }

    fn fetch_icon(&self, url: &Url) -> Result<IconResponse> {
        let resp = self.client.get(url.clone()).send().context("fetch icon")?;
        let status = resp.status().as_u16();
        let declared = resp.content_length();
        let content_length = read_capped(resp, declared, MAX_ICON_BYTES)?;
        Ok(IconResponse {
            status,
            content_length,
        })
    }
}

/// Count the bytes of `body`, refusing anything over `limit` either by the
/// declared length or by what is actually read.
pub fn read_capped<R: Read>(body: R, declared: Option<u64>, limit: u64) -> Result<u64> {
    if let Some(len) = declared {
        if len > limit {
            bail!("icon too large: {len} bytes");
        }
    }
    let mut buf = Vec::new();
    body.take(limit + 1)
        .read_to_end(&mut buf)
        .context("read icon")?;
    let read = buf.len() as u64;
    if read > limit {
        bail!("icon larger than {limit} bytes");
    }
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_requires_success_and_body() {
        assert!(IconResponse { status: 200, content_length: 10 }.is_usable());
        assert!(!IconResponse { status: 200, content_length: 0 }.is_usable());
        assert!(!IconResponse { status: 404, content_length: 10 }.is_usable());
        assert!(!IconResponse { status: 301, content_length: 10 }.is_usable());
    }

    #[test]
    fn small_body_is_counted() {
        let body = std::io::Cursor::new(vec![1u8; 300]);
        assert_eq!(read_capped(body, Some(300), MAX_ICON_BYTES).unwrap(), 300);
    }

    #[test]
    fn oversized_declared_length_is_rejected_unread() {
        let body = std::io::Cursor::new(Vec::new());
        assert!(read_capped(body, Some(MAX_ICON_BYTES + 1), MAX_ICON_BYTES).is_err());
    }

    #[test]
    fn endless_body_stops_at_the_limit() {
        let body = std::io::repeat(0u8);
        assert!(read_capped(body, None, 4096).is_err());
    }
}
