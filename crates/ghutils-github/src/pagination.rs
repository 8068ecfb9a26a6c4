//! `Link` header pagination.

use reqwest::header::{HeaderMap, LINK};
use url::Url;

/// Page size requested from list endpoints.
pub const PER_PAGE: usize = 100;

/// Pagination information from a GitHub API response.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// URL of the next page, if any.
    pub next_url: Option<String>,
}

impl Pagination {
    /// Parse the `Link` header of a response.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut pagination = Self::default();

        let Some(links) = headers.get(LINK).and_then(|h| h.to_str().ok()) else {
            return pagination;
        };

        for link in links.split(',') {
            let segments: Vec<&str> = link.split(';').map(str::trim).collect();

            // Skip if we don't at least have href and rel
            if segments.len() < 2 {
                continue;
            }

            let Some(href) = segments[0]
                .strip_prefix('<')
                .and_then(|s| s.strip_suffix('>'))
            else {
                continue;
            };

            if Url::parse(href).is_err() {
                continue;
            }

            if segments[1..].contains(&"rel=\"next\"") {
                pagination.next_url = Some(href.to_string());
            }
        }

        pagination
    }
}
