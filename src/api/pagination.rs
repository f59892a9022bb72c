//! Offset pagination: bounds-checked query params, count headers, and an
//! RFC 8288 `Link` header with first/last/next/prev relations.

use axum::http::{header::HeaderName, HeaderMap, HeaderValue, Uri};
use serde::Deserialize;

use crate::error::ApiError;

pub const LIMIT_MIN: i64 = 1;
pub const LIMIT_MAX: i64 = 200;
pub const LIMIT_DEFAULT: i64 = 50;

pub static X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
pub static X_LIMIT: HeaderName = HeaderName::from_static("x-limit");
pub static X_OFFSET: HeaderName = HeaderName::from_static("x-offset");

/// Raw `limit`/`offset` query parameters, before bounds checking
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl PageParams {
    pub fn resolve(self) -> Result<Page, ApiError> {
        let limit = self.limit.unwrap_or(LIMIT_DEFAULT);
        if !(LIMIT_MIN..=LIMIT_MAX).contains(&limit) {
            return Err(ApiError::bad_request(format!(
                "limit must be between {} and {}",
                LIMIT_MIN, LIMIT_MAX
            )));
        }
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(ApiError::bad_request("offset must be >= 0"));
        }
        Ok(Page { limit, offset })
    }
}

impl Page {
    pub fn next_offset(self, total: i64) -> Option<i64> {
        if self.offset + self.limit < total {
            Some(self.offset + self.limit)
        } else {
            None
        }
    }

    pub fn prev_offset(self) -> Option<i64> {
        if self.offset > 0 {
            Some((self.offset - self.limit).max(0))
        } else {
            None
        }
    }

    /// Highest page-aligned offset not exceeding total-1; 0 for empty sets
    pub fn last_offset(self, total: i64) -> i64 {
        if total == 0 {
            0
        } else {
            ((total - 1) / self.limit) * self.limit
        }
    }
}

/// Headers for a list response: Link + X-Total-Count/X-Limit/X-Offset.
/// Link targets preserve the request's other query parameters.
pub fn pagination_headers(uri: &Uri, total: i64, page: Page) -> HeaderMap {
    let mut links: Vec<String> = Vec::new();

    if let Some(next) = page.next_offset(total) {
        links.push(format!("<{}>; rel=\"next\"", link_target(uri, page.limit, next)));
    }
    if let Some(prev) = page.prev_offset() {
        links.push(format!("<{}>; rel=\"prev\"", link_target(uri, page.limit, prev)));
    }
    links.push(format!("<{}>; rel=\"first\"", link_target(uri, page.limit, 0)));
    links.push(format!(
        "<{}>; rel=\"last\"",
        link_target(uri, page.limit, page.last_offset(total))
    ));

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&links.join(", ")) {
        headers.insert(axum::http::header::LINK, value);
    }
    insert_numeric(&mut headers, &X_TOTAL_COUNT, total);
    insert_numeric(&mut headers, &X_LIMIT, page.limit);
    insert_numeric(&mut headers, &X_OFFSET, page.offset);
    headers
}

fn insert_numeric(headers: &mut HeaderMap, name: &HeaderName, value: i64) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(name.clone(), value);
    }
}

fn link_target(uri: &Uri, limit: i64, offset: i64) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    if let Some(query) = uri.query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key != "limit" && key != "offset" {
                serializer.append_pair(&key, &value);
            }
        }
    }
    serializer.append_pair("limit", &limit.to_string());
    serializer.append_pair("offset", &offset.to_string());
    format!("{}?{}", uri.path(), serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(limit: i64, offset: i64) -> Page {
        Page { limit, offset }
    }

    #[test]
    fn middle_page_navigation() {
        // total=25, limit=10, offset=10: prev 0, next 20, last 20
        let p = page(10, 10);
        assert_eq!(p.prev_offset(), Some(0));
        assert_eq!(p.next_offset(25), Some(20));
        assert_eq!(p.last_offset(25), 20);
    }

    #[test]
    fn first_page_has_no_prev() {
        let p = page(10, 0);
        assert_eq!(p.prev_offset(), None);
        assert_eq!(p.next_offset(25), Some(10));
    }

    #[test]
    fn final_page_has_no_next() {
        let p = page(10, 20);
        assert_eq!(p.next_offset(25), None);
        // prev clamps to >= 0
        assert_eq!(page(10, 5).prev_offset(), Some(0));
    }

    #[test]
    fn empty_listing_last_is_zero() {
        assert_eq!(page(10, 0).last_offset(0), 0);
    }

    #[test]
    fn exact_multiple_last_offset() {
        // total=20, limit=10: last page starts at 10, not 20
        assert_eq!(page(10, 0).last_offset(20), 10);
    }

    #[test]
    fn params_bounds() {
        assert!(PageParams { limit: Some(0), offset: None }.resolve().is_err());
        assert!(PageParams { limit: Some(201), offset: None }.resolve().is_err());
        assert!(PageParams { limit: None, offset: Some(-1) }.resolve().is_err());
        let page = PageParams::default().resolve().unwrap();
        assert_eq!(page.limit, LIMIT_DEFAULT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn link_header_preserves_other_params() {
        let uri: Uri = "/users?q=robin&limit=10&offset=10".parse().unwrap();
        let headers = pagination_headers(&uri, 25, page(10, 10));

        let link = headers.get(axum::http::header::LINK).unwrap().to_str().unwrap();
        assert!(link.contains("</users?q=robin&limit=10&offset=20>; rel=\"next\""));
        assert!(link.contains("</users?q=robin&limit=10&offset=0>; rel=\"prev\""));
        assert!(link.contains("rel=\"first\""));
        assert!(link.contains("</users?q=robin&limit=10&offset=20>; rel=\"last\""));

        assert_eq!(headers.get(&X_TOTAL_COUNT).unwrap(), "25");
        assert_eq!(headers.get(&X_LIMIT).unwrap(), "10");
        assert_eq!(headers.get(&X_OFFSET).unwrap(), "10");
    }
}
