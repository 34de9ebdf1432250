//! Route-to-active-entry matching.
//!
//! Decides whether a nav entry's `href` corresponds to the current location. Pure and
//! cheap enough to re-run for every entry on every render.

use std::borrow::Cow;

/// Default path prefix of the category-family route.
pub const DEFAULT_CATEGORY_PREFIX: &str = "/douban";

/// Matches the current location (path plus query) against nav entry hrefs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatcher {
    category_prefix: String,
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY_PREFIX)
    }
}

impl RouteMatcher {
    pub fn new(category_prefix: &str) -> Self {
        Self {
            category_prefix: category_prefix.to_string(),
        }
    }

    pub fn category_prefix(&self) -> &str {
        &self.category_prefix
    }

    /// Returns true if `href` is the active entry for `current`.
    ///
    /// Both sides are percent-decoded first. An exact match (query included) is active.
    /// Otherwise, if `href` carries `type=<X>`, a current location under the category
    /// prefix containing `type=<X>` is active regardless of other parameters.
    pub fn is_active(&self, current: &str, href: &str) -> bool {
        let current = percent_decode(current);
        if current == percent_decode(href) {
            return true;
        }

        // The type value is split out of the raw href before decoding, so an encoded `&`
        // stays part of the value.
        match type_param(href) {
            Some(raw) => {
                let sub_type = percent_decode(raw);
                current.starts_with(self.category_prefix.as_str())
                    && current.contains(&format!("type={sub_type}"))
            }
            None => false,
        }
    }
}

/// Convenience wrapper using the default category prefix.
pub fn is_active(current: &str, href: &str) -> bool {
    RouteMatcher::default().is_active(current, href)
}

/// Fully percent-decodes `input`; invalid UTF-8 sequences leave the input untouched.
fn percent_decode(input: &str) -> Cow<'_, str> {
    urlencoding::decode(input).unwrap_or(Cow::Borrowed(input))
}

/// Value of the `type` query parameter of an href, if present and non-empty.
fn type_param(href: &str) -> Option<&str> {
    let (_, query) = href.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.strip_prefix("type="))
        .find(|value| !value.is_empty())
}
