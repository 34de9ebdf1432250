use serde::{Deserialize, Serialize};

/// Icon identity of a navigation entry. Rendering is up to the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NavIcon {
    Home,
    Search,
    Film,
    Tv,
    Cat,
    Clover,
    Star,
}

/// One item of a navigation bar.
///
/// `href` may carry a `type=<value>` query parameter naming a category sub-type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavEntry {
    pub icon: NavIcon,
    pub label: String,
    pub href: String,
}

impl NavEntry {
    pub fn new(icon: NavIcon, label: &str, href: &str) -> Self {
        Self {
            icon,
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Which navigation surface a shell renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSurface {
    /// Desktop top bar.
    TopBar,
    /// Mobile bottom bar.
    BottomBar,
}

/// A nav entry paired with its derived active state for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub entry: NavEntry,
    pub active: bool,
}

/// A custom category reported by the external categories provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub query: String,
}

/// A request for the routing collaborator to move to `path` with `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl NavigationIntent {
    pub fn new(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Parses an href such as `/douban?type=movie` into path and query pairs.
    pub fn from_href(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect(),
            },
            None => Self::new(href, Vec::new()),
        }
    }

    /// Renders the intent back to `path?k=v&...` with form-urlencoded values.
    pub fn to_href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }

    /// Renders the intent with percent-encoded values (`%20` for a space), so that
    /// percent-decoding gives back the raw pairs.
    pub fn to_location(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}
