//! Single-post detail view

use serde::Serialize;
use url::form_urlencoded;

use crate::content::{Category, RenderedContent};
use crate::error::{ContentLoadError, PageError};
use crate::helpers::ShareLink;

/// Which post a detail page asks for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRequest {
    id: Option<String>,
}

impl DetailRequest {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
        }
    }

    /// Read the `id` parameter of a query string (leading `?` optional)
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let id = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty());
        Self { id }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Header fields of a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailHeader {
    pub id: String,
    pub title: String,
    pub date: String,
    /// `YYYY-MM-DD` for `<time datetime>`
    pub date_xml: String,
    pub categories: Vec<Category>,
    pub cover: Option<String>,
}

/// Body of a detail page
#[derive(Debug)]
pub enum DetailBody {
    Rendered(RenderedContent),
    /// The body could not be loaded; the header still renders
    Unavailable(ContentLoadError),
}

impl DetailBody {
    pub fn html(&self) -> Option<&str> {
        match self {
            Self::Rendered(content) => Some(&content.html),
            Self::Unavailable(_) => None,
        }
    }

    /// Message shown in place of the content area
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Rendered(_) => None,
            Self::Unavailable(_) => Some(PageError::CONTENT_MESSAGE),
        }
    }
}

/// Everything a detail page shows
#[derive(Debug)]
pub struct DetailView {
    pub header: DetailHeader,
    pub body: DetailBody,
    pub canonical_url: String,
    pub share_links: Vec<ShareLink>,
}
