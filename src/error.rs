//! Error kinds surfaced by the content pipeline
//!
//! None of these are shown verbatim to readers. Pages substitute the
//! friendly message from [`PageError::user_message`] and the underlying
//! error goes to the log.

use std::fmt;
use thiserror::Error;

/// Failure to read a static resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found: {path}")]
    NotFound { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }
}

/// The post index could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch post index: {0}")]
    Fetch(#[from] FetchError),

    #[error("malformed post index: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A post body could not be loaded
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("post `{id}` has neither contentPath nor contentFile")]
    Unresolvable { id: String },

    #[error("failed to fetch content for post `{id}`: {source}")]
    Fetch {
        id: String,
        #[source]
        source: FetchError,
    },
}

/// Why a detail page ended up in the not-found state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No `id` query parameter was supplied
    MissingId,
    /// The post index holds no posts at all
    EmptyIndex,
    /// The index has posts, none with the requested id
    NoMatch,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingId => "no id supplied",
            Self::EmptyIndex => "post index is empty",
            Self::NoMatch => "no post matches id",
        };
        f.write_str(reason)
    }
}

/// No post matches the requested id
#[derive(Debug, Error)]
#[error("post not found ({reason}{})", id_suffix(.id))]
pub struct NotFoundError {
    pub reason: NotFoundReason,
    pub id: Option<String>,
}

fn id_suffix(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(": `{}`", id),
        None => String::new(),
    }
}

impl NotFoundError {
    pub fn new(reason: NotFoundReason, id: Option<&str>) -> Self {
        Self {
            reason,
            id: id.map(str::to_string),
        }
    }
}

/// Any failure a page can end up displaying
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Content(#[from] ContentLoadError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl PageError {
    pub const LOAD_MESSAGE: &'static str = "Unable to load posts at this time.";
    pub const CONTENT_MESSAGE: &'static str = "Unable to load post content";
    pub const NOT_FOUND_MESSAGE: &'static str = "Post not found";

    /// Message shown to readers in place of the content area
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Load(_) => Self::LOAD_MESSAGE,
            Self::Content(_) => Self::CONTENT_MESSAGE,
            Self::NotFound(_) => Self::NOT_FOUND_MESSAGE,
        }
    }

    /// Record the diagnostic detail on the developer log channel
    pub fn log(&self) {
        match self {
            Self::Load(e) => tracing::error!("Error loading post index: {}", e),
            Self::Content(e) => tracing::error!("Error rendering post content: {}", e),
            Self::NotFound(e) => tracing::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_reasons_share_user_message() {
        let reasons = [
            NotFoundReason::MissingId,
            NotFoundReason::EmptyIndex,
            NotFoundReason::NoMatch,
        ];
        let messages: Vec<_> = reasons
            .iter()
            .map(|r| PageError::from(NotFoundError::new(*r, Some("zzz"))).user_message())
            .collect();
        assert!(messages.iter().all(|m| *m == "Post not found"));
    }

    #[test]
    fn test_not_found_display_is_distinguishable() {
        let missing = NotFoundError::new(NotFoundReason::MissingId, None).to_string();
        let no_match = NotFoundError::new(NotFoundReason::NoMatch, Some("zzz")).to_string();
        assert_eq!(missing, "post not found (no id supplied)");
        assert_eq!(no_match, "post not found (no post matches id: `zzz`)");
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = PageError::from(LoadError::from(FetchError::NotFound {
            path: "data/posts.json".to_string(),
        }));
        assert!(!err.user_message().contains("data/posts.json"));
        assert!(err.to_string().contains("data/posts.json"));
    }
}
