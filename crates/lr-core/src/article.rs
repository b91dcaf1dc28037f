use crate::error::Result;

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// Raw article text handed over by the extraction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub body: String,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ArticleSource
// ---------------------------------------------------------------------------

/// Hand-off seam between the extraction layer and the annotation pipeline.
///
/// The source supplies an article at most once per render cycle: `take`
/// consumes the pending article, and a subsequent `take` yields `None`
/// until new content is published.
pub trait ArticleSource {
    fn take(&mut self) -> Result<Option<Article>>;
}

/// In-memory source holding at most one pending article.
#[derive(Debug, Default)]
pub struct MemoryArticleSource {
    pending: Option<Article>,
}

impl MemoryArticleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending article with `article`.
    pub fn publish(&mut self, article: Article) {
        self.pending = Some(article);
    }
}

impl ArticleSource for MemoryArticleSource {
    fn take(&mut self) -> Result<Option<Article>> {
        Ok(self.pending.take())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes_the_pending_article() {
        let mut source = MemoryArticleSource::new();
        source.publish(Article::new("Title", "Body text."));

        let first = source.take().expect("take");
        assert_eq!(first, Some(Article::new("Title", "Body text.")));

        // The source must not replay the same content.
        let second = source.take().expect("take");
        assert_eq!(second, None);
    }

    #[test]
    fn publish_replaces_pending_content() {
        let mut source = MemoryArticleSource::new();
        source.publish(Article::new("Old", "old"));
        source.publish(Article::new("New", "new"));
        let taken = source.take().expect("take").expect("pending");
        assert_eq!(taken.title, "New");
    }

    #[test]
    fn empty_source_yields_none() {
        let mut source = MemoryArticleSource::new();
        assert_eq!(source.take().expect("take"), None);
    }
}
