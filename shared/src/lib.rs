//! Platform-agnostic pieces of the asteria blog: the post model, the
//! table-of-contents engine and its configuration.
//!
//! Nothing in this crate touches the DOM. Layout reads go through
//! [`toc::GeometryProvider`], so the engine runs unchanged in the browser
//! and against fake geometry in tests.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod toc;

pub use config::{CommentsEntry, TocConfig};
pub use error::TocError;

// 博客文章数据模型
/// A blog post as served by `GET /posts/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL slug, also the lookup key.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// One-paragraph summary shown under the title.
    #[serde(default)]
    pub summary: String,
    /// Markdown body.
    pub content: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub read_time: u32,
    /// Whether the post has a comments section below the article.
    #[serde(default)]
    pub comments: bool,
}

impl Post {
    /// Reading time estimate used when the server omits one.
    pub fn estimated_read_time(&self) -> u32 {
        if self.read_time > 0 {
            return self.read_time;
        }
        let words = self.content.split_whitespace().count() as u32;
        words.div_ceil(220).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::Post;

    #[test]
    fn post_defaults_optional_fields() -> anyhow::Result<()> {
        let post: Post = serde_json::from_str(
            r#"{"slug":"hello","title":"Hello","content":"one two","date":"2024-05-01"}"#,
        )?;
        assert!(!post.comments);
        assert!(post.tags.is_empty());
        assert_eq!(post.estimated_read_time(), 1);
        Ok(())
    }

    #[test]
    fn explicit_read_time_wins() {
        let post = Post {
            slug: "s".into(),
            title: "t".into(),
            summary: String::new(),
            content: "word ".repeat(1000),
            tags: vec![],
            date: "2024-05-01".into(),
            read_time: 3,
            comments: true,
        };
        assert_eq!(post.estimated_read_time(), 3);
    }
}
