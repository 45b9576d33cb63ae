//! Post models

use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Reverse;

use super::FrontMatter;

/// Metadata-only view of a post, used for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    /// File name without the `.md` extension
    pub id: String,

    #[serde(flatten)]
    pub front_matter: FrontMatter,
}

/// Route parameters for pre-building one post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    pub params: PostId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostId {
    pub id: String,
}

impl RouteParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            params: PostId { id: id.into() },
        }
    }

    pub fn id(&self) -> &str {
        &self.params.id
    }
}

/// A post with its body rendered to HTML
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPost {
    pub id: String,

    pub content_html: String,

    #[serde(flatten)]
    pub front_matter: FrontMatter,
}

/// Sort position derived from a post's `date` field.
///
/// Variants are declared in ascending order, so sorting descending puts
/// parseable dates first (newest first), then unparseable dates in reverse
/// lexical order, then posts without a date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum DateKey {
    Missing,
    Text(String),
    Parsed(NaiveDateTime),
}

impl DateKey {
    fn of(fm: &FrontMatter) -> Self {
        match (&fm.date, fm.parse_date()) {
            (_, Some(dt)) => DateKey::Parsed(dt),
            (Some(raw), None) => DateKey::Text(raw.clone()),
            (None, None) => DateKey::Missing,
        }
    }
}

/// Stable sort, newest first. Equal dates keep their incoming order.
pub fn sort_by_date_desc(posts: &mut [PostSummary]) {
    posts.sort_by_cached_key(|post| Reverse(DateKey::of(&post.front_matter)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, date: Option<&str>) -> PostSummary {
        PostSummary {
            id: id.to_string(),
            front_matter: FrontMatter {
                date: date.map(String::from),
                ..Default::default()
            },
        }
    }

    fn ids(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            summary("a", Some("2023-01-01")),
            summary("b", Some("2024-01-01")),
            summary("c", Some("2023-06-15 08:00")),
        ];
        sort_by_date_desc(&mut posts);
        assert_eq!(ids(&posts), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_missing_and_unparseable_dates_sort_last() {
        let mut posts = vec![
            summary("none", None),
            summary("text", Some("someday")),
            summary("old", Some("2001-01-01")),
        ];
        sort_by_date_desc(&mut posts);
        assert_eq!(ids(&posts), vec!["old", "text", "none"]);
    }

    #[test]
    fn test_partial_dates_sort_chronologically() {
        let mut posts = vec![
            summary("old", Some("2001-01-01")),
            summary("new", Some("2024-06")),
            summary("year", Some("2010")),
        ];
        sort_by_date_desc(&mut posts);
        assert_eq!(ids(&posts), vec!["new", "year", "old"]);
    }

    #[test]
    fn test_ties_keep_order() {
        let mut posts = vec![
            summary("x", Some("2024-05-01")),
            summary("y", Some("2024/05/01")),
            summary("z", None),
            summary("w", None),
        ];
        sort_by_date_desc(&mut posts);
        assert_eq!(ids(&posts), vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_serialize_shapes() {
        let mut fm = FrontMatter {
            title: Some("Hello".to_string()),
            date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        fm.extra
            .insert("author".to_string(), serde_yaml::Value::from("Jane"));

        let summary = PostSummary {
            id: "hello".to_string(),
            front_matter: fm.clone(),
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({
                "id": "hello",
                "title": "Hello",
                "date": "2024-01-01",
                "author": "Jane"
            })
        );

        let rendered = RenderedPost {
            id: "hello".to_string(),
            content_html: "<p>hi</p>\n".to_string(),
            front_matter: fm,
        };
        let value = serde_json::to_value(&rendered).unwrap();
        assert_eq!(value["contentHtml"], "<p>hi</p>\n");
        assert_eq!(value["title"], "Hello");

        assert_eq!(
            serde_json::to_value(RouteParams::new("hello")).unwrap(),
            serde_json::json!({ "params": { "id": "hello" } })
        );
    }
}
