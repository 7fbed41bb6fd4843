use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the remote manifest.
///
/// Fields are trusted structurally only: a missing or non-string field
/// becomes `None` and surfaces later as a broken image or dead link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangaItem {
    pub article_url: Option<String>,
    pub manga_url: Option<String>,
}

impl MangaItem {
    /// Read an item from an arbitrary JSON value without rejecting it.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            article_url: field("article_url"),
            manga_url: field("manga_url"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRecord {
    pub index: usize,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
}

impl SlideRecord {
    /// Alt text shown in place of the image, numbered from 1.
    pub fn alt_text(&self) -> String {
        format!("4コマ漫画{}", self.index + 1)
    }
}

/// The ordered slide sequence for one page load. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Vec<SlideRecord>,
}

impl SlideDeck {
    pub fn from_items(items: Vec<MangaItem>) -> Self {
        let slides = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| SlideRecord {
                index,
                image_url: item.manga_url,
                link_url: item.article_url,
            })
            .collect();
        Self { slides }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideRecord> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlideRecord> {
        self.slides.iter()
    }
}

impl<'a> IntoIterator for &'a SlideDeck {
    type Item = &'a SlideRecord;
    type IntoIter = std::slice::Iter<'a, SlideRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_from_value_reads_both_fields() {
        let item = MangaItem::from_value(&json!({
            "article_url": "https://news.example.com/1",
            "manga_url": "https://cdn.example.com/1.png"
        }));
        assert_eq!(item.article_url.as_deref(), Some("https://news.example.com/1"));
        assert_eq!(item.manga_url.as_deref(), Some("https://cdn.example.com/1.png"));
    }

    #[test]
    fn test_item_from_value_tolerates_malformed_entries() {
        let item = MangaItem::from_value(&json!({ "article_url": 42 }));
        assert_eq!(item, MangaItem::default());

        let item = MangaItem::from_value(&json!("not an object"));
        assert_eq!(item, MangaItem::default());
    }

    #[test]
    fn test_deck_indexes_follow_order() {
        let deck = SlideDeck::from_items(vec![
            MangaItem {
                article_url: Some("a0".into()),
                manga_url: Some("m0".into()),
            },
            MangaItem {
                article_url: Some("a1".into()),
                manga_url: None,
            },
        ]);

        assert_eq!(deck.len(), 2);
        let second = deck.get(1).unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.link_url.as_deref(), Some("a1"));
        assert_eq!(second.image_url, None);
        assert_eq!(second.alt_text(), "4コマ漫画2");
    }
}
