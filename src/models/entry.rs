//! Reading-list entries as returned by the manga-entries endpoint.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::chapter::RawChapter;

/// One page of the reading list.
///
/// Entries are kept as raw JSON here; a single malformed entry must not
/// make the whole page unreadable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntriesPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entries: Vec<Value>,

    #[serde(default)]
    pub pagy: Option<Pagination>,
}

impl EntriesPage {
    /// Total page count, treating an absent or zero value as one page.
    pub fn total_pages(&self) -> u32 {
        self.pagy
            .as_ref()
            .and_then(|p| p.pages)
            .filter(|&pages| pages > 0)
            .unwrap_or(1)
    }
}

/// `"entries": null` reads as an empty page.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pagination envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub pages: Option<u32>,
}

/// A reading-list item.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEntry {
    /// Entry id, used only for log context
    pub id: Option<String>,
    pub title: Option<String>,
    pub unread: bool,
    pub latest_chapter: Option<RawChapter>,
}

impl RemoteEntry {
    /// Build an entry from its JSON form, tolerating missing or oddly typed
    /// fields.
    pub fn from_json(value: &Value) -> Self {
        let attributes = value.get("attributes");
        let attr = |key: &str| attributes.and_then(|a| a.get(key));

        let id = value.get("id").and_then(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let title = attr("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self {
            id,
            title,
            unread: attr("unread").is_some_and(truthy),
            latest_chapter: attr("latestChapter").and_then(RawChapter::from_json),
        }
    }

    /// Short label for log lines.
    pub fn label(&self) -> String {
        match (&self.title, &self.id) {
            (Some(title), _) => title.clone(),
            (None, Some(id)) => format!("entry {id}"),
            (None, None) => "entry without id".to_string(),
        }
    }
}

/// Loose boolean coercion for flags the API may send as numbers or strings.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "false" && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_from_nested_attributes() {
        let entry = RemoteEntry::from_json(&json!({
            "id": 42,
            "attributes": {
                "title": "Solo Leveling",
                "unread": true,
                "latestChapter": {"chapter": 179.0}
            }
        }));

        assert_eq!(entry.id.as_deref(), Some("42"));
        assert_eq!(entry.title.as_deref(), Some("Solo Leveling"));
        assert!(entry.unread);
        assert_eq!(entry.latest_chapter, Some(RawChapter::Float(179.0)));
    }

    #[test]
    fn test_entry_with_missing_fields() {
        let entry = RemoteEntry::from_json(&json!({"id": "abc", "attributes": {}}));
        assert_eq!(entry.title, None);
        assert!(!entry.unread);
        assert_eq!(entry.latest_chapter, None);
        assert_eq!(entry.label(), "entry abc");

        let bare = RemoteEntry::from_json(&json!({}));
        assert_eq!(bare.label(), "entry without id");
    }

    #[test]
    fn test_blank_title_is_missing() {
        let entry = RemoteEntry::from_json(&json!({"attributes": {"title": "  "}}));
        assert_eq!(entry.title, None);
    }

    #[test]
    fn test_unread_flag_coercion() {
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("yes")));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!("false")));
        assert!(!truthy(&Value::Null));
    }

    #[test]
    fn test_total_pages_defaults_to_one() {
        let page: EntriesPage = serde_json::from_value(json!({"entries": []})).unwrap();
        assert_eq!(page.total_pages(), 1);

        let page: EntriesPage =
            serde_json::from_value(json!({"entries": [], "pagy": {"pages": 0}})).unwrap();
        assert_eq!(page.total_pages(), 1);

        let page: EntriesPage =
            serde_json::from_value(json!({"entries": [], "pagy": {"pages": 4}})).unwrap();
        assert_eq!(page.total_pages(), 4);
    }

    #[test]
    fn test_null_entries_is_empty_page() {
        let page: EntriesPage =
            serde_json::from_str(r#"{"entries": null, "pagy": {"pages": 2}}"#).unwrap();
        assert!(page.entries.is_empty());
        assert_eq!(page.total_pages(), 2);
    }
}
