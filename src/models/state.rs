//! Persisted title -> last notified chapter mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::chapter::Chapter;

/// Last chapter notified for each title currently marked unread.
///
/// Backed by a `BTreeMap` so the file is written with sorted keys and
/// saving the same mapping twice produces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnreadState(BTreeMap<String, Chapter>);

impl UnreadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, title: &str) -> Option<&Chapter> {
        self.0.get(title)
    }

    pub fn insert(&mut self, title: impl Into<String>, chapter: Chapter) -> Option<Chapter> {
        self.0.insert(title.into(), chapter)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.0.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Titles present here but not in `other`, in sorted order.
    pub fn titles_missing_from<'a>(&'a self, other: &UnreadState) -> Vec<&'a str> {
        self.titles().filter(|t| !other.contains(t)).collect()
    }
}

impl FromIterator<(String, Chapter)> for UnreadState {
    fn from_iter<I: IntoIterator<Item = (String, Chapter)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawChapter;

    fn chapter(s: &str) -> Chapter {
        Chapter::normalize(Some(&RawChapter::Text(s.into()))).unwrap()
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut state = UnreadState::new();
        state.insert("Omniscient Reader", chapter("11"));
        state.insert("Blue Lock", chapter("250.5"));

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"Blue Lock":"250.5","Omniscient Reader":"11"}"#);

        let back: UnreadState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_titles_missing_from() {
        let prior: UnreadState = [
            ("A".to_string(), chapter("1")),
            ("B".to_string(), chapter("2")),
        ]
        .into_iter()
        .collect();
        let mut next = UnreadState::new();
        next.insert("B", chapter("3"));

        assert_eq!(prior.titles_missing_from(&next), vec!["A"]);
        assert!(next.titles_missing_from(&prior).is_empty());
    }
}
