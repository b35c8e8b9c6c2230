//! Chapter values and their canonical form.
//!
//! The reading-list API reports the latest chapter as an integer, a float or
//! a numeric string depending on the source site. [`Chapter::normalize`] is
//! the single place these shapes are folded into one display string, so that
//! `12`, `12.0` and `"12.00"` all compare equal against persisted state.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chapter value as it arrives on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RawChapter {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawChapter {
    /// Extract a chapter value from JSON.
    ///
    /// Objects are unwrapped through their `chapter` key, so both
    /// `latestChapter: 12` and `latestChapter: {"chapter": 12}` work.
    /// Returns `None` for null, booleans, arrays and objects without a
    /// usable `chapter` key.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Integer(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Object(map) => map.get("chapter").and_then(Self::from_json),
            _ => None,
        }
    }
}

/// Why a chapter value could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterSkip {
    /// No chapter value at all
    Missing,
    /// Value rendered to an empty string
    Empty,
    /// Value rendered to `"0"`
    Zero,
}

impl fmt::Display for ChapterSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ChapterSkip::Missing => "no chapter info",
            ChapterSkip::Empty => "empty chapter",
            ChapterSkip::Zero => "zero chapter",
        };
        f.write_str(reason)
    }
}

/// Canonical chapter string: no trailing `.0`, no trailing zeros after a
/// decimal point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chapter(String);

impl Chapter {
    /// Normalize a raw chapter value.
    pub fn normalize(raw: Option<&RawChapter>) -> Result<Self, ChapterSkip> {
        let rendered = match raw {
            None => return Err(ChapterSkip::Missing),
            Some(RawChapter::Integer(i)) => i.to_string(),
            Some(RawChapter::Float(f)) if f.fract() == 0.0 => format!("{f:.0}"),
            Some(RawChapter::Float(f)) => strip_fraction_zeros(&f.to_string()),
            Some(RawChapter::Text(s)) => strip_fraction_zeros(s.trim()),
        };

        match rendered.as_str() {
            "" => Err(ChapterSkip::Empty),
            "0" => Err(ChapterSkip::Zero),
            _ => Ok(Self(rendered)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Chapter> for String {
    fn from(chapter: Chapter) -> Self {
        chapter.0
    }
}

/// `"12.50"` -> `"12.5"`, `"12.00"` -> `"12"`. Values without a decimal
/// point are left alone.
fn strip_fraction_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
