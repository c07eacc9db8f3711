//! Header index and spam classification

use crate::lenient;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Header carrying the spam filter score
pub const SPAM_SCORE_HEADER: &str = "X-Spam-Score";

/// Header carrying the spam filter verdict
pub const SPAM_STATUS_HEADER: &str = "X-Spam-Status";

/// Header carrying the sender-assigned message id
pub const MESSAGE_ID_HEADER: &str = "Message-ID";

/// Score reported when the score header is absent or not numeric
pub const DEFAULT_SPAM_SCORE: f64 = 0.0;

/// Status reported when the status header is absent
pub const DEFAULT_SPAM_STATUS: &str = "No";

/// Headers of the inbound message, keyed by name exactly as received
///
/// Iteration follows first appearance. When a name repeats, the last value
/// wins but keeps the position of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    entries: Vec<(String, String)>,
    /// Lowercased name to entry position, for case-insensitive lookups
    folded: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Build the index from `(name, value)` pairs in received order
    #[must_use]
    pub fn build<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (name, value) in headers {
            let (name, value) = (name.into(), value.into());
            if let Some(&pos) = positions.get(&name) {
                entries[pos].1 = value;
            } else {
                positions.insert(name.clone(), entries.len());
                entries.push((name, value));
            }
        }

        let folded = entries
            .iter()
            .enumerate()
            .map(|(pos, (name, _))| (name.to_lowercase(), pos))
            .collect();

        Self { entries, folded }
    }

    /// Build the index from the payload's `Headers` list of `{Name, Value}`.
    ///
    /// Records without a name are skipped; a missing value becomes empty.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Array(records)) = value else {
            return Self::default();
        };

        Self::build(records.iter().filter_map(|raw| {
            let record: HeaderRecord = lenient::record(raw);
            match record.name {
                Some(name) => Some((name, record.value.unwrap_or_default())),
                None => {
                    debug!("Skipping header without a name: {raw}");
                    None
                }
            }
        }))
    }

    /// Value for a header name, matched exactly
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value for a header name, ignoring case
    #[must_use]
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.folded
            .get(&name.to_lowercase())
            .map(|&pos| self.entries[pos].1.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Spam filter score, `0.0` when absent or not a finite number
    #[must_use]
    pub fn spam_score(&self) -> f64 {
        self.get_ignore_case(SPAM_SCORE_HEADER)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|score| score.is_finite())
            .unwrap_or(DEFAULT_SPAM_SCORE)
    }

    /// Spam filter verdict, `"No"` when absent
    #[must_use]
    pub fn spam_status(&self) -> &str {
        self.get_ignore_case(SPAM_STATUS_HEADER)
            .unwrap_or(DEFAULT_SPAM_STATUS)
    }

    /// True when the status reads `Yes` once its first letter is uppercased
    #[must_use]
    pub fn is_spam(&self) -> bool {
        upper_first(self.spam_status()) == "Yes"
    }

    /// The `Message-ID` header, matched case-insensitively
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.get_ignore_case(MESSAGE_ID_HEADER)
    }
}

impl Serialize for HeaderIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Default, Deserialize)]
struct HeaderRecord {
    #[serde(rename = "Name", default, deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(rename = "Value", default, deserialize_with = "lenient::string")]
    value: Option<String>,
}

/// Uppercase the first character only, leaving the rest untouched
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
