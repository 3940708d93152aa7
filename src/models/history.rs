//! Persisted record of previously seen feed items.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::SubFeed;

/// Identifiers seen per sub-feed as of the last delivered update.
///
/// An empty list means the sub-feed has never been tracked. Only a JSON
/// object decodes; serde would otherwise accept a sequence for a struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct HistoryState {
    pub blog: Vec<String>,
    pub motd: Vec<String>,
}

#[derive(Deserialize)]
struct HistoryFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    blog: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    motd: Vec<String>,
}

impl TryFrom<Map<String, Value>> for HistoryState {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let HistoryFields { blog, motd } = serde_json::from_value(Value::Object(map))?;
        Ok(Self { blog, motd })
    }
}

impl HistoryState {
    /// Identifiers recorded for a sub-feed.
    pub fn get(&self, feed: SubFeed) -> &[String] {
        match feed {
            SubFeed::Blog => &self.blog,
            SubFeed::Motd => &self.motd,
        }
    }

    /// Replace the identifiers recorded for a sub-feed.
    pub fn set(&mut self, feed: SubFeed, ids: Vec<String>) {
        match feed {
            SubFeed::Blog => self.blog = ids,
            SubFeed::Motd => self.motd = ids,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_keys_are_empty() {
        let state: HistoryState = serde_json::from_str(r#"{"blog": null}"#).unwrap();
        assert!(state.blog.is_empty());
        assert!(state.motd.is_empty());
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(serde_json::from_str::<HistoryState>(r#"{"blog": "oops"}"#).is_err());
        assert!(serde_json::from_str::<HistoryState>("[]").is_err());
        assert!(serde_json::from_str::<HistoryState>(r#"[["a"], ["b"]]"#).is_err());
    }

    #[test]
    fn get_and_set_by_sub_feed() {
        let mut state = HistoryState::default();
        state.set(SubFeed::Motd, vec!["a".into(), "b".into()]);

        assert_eq!(state.get(SubFeed::Motd), ["a", "b"]);
        assert!(state.get(SubFeed::Blog).is_empty());
    }

    #[test]
    fn serializes_both_keys() {
        let json = serde_json::to_value(HistoryState::default()).unwrap();
        assert_eq!(json, serde_json::json!({"blog": [], "motd": []}));
    }
}
