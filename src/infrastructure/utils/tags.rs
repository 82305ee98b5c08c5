use serde::{Deserialize, Serialize};

/// Tag input as submitted by the admin forms: either the raw
/// comma-separated text field or an already split list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TagList {
    Text(String),
    List(Vec<String>),
}

impl Default for TagList {
    fn default() -> Self {
        TagList::List(Vec::new())
    }
}

impl TagList {
    /// Trimmed, non-empty tags in submission order.
    pub fn normalize(self) -> Vec<String> {
        match self {
            TagList::Text(text) => split_tags(&text),
            TagList::List(tags) => tags
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

impl From<&str> for TagList {
    fn from(text: &str) -> Self {
        TagList::Text(text.to_string())
    }
}

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        TagList::List(tags)
    }
}

pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
