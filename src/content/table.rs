use crate::label::{Label, LabelUniverse};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// One configured item of a content list. Anything that is not a string is
/// kept as-is here and dropped when content is resolved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentValue {
    Text(String),
    Other(toml::Value),
}

impl From<&str> for ContentValue {
    fn from(text: &str) -> Self {
        ContentValue::Text(text.to_string())
    }
}

/// Curated snippets shown for one label. `images` items are either remote
/// URLs or inline `data:` URIs. A lone value is read as a one-item list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentEntry {
    #[serde(default, deserialize_with = "one_or_many")]
    pub texts: Vec<ContentValue>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub images: Vec<ContentValue>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub videos: Vec<ContentValue>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ContentValue>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ContentValue>),
        One(ContentValue),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(values) => values,
        OneOrMany::One(value) => vec![value],
    })
}

/// Static label -> content mapping keyed by the literal label string.
///
/// ```toml
/// [happy]
/// texts = ["They are happy."]
/// images = ["https://example.com/happy.webp"]
/// videos = []
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTable {
    entries: HashMap<Label, ContentEntry>,
}

impl ContentTable {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_entry(mut self, label: impl Into<Label>, entry: ContentEntry) -> Self {
        self.entries.insert(label.into(), entry);
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let entries: HashMap<Label, ContentEntry> = toml::from_str(text)?;
        Ok(Self { entries })
    }

    pub fn get(&self, label: &str) -> Option<&ContentEntry> {
        self.entries.get(label)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Configured labels the classifier can never predict, sorted. Usually a
    /// typo or a label that was renamed when the model was retrained.
    pub fn unknown_labels(&self, universe: &LabelUniverse) -> Vec<&Label> {
        let mut unknown: Vec<&Label> = self
            .entries
            .keys()
            .filter(|label| !universe.contains(label.as_str()))
            .collect();
        unknown.sort();
        unknown
    }

    /// Labels of the universe with no configured entry, in universe order.
    pub fn uncovered_labels<'a>(&self, universe: &'a LabelUniverse) -> Vec<&'a Label> {
        universe
            .iter()
            .filter(|label| !self.entries.contains_key(label.as_str()))
            .collect()
    }
}
