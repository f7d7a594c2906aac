use serde::Deserialize;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

/// Name of one class the classifier can output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LabelError {
    #[error("label universe is empty")]
    Empty,
    #[error("label at position {0} is blank")]
    Blank(usize),
    #[error("label `{0}` appears more than once")]
    Duplicate(Label),
    #[error("expected {expected} probabilities, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// The fixed, ordered set of labels a classifier supports.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelUniverse {
    labels: Vec<Label>,
}

impl LabelUniverse {
    pub fn new(labels: Vec<Label>) -> Result<Self, LabelError> {
        if labels.is_empty() {
            return Err(LabelError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, label) in labels.iter().enumerate() {
            if label.as_str().trim().is_empty() {
                return Err(LabelError::Blank(index));
            }
            if !seen.insert(label.as_str()) {
                return Err(LabelError::Duplicate(label.clone()));
            }
        }

        Ok(Self { labels })
    }

    /// Parses a `labels.txt` style listing: one label per line, surrounding
    /// whitespace trimmed, blank lines skipped.
    pub fn from_lines(text: &str) -> Result<Self, LabelError> {
        let labels = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Label::from)
            .collect();

        Self::new(labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.as_str() == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

/// Per-label probabilities for one input, in label universe order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityDistribution {
    entries: Vec<(Label, f32)>,
}

impl ProbabilityDistribution {
    pub fn new(universe: &LabelUniverse, probabilities: &[f32]) -> Result<Self, LabelError> {
        if probabilities.len() != universe.len() {
            return Err(LabelError::LengthMismatch {
                expected: universe.len(),
                actual: probabilities.len(),
            });
        }

        let entries = universe
            .iter()
            .cloned()
            .zip(probabilities.iter().copied())
            .collect();

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(Label, f32)] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn probability_of(&self, label: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(l, _)| l.as_str() == label)
            .map(|(_, p)| *p)
    }

    /// Index of the most probable label. The first one wins on ties and NaN
    /// scores are never selected.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, (_, probability)) in self.entries.iter().enumerate() {
            if probability.is_nan() {
                continue;
            }
            match best {
                Some((_, current)) if *probability <= current => {}
                _ => best = Some((index, *probability)),
            }
        }
        best.map(|(index, _)| index)
    }
}
