use crate::content::table::{ContentTable, ContentValue};

/// Most items of each kind shown for a label.
pub const MAX_ITEMS_PER_KIND: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedContent {
    pub texts: Vec<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

impl ResolvedContent {
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.images.is_empty() && self.videos.is_empty()
    }
}

/// Content to display for `label`. A label without an entry resolves to three
/// empty lists.
pub fn resolve(table: &ContentTable, label: &str) -> ResolvedContent {
    match table.get(label) {
        Some(entry) => ResolvedContent {
            texts: pick_top(&entry.texts),
            images: pick_top(&entry.images),
            videos: pick_top(&entry.videos),
        },
        None => ResolvedContent::default(),
    }
}

/// Non-blank strings in configured order, at most [`MAX_ITEMS_PER_KIND`].
/// Items are returned verbatim.
pub fn pick_top(values: &[ContentValue]) -> Vec<String> {
    values
        .iter()
        .filter_map(|value| match value {
            ContentValue::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        })
        .take(MAX_ITEMS_PER_KIND)
        .collect()
}
