//! Serialized input forms of the knowledge base.

use serde::{Deserialize, Serialize};

use lighthouse_core::models::{Fragment, Partition, PartitionId};

/// One partition as supplied by a caller or a JSON bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionSource {
    pub id: PartitionId,
    /// Display name; the id is used when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl PartitionSource {
    pub fn new(id: impl Into<String>, is_primary: bool) -> Self {
        Self {
            id: id.into(),
            name: None,
            is_primary,
            keywords: Vec::new(),
            fragments: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fragments(mut self, fragments: Vec<Fragment>) -> Self {
        self.fragments = fragments;
        self
    }

    /// Normalize into a [`Partition`]. Keywords are trimmed, lowercased and
    /// deduplicated in first-seen order.
    pub fn into_partition(self) -> Partition {
        let mut keywords: Vec<String> = Vec::with_capacity(self.keywords.len());
        for keyword in self.keywords {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty() && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        Partition {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            is_primary: self.is_primary,
            keywords,
            fragments: self.fragments,
        }
    }
}

/// JSON knowledge bundle: `{"partitions": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBundle {
    pub partitions: Vec<PartitionSource>,
}
