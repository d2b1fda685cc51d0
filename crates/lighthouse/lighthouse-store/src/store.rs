//! KnowledgeStore: validated, read-only partitions indexed for O(1) lookup.

use std::collections::HashMap;
use std::path::Path;

use lighthouse_core::errors::{LighthouseError, LighthouseResult, StoreError};
use lighthouse_core::models::{Fragment, Partition};
use lighthouse_core::traits::IKnowledgeStore;
use tracing::{debug, info};

use crate::bundle::{KnowledgeBundle, PartitionSource};

/// Immutable after load. Shared across worker threads by reference.
#[derive(Debug)]
pub struct KnowledgeStore {
    partitions: Vec<Partition>,
    partition_index: HashMap<String, usize>,
    /// Per partition: fragment id → position.
    fragment_index: Vec<HashMap<String, usize>>,
    primary: usize,
}

impl KnowledgeStore {
    /// Validate and index the given partitions.
    ///
    /// Zero or several Primary partitions is an invalid configuration.
    /// Duplicate ids and out-of-range citation reliabilities are load errors.
    /// Dangling cross references are left for synthesis to skip.
    pub fn load(sources: Vec<PartitionSource>) -> LighthouseResult<Self> {
        let mut partitions = Vec::with_capacity(sources.len());
        let mut partition_index = HashMap::with_capacity(sources.len());
        let mut fragment_index = Vec::with_capacity(sources.len());
        let mut primaries = Vec::new();

        for source in sources {
            let partition = source.into_partition();
            if partition_index.contains_key(&partition.id) {
                return Err(StoreError::DuplicatePartition {
                    partition_id: partition.id,
                }
                .into());
            }

            let mut fragments = HashMap::with_capacity(partition.fragments.len());
            for (pos, fragment) in partition.fragments.iter().enumerate() {
                if fragments.insert(fragment.id.clone(), pos).is_some() {
                    return Err(StoreError::DuplicateFragment {
                        partition_id: partition.id.clone(),
                        fragment_id: fragment.id.clone(),
                    }
                    .into());
                }
                if let Some(bad) = fragment
                    .citations
                    .iter()
                    .find(|c| !(0.0..=1.0).contains(&c.reliability))
                {
                    return Err(StoreError::InvalidCitation {
                        partition_id: partition.id.clone(),
                        fragment_id: fragment.id.clone(),
                        reliability: bad.reliability,
                    }
                    .into());
                }
            }

            if partition.is_primary {
                primaries.push(partition.id.clone());
            }
            debug!(
                partition = %partition.id,
                fragments = partition.fragments.len(),
                keywords = partition.keywords.len(),
                "partition indexed"
            );
            partition_index.insert(partition.id.clone(), partitions.len());
            fragment_index.push(fragments);
            partitions.push(partition);
        }

        let primary_id = match primaries.as_slice() {
            [only] => only.clone(),
            [] => {
                return Err(LighthouseError::InvalidConfiguration {
                    reason: "no Primary partition declared".into(),
                })
            }
            many => {
                return Err(LighthouseError::InvalidConfiguration {
                    reason: format!("multiple Primary partitions declared: {}", many.join(", ")),
                })
            }
        };
        let primary = partition_index[&primary_id];

        let store = Self {
            partitions,
            partition_index,
            fragment_index,
            primary,
        };
        info!(
            partitions = store.partitions.len(),
            fragments = store.fragment_count(),
            primary = %primary_id,
            "knowledge store loaded"
        );
        Ok(store)
    }

    /// Load from a JSON knowledge bundle.
    pub fn from_json(json: &str) -> LighthouseResult<Self> {
        let bundle: KnowledgeBundle =
            serde_json::from_str(json).map_err(|e| StoreError::LoadFailed {
                reason: e.to_string(),
            })?;
        Self::load(bundle.partitions)
    }

    /// Load from a JSON knowledge bundle on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LighthouseResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn get_partition(&self, partition_id: &str) -> Result<&Partition, StoreError> {
        self.partition_index
            .get(partition_id)
            .map(|&idx| &self.partitions[idx])
            .ok_or_else(|| StoreError::PartitionNotFound {
                partition_id: partition_id.to_string(),
            })
    }

    pub fn get_fragment(
        &self,
        partition_id: &str,
        fragment_id: &str,
    ) -> Result<&Fragment, StoreError> {
        let idx = *self.partition_index.get(partition_id).ok_or_else(|| {
            StoreError::PartitionNotFound {
                partition_id: partition_id.to_string(),
            }
        })?;
        self.fragment_index[idx]
            .get(fragment_id)
            .map(|&pos| &self.partitions[idx].fragments[pos])
            .ok_or_else(|| StoreError::FragmentNotFound {
                partition_id: partition_id.to_string(),
                fragment_id: fragment_id.to_string(),
            })
    }

    pub fn primary(&self) -> &Partition {
        &self.partitions[self.primary]
    }

    pub fn primary_id(&self) -> &str {
        &self.partitions[self.primary].id
    }

    /// Partitions in load order.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn fragment_count(&self) -> usize {
        self.partitions.iter().map(|p| p.fragments.len()).sum()
    }
}

impl IKnowledgeStore for KnowledgeStore {
    fn get_partition(&self, partition_id: &str) -> LighthouseResult<&Partition> {
        Ok(KnowledgeStore::get_partition(self, partition_id)?)
    }

    fn get_fragment(&self, partition_id: &str, fragment_id: &str) -> LighthouseResult<&Fragment> {
        Ok(KnowledgeStore::get_fragment(self, partition_id, fragment_id)?)
    }

    fn primary_id(&self) -> &str {
        KnowledgeStore::primary_id(self)
    }

    fn partition_ids(&self) -> Vec<&str> {
        self.partitions.iter().map(|p| p.id.as_str()).collect()
    }
}
