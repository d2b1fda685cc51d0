use lighthouse_core::errors::{LighthouseResult, PackError};
use lighthouse_core::models::{Shard, ShardManifest};
use lighthouse_core::traits::IShardSink;

/// In-memory [`IShardSink`]. Rejects shards that arrive out of sequence.
#[derive(Debug, Default)]
pub struct MemoryShardSink {
    shards: Vec<Shard>,
    manifest: Option<ShardManifest>,
}

impl MemoryShardSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    pub fn manifest(&self) -> Option<&ShardManifest> {
        self.manifest.as_ref()
    }
}

impl IShardSink for MemoryShardSink {
    fn persist(&mut self, shard: &Shard) -> LighthouseResult<()> {
        let expected = self.shards.len() as u64;
        if shard.sequence_index != expected {
            return Err(PackError::Persist {
                reason: format!(
                    "shard {} has sequence index {}, expected {expected}",
                    shard.id, shard.sequence_index
                ),
            }
            .into());
        }
        self.shards.push(shard.clone());
        Ok(())
    }

    fn persist_manifest(&mut self, manifest: &ShardManifest) -> LighthouseResult<()> {
        self.manifest = Some(manifest.clone());
        Ok(())
    }
}
