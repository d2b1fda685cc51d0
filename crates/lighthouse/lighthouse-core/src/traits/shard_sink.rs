use crate::errors::LighthouseResult;
use crate::models::{Shard, ShardManifest};

/// Boundary to the external ledger layer. Receives sealed shards in sequence order.
pub trait IShardSink: Send {
    fn persist(&mut self, shard: &Shard) -> LighthouseResult<()>;

    fn persist_manifest(&mut self, manifest: &ShardManifest) -> LighthouseResult<()>;
}
