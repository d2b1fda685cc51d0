mod knowledge_store;
mod shard_sink;

pub use knowledge_store::IKnowledgeStore;
pub use shard_sink::IShardSink;
