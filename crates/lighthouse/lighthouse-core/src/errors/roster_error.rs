/// Entity roster errors. All of them are configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster is empty")]
    Empty,

    #[error("duplicate group: {group_id}")]
    DuplicateGroup { group_id: String },

    #[error("duplicate group rank {rank} (group {group_id})")]
    DuplicateRank { rank: u32, group_id: String },

    #[error("duplicate entity: {entity_id}")]
    DuplicateEntity { entity_id: String },

    #[error("entity {entity_id} references unknown group {group_id}")]
    UnknownGroup { entity_id: String, group_id: String },

    #[error("entity {entity_id} declares invalid affinity {weight} for {partition_id}")]
    InvalidAffinity {
        entity_id: String,
        partition_id: String,
        weight: f64,
    },

    #[error("entity not found: {entity_id}")]
    EntityNotFound { entity_id: String },

    #[error("roster does not have the canonical shape: {reason}")]
    NonCanonicalShape { reason: String },
}
