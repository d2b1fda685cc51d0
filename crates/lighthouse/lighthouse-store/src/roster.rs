//! Entity roster: groups, entities and their difficulty tiers.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use lighthouse_core::constants::{
    CANONICAL_ENTITY_COUNT, CANONICAL_GROUP_COUNT, CANONICAL_GROUP_SIZE,
    CANONICAL_LARGE_GROUP_SIZE,
};
use lighthouse_core::errors::{LighthouseError, LighthouseResult, RosterError};
use lighthouse_core::models::{DifficultyTier, Entity, Group};
use tracing::info;

/// Serialized roster: `{"groups": [...], "entities": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSource {
    pub groups: Vec<Group>,
    pub entities: Vec<Entity>,
}

/// Validated roster. Entity order is preserved from the source.
#[derive(Debug, Clone)]
pub struct Roster {
    groups: Vec<Group>,
    entities: Vec<Entity>,
    group_index: HashMap<String, usize>,
    entity_index: HashMap<String, usize>,
}

impl Roster {
    pub fn load(source: RosterSource) -> LighthouseResult<Self> {
        if source.entities.is_empty() {
            return Err(RosterError::Empty.into());
        }

        let mut group_index = HashMap::with_capacity(source.groups.len());
        let mut ranks = HashSet::with_capacity(source.groups.len());
        for (idx, group) in source.groups.iter().enumerate() {
            if group_index.insert(group.id.clone(), idx).is_some() {
                return Err(RosterError::DuplicateGroup {
                    group_id: group.id.clone(),
                }
                .into());
            }
            if !ranks.insert(group.rank) {
                return Err(RosterError::DuplicateRank {
                    rank: group.rank,
                    group_id: group.id.clone(),
                }
                .into());
            }
        }

        let mut entity_index = HashMap::with_capacity(source.entities.len());
        for (idx, entity) in source.entities.iter().enumerate() {
            if entity_index.insert(entity.id.clone(), idx).is_some() {
                return Err(RosterError::DuplicateEntity {
                    entity_id: entity.id.clone(),
                }
                .into());
            }
            if !group_index.contains_key(&entity.group_id) {
                return Err(RosterError::UnknownGroup {
                    entity_id: entity.id.clone(),
                    group_id: entity.group_id.clone(),
                }
                .into());
            }
            if let Some((partition_id, weight)) = entity
                .declared_affinities
                .iter()
                .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
            {
                return Err(RosterError::InvalidAffinity {
                    entity_id: entity.id.clone(),
                    partition_id: partition_id.clone(),
                    weight: *weight,
                }
                .into());
            }
        }

        info!(
            groups = source.groups.len(),
            entities = source.entities.len(),
            "roster loaded"
        );
        Ok(Self {
            groups: source.groups,
            entities: source.entities,
            group_index,
            entity_index,
        })
    }

    pub fn from_json(json: &str) -> LighthouseResult<Self> {
        let source: RosterSource =
            serde_json::from_str(json).map_err(|e| LighthouseError::InvalidConfiguration {
                reason: format!("roster: {e}"),
            })?;
        Self::load(source)
    }

    pub fn from_path(path: impl AsRef<Path>) -> LighthouseResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Enforce 30 groups with contiguous ranks, 91 entities, and exactly one
    /// group of four with every other group holding three.
    pub fn check_canonical_shape(&self) -> LighthouseResult<()> {
        let shape_err = |reason: String| RosterError::NonCanonicalShape { reason };

        if self.groups.len() != CANONICAL_GROUP_COUNT {
            return Err(shape_err(format!(
                "expected {CANONICAL_GROUP_COUNT} groups, found {}",
                self.groups.len()
            ))
            .into());
        }
        if self.entities.len() != CANONICAL_ENTITY_COUNT {
            return Err(shape_err(format!(
                "expected {CANONICAL_ENTITY_COUNT} entities, found {}",
                self.entities.len()
            ))
            .into());
        }
        let mut ranks: Vec<u32> = self.groups.iter().map(|g| g.rank).collect();
        ranks.sort_unstable();
        if ranks.iter().enumerate().any(|(i, r)| *r as usize != i + 1) {
            return Err(shape_err("group ranks are not contiguous from 1".into()).into());
        }

        let sizes = self.group_sizes();
        let large = sizes
            .values()
            .filter(|n| **n == CANONICAL_LARGE_GROUP_SIZE)
            .count();
        if large != 1 {
            return Err(shape_err(format!(
                "expected one group of {CANONICAL_LARGE_GROUP_SIZE}, found {large}"
            ))
            .into());
        }
        if let Some(group) = self.groups.iter().find(|g| {
            let n = sizes.get(g.id.as_str()).copied().unwrap_or(0);
            n != CANONICAL_GROUP_SIZE && n != CANONICAL_LARGE_GROUP_SIZE
        }) {
            return Err(shape_err(format!(
                "group {} holds {} entities",
                group.id,
                sizes.get(group.id.as_str()).copied().unwrap_or(0)
            ))
            .into());
        }
        Ok(())
    }

    /// Difficulty tier of an entity, derived from its group's rank.
    pub fn tier_of(&self, entity: &Entity) -> LighthouseResult<DifficultyTier> {
        let group = self.group_of(entity).ok_or_else(|| RosterError::UnknownGroup {
            entity_id: entity.id.clone(),
            group_id: entity.group_id.clone(),
        })?;
        Ok(DifficultyTier::from_group_rank(group.rank, self.groups.len()))
    }

    pub fn group_of(&self, entity: &Entity) -> Option<&Group> {
        self.group_index
            .get(&entity.group_id)
            .map(|&idx| &self.groups[idx])
    }

    pub fn get_entity(&self, entity_id: &str) -> LighthouseResult<&Entity> {
        self.entity_index
            .get(entity_id)
            .map(|&idx| &self.entities[idx])
            .ok_or_else(|| {
                RosterError::EntityNotFound {
                    entity_id: entity_id.to_string(),
                }
                .into()
            })
    }

    /// Entities in source order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn members<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.group_id == group_id)
    }

    fn group_sizes(&self) -> BTreeMap<&str, usize> {
        let mut sizes = BTreeMap::new();
        for entity in &self.entities {
            *sizes.entry(entity.group_id.as_str()).or_insert(0) += 1;
        }
        sizes
    }
}
