//! In-memory builders shared by integration tests.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use lighthouse_core::models::{
    Citation, ContentUnit, DifficultyTier, Entity, Fragment, FragmentCategory, FragmentRef, Group,
    NarrativeSlot, PersonaBlob, ScoreBreakdown, Stage,
};
use lighthouse_store::{KnowledgeStore, PartitionSource, Roster, RosterSource};

pub const PRIMARY: &str = "Enochian";

/// Partition ids used by the canonical roster's affinities.
pub const SECONDARY_PARTITIONS: [&str; 4] =
    ["Thelema", "Hermetic_Qabalah", "Golden_Dawn", "Alchemy"];

/// A fragment whose summary is `text`, with one citation of the given reliability.
pub fn fragment(id: &str, text: &str, reliability: f64) -> Fragment {
    Fragment {
        id: id.to_string(),
        name: format!("Fragment {id}"),
        category: FragmentCategory::Concept,
        summary: text.to_string(),
        description: String::new(),
        citations: vec![Citation {
            source_label: format!("source-{id}"),
            reliability,
        }],
        cross_refs: Vec::new(),
        tags: Vec::new(),
        difficulty: DifficultyTier::Beginner,
    }
}

/// A fragment with no citations and no keyword-bearing text.
pub fn bare_fragment(id: &str) -> Fragment {
    let mut f = fragment(id, "", 0.0);
    f.name = id.to_string();
    f.citations.clear();
    f
}

pub fn with_cross_ref(mut fragment: Fragment, partition_id: &str, fragment_id: &str) -> Fragment {
    fragment
        .cross_refs
        .push(FragmentRef::new(partition_id, fragment_id));
    fragment
}

/// Partition with `n` fragments `"{id}-000"..`, each mentioning the
/// partition's two keywords and cited at reliability 0.8.
pub fn partition_source(id: &str, is_primary: bool, n: usize) -> PartitionSource {
    let lower = id.to_lowercase();
    let keywords = vec![lower.clone(), "wisdom".to_string()];
    let fragments = (0..n)
        .map(|i| {
            fragment(
                &format!("{id}-{i:03}"),
                &format!("On {lower} and wisdom, part {i}"),
                0.8,
            )
        })
        .collect();
    PartitionSource::new(id, is_primary)
        .with_keywords(keywords)
        .with_fragments(fragments)
}

/// Store from `(partition id, fragment count)` pairs. The first pair is Primary.
pub fn synthetic_store(layout: &[(&str, usize)]) -> KnowledgeStore {
    let sources = layout
        .iter()
        .enumerate()
        .map(|(i, (id, n))| partition_source(id, i == 0, *n))
        .collect();
    KnowledgeStore::load(sources).expect("synthetic store must load")
}

/// Primary `Enochian` plus `Thelema` and `Alchemy`, ten fragments each.
pub fn scenario_store() -> KnowledgeStore {
    synthetic_store(&[(PRIMARY, 10), ("Thelema", 10), ("Alchemy", 10)])
}

/// Primary plus every secondary partition, `n` fragments each.
pub fn full_store(n: usize) -> KnowledgeStore {
    let mut layout = vec![(PRIMARY, n)];
    layout.extend(SECONDARY_PARTITIONS.iter().map(|id| (*id, n)));
    synthetic_store(&layout)
}

pub fn entity(id: &str, group_id: &str, affinities: &[(&str, f64)]) -> Entity {
    Entity {
        id: id.to_string(),
        name: format!("Entity {id}"),
        group_id: group_id.to_string(),
        declared_affinities: affinities
            .iter()
            .map(|(p, w)| (p.to_string(), *w))
            .collect::<BTreeMap<_, _>>(),
        persona: PersonaBlob(format!("persona:{id}")),
    }
}

pub fn group(id: &str, rank: u32) -> Group {
    Group {
        id: id.to_string(),
        name: format!("Group {id}"),
        rank,
    }
}

/// 30 groups ranked 1..=30; rank 30 holds four entities, every other group three.
/// Affinities rotate through [`SECONDARY_PARTITIONS`].
pub fn canonical_roster_source() -> RosterSource {
    let groups: Vec<Group> = (1..=30).map(|r| group(&format!("G{r:02}"), r)).collect();
    let mut entities = Vec::with_capacity(91);
    for g in &groups {
        let members = if g.rank == 30 { 4 } else { 3 };
        for m in 0..members {
            let n = entities.len();
            let a = SECONDARY_PARTITIONS[n % SECONDARY_PARTITIONS.len()];
            let b = SECONDARY_PARTITIONS[(n + 1) % SECONDARY_PARTITIONS.len()];
            entities.push(entity(
                &format!("{}-E{}", g.id, m + 1),
                &g.id,
                &[(a, 0.7), (b, 0.3)],
            ));
        }
    }
    RosterSource { groups, entities }
}

pub fn canonical_roster() -> Roster {
    Roster::load(canonical_roster_source()).expect("canonical roster must load")
}

/// Fixed timestamp for reproducible units.
pub fn fixed_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// A sealed unit whose persona carries `noise_len` hex characters derived
/// from the unit's identity. Hex noise compresses to roughly half its size.
pub fn content_unit(entity_id: &str, unit_index: u32, noise_len: usize) -> ContentUnit {
    let mut noise = String::with_capacity(noise_len);
    let mut reader = blake3::Hasher::new()
        .update(entity_id.as_bytes())
        .update(&unit_index.to_le_bytes())
        .finalize_xof();
    let mut block = [0u8; 64];
    while noise.len() < noise_len {
        reader.fill(&mut block);
        for byte in block {
            noise.push_str(&format!("{byte:02x}"));
        }
    }
    noise.truncate(noise_len);

    let refs = vec![
        FragmentRef::new(PRIMARY, format!("{PRIMARY}-{:03}", unit_index % 10)),
        FragmentRef::new("Thelema", format!("Thelema-{:03}", unit_index % 7)),
    ];
    let mut unit = ContentUnit {
        id: format!("{entity_id}-u{unit_index:05}"),
        entity_id: entity_id.to_string(),
        entity_name: format!("Entity {entity_id}"),
        group_id: "G01".to_string(),
        unit_index,
        seed: u64::from(unit_index),
        stages: vec![Stage {
            index: 0,
            narrative_slot: NarrativeSlot::Study,
            difficulty_level: 1,
            fragment_refs: refs,
        }],
        difficulty_tier: DifficultyTier::Beginner,
        authenticity_score: 0.75,
        score_breakdown: ScoreBreakdown {
            base: 0.5,
            tradition_multiplier: 1.3,
            primary_source_bonus: 0.1,
            score: 0.75,
            ..ScoreBreakdown::default()
        },
        aggregated_citations: vec![Citation {
            source_label: format!("source-{unit_index}"),
            reliability: 0.8,
        }],
        cross_references: Vec::new(),
        skipped_cross_refs: 0,
        degraded: false,
        persona: PersonaBlob(noise),
        created_at: fixed_epoch(),
        content_hash: String::new(),
    };
    unit.seal().expect("fixture unit must serialize");
    unit
}

/// `count` units for one entity, indices `0..count`.
pub fn content_units(entity_id: &str, count: u32, noise_len: usize) -> Vec<ContentUnit> {
    (0..count)
        .map(|i| content_unit(entity_id, i, noise_len))
        .collect()
}
