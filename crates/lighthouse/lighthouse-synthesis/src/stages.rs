//! Stage layout: contiguous split of the sample over `stage_count` stages.

use lighthouse_core::models::{DifficultyTier, FragmentRef, NarrativeSlot, Stage};

/// `tier.ordinal() * stage_count + stage_index + 1`. Strictly increasing within
/// a unit; higher tiers start higher.
pub fn difficulty_level(tier: DifficultyTier, stage_count: usize, stage_index: usize) -> u32 {
    (tier.ordinal() * stage_count + stage_index + 1) as u32
}

/// Stage `i` receives `refs[i*k/n .. (i+1)*k/n]`, preserving sample order.
pub fn split_into_stages(
    refs: &[FragmentRef],
    stage_count: usize,
    tier: DifficultyTier,
) -> Vec<Stage> {
    let n = stage_count.max(1);
    let k = refs.len();
    (0..n)
        .map(|i| Stage {
            index: i,
            narrative_slot: NarrativeSlot::for_stage(i, n),
            difficulty_level: difficulty_level(tier, n, i),
            fragment_refs: refs[i * k / n..(i + 1) * k / n].to_vec(),
        })
        .collect()
}
